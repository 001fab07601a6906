//! Weak cross-references between resources.
//!
//! A reference names another document without any guarantee that it exists.
//! Writers in the wild store either the target's identifier or free text, so
//! both shapes are accepted on read and in filters. This service itself
//! always writes the canonical string form.

use bson::oid::ObjectId;
use bson::Bson;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Id(ObjectId),
    Text(String),
}

impl Reference {
    /// Interpret user input. Valid 24-hex identifiers become [`Reference::Id`].
    pub fn parse(raw: &str) -> Self {
        match ObjectId::parse_str(raw) {
            Ok(id) => Reference::Id(id),
            Err(_) => Reference::Text(raw.to_string()),
        }
    }

    /// Read a stored value. Anything other than a string or identifier is `None`.
    pub fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::String(s) => Some(Reference::Text(s.clone())),
            Bson::ObjectId(id) => Some(Reference::Id(*id)),
            _ => None,
        }
    }

    /// Canonical string form; identifiers render as lowercase hex.
    pub fn as_string(&self) -> String {
        match self {
            Reference::Id(id) => id.to_hex(),
            Reference::Text(s) => s.clone(),
        }
    }

    /// Every stored encoding this reference may have been written as.
    ///
    /// Filters match on any of them, so an identifier-shaped value also
    /// matches documents that stored it as plain text.
    pub fn stored_forms(raw: &str) -> Vec<Bson> {
        let mut forms = vec![Bson::String(raw.to_string())];
        if let Reference::Id(id) = Reference::parse(raw) {
            forms.push(Bson::ObjectId(id));
        }
        forms
    }
}
