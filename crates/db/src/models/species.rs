//! Species record and DTOs.

use bson::serde_helpers::serialize_object_id_as_hex_string;
use bson::Document;
use menagerie_core::error::CoreError;
use menagerie_core::normalize;
use menagerie_core::query::CATEGORY_FIELD;
use menagerie_core::reference::Reference;
use menagerie_core::resource::{
    ResourceKind, CREATED_AT_FIELD, ID_FIELD, NAME_FIELD, UPDATED_AT_FIELD,
};
use menagerie_core::types::{nil_id, DocId, Timestamp};
use menagerie_core::validation::{first_non_blank, non_blank, validate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub id: DocId,
    pub name: String,
    /// Free text or the hex identifier of a category. Empty when unset.
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Species {
    const KIND: ResourceKind = ResourceKind::Species;

    fn from_document(doc: &Document) -> Self {
        let id = normalize::id(doc);
        let (created_at, updated_at) = normalize::timestamps(doc, &id);
        Self {
            id,
            name: normalize::name(doc, Self::KIND),
            category: normalize::reference(doc, CATEGORY_FIELD),
            created_at,
            updated_at,
        }
    }

    fn to_document(&self) -> Document {
        let mut out = Document::new();
        if self.id != nil_id() {
            out.insert(ID_FIELD, self.id);
        }
        out.insert(NAME_FIELD, self.name.as_str());
        out.insert(CATEGORY_FIELD, self.category.as_str());
        out.insert(CREATED_AT_FIELD, bson::DateTime::from_chrono(self.created_at));
        out.insert(UPDATED_AT_FIELD, bson::DateTime::from_chrono(self.updated_at));
        out
    }

    fn set_id(&mut self, id: DocId) {
        self.id = id;
    }
}

/// Request body for creating or updating a species.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesInput {
    pub name: Option<String>,
    pub species_name: Option<String>,
    /// Category identifier or free text.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewSpecies {
    #[validate(length(min = 2, max = 200, message = "name must be between 2 and 200 characters"))]
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct SpeciesChanges {
    #[validate(length(min = 2, max = 200, message = "name must be between 2 and 200 characters"))]
    pub name: Option<String>,
    pub category: Option<String>,
}

impl SpeciesInput {
    fn resolved_name(&self) -> Option<String> {
        first_non_blank(&[self.name.as_deref(), self.species_name.as_deref()])
    }

    fn resolved_category(&self) -> Option<String> {
        non_blank(self.category.as_deref()).map(|c| Reference::parse(&c).as_string())
    }

    pub fn into_new(self) -> Result<NewSpecies, CoreError> {
        let name = self
            .resolved_name()
            .ok_or_else(|| CoreError::Validation("name is required".to_string()))?;
        let species = NewSpecies {
            name,
            category: self.resolved_category().unwrap_or_default(),
        };
        validate(&species)?;
        Ok(species)
    }

    pub fn into_changes(self) -> Result<SpeciesChanges, CoreError> {
        let changes = SpeciesChanges {
            name: self.resolved_name(),
            category: self.resolved_category(),
        };
        validate(&changes)?;
        Ok(changes)
    }
}

impl NewSpecies {
    pub fn into_record(self, now: Timestamp) -> Species {
        Species {
            id: nil_id(),
            name: self.name,
            category: self.category,
            created_at: now,
            updated_at: now,
        }
    }
}

impl SpeciesChanges {
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert(NAME_FIELD, name.as_str());
        }
        if let Some(category) = &self.category {
            set.insert(CATEGORY_FIELD, category.as_str());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use bson::doc;
    use bson::oid::ObjectId;

    use super::*;

    const CATEGORY_HEX: &str = "65a1b2c3d4e5f60718293a4b";

    #[test]
    fn identifier_category_reads_as_hex() {
        let category = ObjectId::parse_str(CATEGORY_HEX).unwrap();
        let species = Species::from_document(&doc! {
            "_id": ObjectId::new(),
            "species_name": "Canis lupus",
            "category": category,
        });
        assert_eq!(species.name, "Canis lupus");
        assert_eq!(species.category, CATEGORY_HEX);
    }

    #[test]
    fn missing_category_is_empty() {
        let species = Species::from_document(&doc! { "name": "Felis catus" });
        assert_eq!(species.category, "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let category = ObjectId::parse_str(CATEGORY_HEX).unwrap();
        let stored = doc! {
            "_id": ObjectId::new(),
            "species_name": "Canis lupus",
            "category": category,
        };
        let once = Species::from_document(&stored);
        assert_eq!(Species::from_document(&once.to_document()), once);
    }

    #[test]
    fn long_names_up_to_two_hundred_are_accepted() {
        let input = SpeciesInput {
            name: Some("x".repeat(200)),
            ..Default::default()
        };
        assert!(input.into_new().is_ok());

        let input = SpeciesInput {
            name: Some("x".repeat(201)),
            ..Default::default()
        };
        assert_matches!(input.into_new(), Err(CoreError::Validation(msg)) if msg.contains("200"));
    }

    #[test]
    fn create_canonicalizes_category() {
        let input = SpeciesInput {
            species_name: Some("Canis lupus".into()),
            category: Some(" Mammals ".into()),
            ..Default::default()
        };
        let new = input.into_new().unwrap();
        assert_eq!(new.name, "Canis lupus");
        assert_eq!(new.category, "Mammals");
    }

    #[test]
    fn update_sets_category_only() {
        let input = SpeciesInput {
            category: Some(CATEGORY_HEX.to_uppercase()),
            ..Default::default()
        };
        let set = input.into_changes().unwrap().to_set_document();
        assert_eq!(set, doc! { "category": CATEGORY_HEX });
    }
}
