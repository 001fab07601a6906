//! Category record and DTOs.

use bson::serde_helpers::serialize_object_id_as_hex_string;
use bson::Document;
use menagerie_core::error::CoreError;
use menagerie_core::normalize;
use menagerie_core::resource::{
    ResourceKind, CREATED_AT_FIELD, ID_FIELD, NAME_FIELD, UPDATED_AT_FIELD,
};
use menagerie_core::types::{nil_id, DocId, Timestamp};
use menagerie_core::validation::{first_non_blank, validate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Record;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub id: DocId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record for Category {
    const KIND: ResourceKind = ResourceKind::Category;

    fn from_document(doc: &Document) -> Self {
        let id = normalize::id(doc);
        let (created_at, updated_at) = normalize::timestamps(doc, &id);
        Self {
            id,
            name: normalize::name(doc, Self::KIND),
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
        out.insert(CREATED_AT_FIELD, bson::DateTime::from_chrono(self.created_at));
        out.insert(UPDATED_AT_FIELD, bson::DateTime::from_chrono(self.updated_at));
        out
    }

    fn set_id(&mut self, id: DocId) {
        self.id = id;
    }
}

/// Request body for creating or updating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryInput {
    pub name: Option<String>,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CategoryChanges {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: Option<String>,
}

impl CategoryInput {
    fn resolved_name(&self) -> Option<String> {
        first_non_blank(&[self.name.as_deref(), self.category_name.as_deref()])
    }

    pub fn into_new(self) -> Result<NewCategory, CoreError> {
        let name = self
            .resolved_name()
            .ok_or_else(|| CoreError::Validation("name is required".to_string()))?;
        let category = NewCategory { name };
        validate(&category)?;
        Ok(category)
    }

    pub fn into_changes(self) -> Result<CategoryChanges, CoreError> {
        let changes = CategoryChanges {
            name: self.resolved_name(),
        };
        validate(&changes)?;
        Ok(changes)
    }
}

impl NewCategory {
    pub fn into_record(self, now: Timestamp) -> Category {
        Category {
            id: nil_id(),
            name: self.name,
            created_at: now,
            updated_at: now,
        }
    }
}

impl CategoryChanges {
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert(NAME_FIELD, name.as_str());
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

    #[test]
    fn legacy_alias_and_missing_timestamps() {
        let id = ObjectId::new();
        let category = Category::from_document(&doc! { "_id": id, "category_name": "Mammals" });
        assert_eq!(category.name, "Mammals");
        assert_eq!(category.created_at, id.timestamp().to_chrono());
        assert_eq!(category.updated_at, category.created_at);
    }

    #[test]
    fn present_created_at_is_kept_and_updated_at_follows_it() {
        let created = bson::DateTime::from_millis(1_600_000_000_000);
        let category = Category::from_document(&doc! {
            "_id": ObjectId::new(),
            "name": "Birds",
            "createdAt": created,
        });
        assert_eq!(category.created_at, created.to_chrono());
        assert_eq!(category.updated_at, created.to_chrono());
    }

    #[test]
    fn normalization_is_idempotent() {
        let stored = doc! { "_id": ObjectId::new(), "category_name": "Reptiles" };
        let once = Category::from_document(&stored);
        let twice = Category::from_document(&once.to_document());
        assert_eq!(once, twice);
    }

    #[test]
    fn create_uses_alias_when_name_blank() {
        let input = CategoryInput {
            name: Some("".into()),
            category_name: Some("Fish".into()),
        };
        assert_eq!(input.into_new().unwrap().name, "Fish");
    }

    #[test]
    fn create_requires_name() {
        assert_matches!(
            CategoryInput::default().into_new(),
            Err(CoreError::Validation(msg)) if msg == "name is required"
        );
    }

    #[test]
    fn create_enforces_length() {
        let input = CategoryInput {
            name: Some("x".repeat(101)),
            category_name: None,
        };
        assert_matches!(input.into_new(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_update_sets_nothing() {
        let changes = CategoryInput::default().into_changes().unwrap();
        assert!(changes.to_set_document().is_empty());
    }
}
