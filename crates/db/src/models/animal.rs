//! Animal record, normalizer and DTOs.

use bson::serde_helpers::serialize_object_id_as_hex_string;
use bson::{doc, Bson, Document};
use chrono::Utc;
use menagerie_core::age::age_from_birthdate;
use menagerie_core::error::CoreError;
use menagerie_core::normalize;
use menagerie_core::query::{ADOPTED_FIELD, SPECIES_FIELD};
use menagerie_core::reference::Reference;
use menagerie_core::resource::{
    ResourceKind, CREATED_AT_FIELD, ID_FIELD, NAME_FIELD, UPDATED_AT_FIELD,
};
use menagerie_core::types::{nil_id, DocId, Timestamp};
use menagerie_core::validation::{first_non_blank, non_blank, validate};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::geo::GeoPoint;
use crate::models::Record;

const IMAGE_FIELD: &str = "image";
const OWNER_FIELD: &str = "owner";
const LOCATION_FIELD: &str = "location";

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// Canonical animal record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub id: DocId,
    pub name: String,
    /// Free text or the hex identifier of a species.
    pub species: String,
    pub age: i32,
    pub adopted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Animal {
    /// Normalize with ages computed as of `now`.
    pub fn from_document_at(doc: &Document, now: Timestamp) -> Self {
        let id = normalize::id(doc);
        let (created_at, updated_at) = normalize::timestamps(doc, &id);
        let location = match doc.get(LOCATION_FIELD) {
            Some(Bson::Document(loc)) => Some(GeoPoint::from_document(loc)),
            _ => None,
        };

        Self {
            id,
            name: normalize::name(doc, ResourceKind::Animal),
            species: normalize::reference(doc, SPECIES_FIELD),
            age: normalize::age(doc, now),
            adopted: normalize::flag(doc, ADOPTED_FIELD),
            image: normalize::optional_string(doc, IMAGE_FIELD),
            owner: normalize::optional_string(doc, OWNER_FIELD),
            location,
            created_at,
            updated_at,
        }
    }
}

impl Record for Animal {
    const KIND: ResourceKind = ResourceKind::Animal;

    fn from_document(doc: &Document) -> Self {
        Self::from_document_at(doc, Utc::now())
    }

    fn to_document(&self) -> Document {
        let mut out = Document::new();
        if self.id != nil_id() {
            out.insert(ID_FIELD, self.id);
        }
        out.insert(NAME_FIELD, self.name.as_str());
        out.insert(SPECIES_FIELD, self.species.as_str());
        out.insert(normalize::AGE_FIELD, self.age);
        out.insert(ADOPTED_FIELD, self.adopted);
        if let Some(image) = &self.image {
            out.insert(IMAGE_FIELD, image.as_str());
        }
        if let Some(owner) = &self.owner {
            out.insert(OWNER_FIELD, owner.as_str());
        }
        if let Some(location) = &self.location {
            out.insert(LOCATION_FIELD, location.to_document());
        }
        out.insert(CREATED_AT_FIELD, bson::DateTime::from_chrono(self.created_at));
        out.insert(UPDATED_AT_FIELD, bson::DateTime::from_chrono(self.updated_at));
        out
    }

    fn set_id(&mut self, id: DocId) {
        self.id = id;
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Request body for creating or updating an animal.
///
/// Accepts both the canonical field names and the legacy dataset shape
/// (`animal_name`, `birthdate`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnimalInput {
    pub name: Option<String>,
    pub animal_name: Option<String>,
    pub species: Option<String>,
    /// `YYYY-MM-DD`. Used to derive `age` when no explicit age is given.
    pub birthdate: Option<String>,
    pub age: Option<i32>,
    pub adopted: Option<bool>,
    pub image: Option<String>,
    pub owner: Option<String>,
    pub location: Option<GeoPoint>,
}

/// A validated animal ready to insert.
#[derive(Debug, Clone, Validate)]
pub struct NewAnimal {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: String,
    pub species: String,
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: i32,
    pub adopted: bool,
    pub image: Option<String>,
    pub owner: Option<String>,
    pub location: Option<GeoPoint>,
}

/// Validated partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Validate)]
pub struct AnimalChanges {
    #[validate(length(min = 2, max = 100, message = "name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    pub species: Option<String>,
    #[validate(range(min = 0, max = 120, message = "age must be between 0 and 120"))]
    pub age: Option<i32>,
    pub adopted: Option<bool>,
    pub image: Option<String>,
    pub owner: Option<String>,
    pub location: Option<GeoPoint>,
}

impl AnimalInput {
    fn resolved_name(&self) -> Option<String> {
        first_non_blank(&[self.name.as_deref(), self.animal_name.as_deref()])
    }

    /// Explicit age, else one derived from `birthdate` when possible.
    fn resolved_age(&self, now: Timestamp) -> Option<i32> {
        self.age.or_else(|| {
            self.birthdate
                .as_deref()
                .and_then(|raw| age_from_birthdate(raw, now))
        })
    }

    fn resolved_species(&self) -> Option<String> {
        non_blank(self.species.as_deref()).map(|s| Reference::parse(&s).as_string())
    }

    /// Resolve and validate a create request. The name is required.
    pub fn into_new(self, now: Timestamp) -> Result<NewAnimal, CoreError> {
        let name = self
            .resolved_name()
            .ok_or_else(|| CoreError::Validation("name is required".to_string()))?;
        let animal = NewAnimal {
            name,
            species: self.resolved_species().unwrap_or_default(),
            age: self.resolved_age(now).unwrap_or(0),
            adopted: self.adopted.unwrap_or(false),
            image: non_blank(self.image.as_deref()),
            owner: non_blank(self.owner.as_deref()),
            location: self.location.map(GeoPoint::with_default_kind),
        };
        validate(&animal)?;
        Ok(animal)
    }

    /// Resolve and validate an update request. Blank fields are ignored.
    pub fn into_changes(self, now: Timestamp) -> Result<AnimalChanges, CoreError> {
        let changes = AnimalChanges {
            name: self.resolved_name(),
            species: self.resolved_species(),
            age: self.resolved_age(now),
            adopted: self.adopted,
            image: non_blank(self.image.as_deref()),
            owner: non_blank(self.owner.as_deref()),
            location: self.location.map(GeoPoint::with_default_kind),
        };
        validate(&changes)?;
        Ok(changes)
    }
}

impl NewAnimal {
    /// Build the record to insert, stamped with `now` and no identifier yet.
    pub fn into_record(self, now: Timestamp) -> Animal {
        Animal {
            id: nil_id(),
            name: self.name,
            species: self.species,
            age: self.age,
            adopted: self.adopted,
            image: self.image,
            owner: self.owner,
            location: self.location,
            created_at: now,
            updated_at: now,
        }
    }
}

impl AnimalChanges {
    /// `$set` body for the supplied fields. `updatedAt` is added by the repository.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert(NAME_FIELD, name.as_str());
        }
        if let Some(species) = &self.species {
            set.insert(SPECIES_FIELD, species.as_str());
        }
        if let Some(age) = self.age {
            set.insert(normalize::AGE_FIELD, age);
        }
        if let Some(adopted) = self.adopted {
            set.insert(ADOPTED_FIELD, adopted);
        }
        if let Some(image) = &self.image {
            set.insert(IMAGE_FIELD, image.as_str());
        }
        if let Some(owner) = &self.owner {
            set.insert(OWNER_FIELD, owner.as_str());
        }
        if let Some(location) = &self.location {
            set.insert(LOCATION_FIELD, location.to_document());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use bson::oid::ObjectId;
    use chrono::TimeZone;

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 14, 8, 0, 0).unwrap()
    }

    fn ms(millis: i64) -> bson::DateTime {
        bson::DateTime::from_millis(millis)
    }

    // -- normalizer ----------------------------------------------------------

    #[test]
    fn legacy_dataset_document() {
        let id = ObjectId::new();
        let species = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let stored = doc! {
            "_id": id,
            "animal_name": "Biscuit",
            "species": species,
            "birthdate": "2000-06-15",
            "adopted": "yes",
            "owner": "Ana",
            "location": { "type": "Point", "coordinates": [2_i64, 48.85_f64] },
        };

        let animal = Animal::from_document_at(&stored, now());

        assert_eq!(animal.id, id);
        assert_eq!(animal.name, "Biscuit");
        assert_eq!(animal.species, "65a1b2c3d4e5f60718293a4b");
        assert_eq!(animal.age, 23);
        assert!(!animal.adopted);
        assert_eq!(animal.image, None);
        assert_eq!(animal.owner.as_deref(), Some("Ana"));
        assert_eq!(
            animal.location,
            Some(GeoPoint {
                kind: "Point".into(),
                coordinates: vec![2.0, 48.85],
            })
        );
        assert_eq!(animal.created_at, id.timestamp().to_chrono());
        assert_eq!(animal.updated_at, animal.created_at);
    }

    #[test]
    fn missing_location_stays_absent() {
        let animal = Animal::from_document_at(&doc! { "name": "Rex" }, now());
        assert_eq!(animal.location, None);

        let animal = Animal::from_document_at(&doc! { "name": "Rex", "location": "home" }, now());
        assert_eq!(animal.location, None);
    }

    #[test]
    fn empty_document_degrades_to_defaults() {
        let animal = Animal::from_document_at(&doc! {}, now());
        assert_eq!(animal.id, nil_id());
        assert_eq!(animal.name, "");
        assert_eq!(animal.species, "");
        assert_eq!(animal.age, 0);
        assert!(!animal.adopted);
        assert_eq!(animal.created_at.timestamp(), 0);
        assert_eq!(animal.updated_at, animal.created_at);
    }

    #[test]
    fn canonical_document_is_unchanged_by_normalization() {
        let canonical = doc! {
            "_id": ObjectId::new(),
            "name": "Rex",
            "species": "dog",
            "age": 4_i32,
            "adopted": true,
            "image": "https://img.example/rex.png",
            "owner": "Sam",
            "location": { "type": "Point", "coordinates": [-73.97_f64, 40.77_f64] },
            "createdAt": ms(1_700_000_000_000),
            "updatedAt": ms(1_700_000_500_000),
        };

        let animal = Animal::from_document_at(&canonical, now());

        assert_eq!(animal.to_document(), canonical);
        assert_eq!(Animal::from_document_at(&animal.to_document(), now()), animal);
    }

    #[test]
    fn serializes_camel_case_with_hex_id() {
        let id = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let animal = Animal::from_document_at(
            &doc! { "_id": id, "name": "Rex", "createdAt": ms(0) },
            now(),
        );
        let json = serde_json::to_value(&animal).unwrap();
        assert_eq!(json["id"], "65a1b2c3d4e5f60718293a4b");
        assert_eq!(json["createdAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["updatedAt"], "1970-01-01T00:00:00Z");
        assert!(json.get("image").is_none());
        assert!(json.get("location").is_none());
    }

    // -- create --------------------------------------------------------------

    #[test]
    fn create_accepts_alias_and_birthdate() {
        let input = AnimalInput {
            animal_name: Some("  Biscuit ".into()),
            birthdate: Some("2000-06-15".into()),
            ..Default::default()
        };
        let new = input.into_new(now()).unwrap();
        assert_eq!(new.name, "Biscuit");
        assert_eq!(new.age, 23);
        assert!(!new.adopted);
    }

    #[test]
    fn create_prefers_explicit_age() {
        let input = AnimalInput {
            name: Some("Rex".into()),
            age: Some(2),
            birthdate: Some("2000-06-15".into()),
            ..Default::default()
        };
        assert_eq!(input.into_new(now()).unwrap().age, 2);
    }

    #[test]
    fn create_with_bad_birthdate_defaults_age_to_zero() {
        let input = AnimalInput {
            name: Some("Rex".into()),
            birthdate: Some("soon".into()),
            ..Default::default()
        };
        assert_eq!(input.into_new(now()).unwrap().age, 0);
    }

    #[test]
    fn create_requires_name() {
        let input = AnimalInput {
            name: Some("   ".into()),
            ..Default::default()
        };
        assert_matches!(
            input.into_new(now()),
            Err(CoreError::Validation(msg)) if msg == "name is required"
        );
    }

    #[test]
    fn create_rejects_out_of_range_values() {
        let short = AnimalInput {
            name: Some("R".into()),
            ..Default::default()
        };
        assert_matches!(
            short.into_new(now()),
            Err(CoreError::Validation(msg)) if msg.contains("between 2 and 100")
        );

        let old = AnimalInput {
            name: Some("Rex".into()),
            age: Some(121),
            ..Default::default()
        };
        assert_matches!(
            old.into_new(now()),
            Err(CoreError::Validation(msg)) if msg.contains("between 0 and 120")
        );
    }

    #[test]
    fn create_defaults_location_type_and_canonicalizes_species_id() {
        let input = AnimalInput {
            name: Some("Rex".into()),
            species: Some("65A1B2C3D4E5F60718293A4B".into()),
            location: Some(GeoPoint {
                kind: String::new(),
                coordinates: vec![1.0, 2.0],
            }),
            ..Default::default()
        };
        let new = input.into_new(now()).unwrap();
        assert_eq!(new.species, "65a1b2c3d4e5f60718293a4b");
        assert_eq!(new.location.unwrap().kind, "Point");
    }

    #[test]
    fn new_record_round_trips_through_store_form() {
        let input = AnimalInput {
            name: Some("Rex".into()),
            species: Some("dog".into()),
            age: Some(3),
            ..Default::default()
        };
        let created = bson::DateTime::from_millis(1_718_352_000_000).to_chrono();
        let record = input.into_new(now()).unwrap().into_record(created);
        let stored = record.to_document();

        assert!(!stored.contains_key("_id"));
        assert_eq!(Animal::from_document_at(&stored, now()), record);
    }

    // -- update --------------------------------------------------------------

    #[test]
    fn update_sets_only_supplied_fields() {
        let input = AnimalInput {
            owner: Some("Kai".into()),
            adopted: Some(true),
            image: Some("".into()),
            ..Default::default()
        };
        let set = input.into_changes(now()).unwrap().to_set_document();
        assert_eq!(set, doc! { "adopted": true, "owner": "Kai" });
    }

    #[test]
    fn update_uses_alias_and_birthdate() {
        let input = AnimalInput {
            animal_name: Some("Fido".into()),
            birthdate: Some("2000-06-15".into()),
            ..Default::default()
        };
        let set = input.into_changes(now()).unwrap().to_set_document();
        assert_eq!(set, doc! { "name": "Fido", "age": 23 });
    }

    #[test]
    fn update_with_underivable_birthdate_leaves_age_alone() {
        let input = AnimalInput {
            birthdate: Some("nope".into()),
            ..Default::default()
        };
        assert!(input.into_changes(now()).unwrap().to_set_document().is_empty());
    }

    #[test]
    fn update_validates_supplied_fields() {
        let input = AnimalInput {
            age: Some(-1),
            ..Default::default()
        };
        assert_matches!(input.into_changes(now()), Err(CoreError::Validation(_)));
    }
}
