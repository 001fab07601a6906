//! Canonical records and request DTOs.
//!
//! Each resource submodule contains:
//! - A `Serialize` record struct, the canonical shape of a stored document
//! - Its normalizer (`Record::from_document`) for tolerant reads
//! - A `Deserialize` input body plus the validated create/update forms

pub mod animal;
pub mod category;
pub mod geo;
pub mod species;

use bson::Document;
use menagerie_core::resource::ResourceKind;
use menagerie_core::types::DocId;

/// A resource that can be read from and written to its collection.
pub trait Record: Sized + Send + Sync + Unpin {
    const KIND: ResourceKind;

    /// Normalize a stored document. Never fails; see `menagerie_core::normalize`.
    fn from_document(doc: &Document) -> Self;

    /// Canonical stored form. `_id` is omitted while the record has none.
    fn to_document(&self) -> Document;

    fn set_id(&mut self, id: DocId);
}
