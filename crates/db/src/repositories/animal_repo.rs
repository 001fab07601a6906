//! Repository for the `animals` collection.

use menagerie_core::query::ListQuery;
use menagerie_core::types::DocId;

use crate::models::animal::{Animal, AnimalChanges, NewAnimal};
use crate::repositories::document;
use crate::Db;

/// Provides CRUD operations for animals.
///
/// Filters and sorts come prebuilt from `menagerie_core::query`.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Insert a new animal, stamping both timestamps with the current time.
    pub async fn create(db: &Db, input: NewAnimal) -> Result<Animal, mongodb::error::Error> {
        document::insert(db, input.into_record(document::store_now())).await
    }

    pub async fn find_by_id(db: &Db, id: DocId) -> Result<Option<Animal>, mongodb::error::Error> {
        document::find_by_id(db, id).await
    }

    /// Fetch one page of animals plus the total matching `query`'s filter.
    pub async fn list(
        db: &Db,
        query: &ListQuery,
    ) -> Result<(Vec<Animal>, u64), mongodb::error::Error> {
        let items = document::list(db, query).await?;
        let total = document::count::<Animal>(db, &query.filter).await?;
        Ok((items, total))
    }

    /// Update an animal. Only supplied fields in `changes` are applied.
    ///
    /// Returns `None` if no animal with the given `id` exists.
    pub async fn update(
        db: &Db,
        id: DocId,
        changes: &AnimalChanges,
    ) -> Result<Option<Animal>, mongodb::error::Error> {
        document::update(db, id, changes.to_set_document()).await
    }

    /// Permanently delete an animal. Returns `true` if a document was removed.
    pub async fn delete(db: &Db, id: DocId) -> Result<bool, mongodb::error::Error> {
        document::delete::<Animal>(db, id).await
    }
}
