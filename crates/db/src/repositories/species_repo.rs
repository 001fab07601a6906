//! Repository for the `species` collection.

use menagerie_core::query::ListQuery;
use menagerie_core::types::DocId;

use crate::models::species::{NewSpecies, Species, SpeciesChanges};
use crate::repositories::document;
use crate::Db;

/// Provides CRUD operations for species.
pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a new species, stamping both timestamps with the current time.
    pub async fn create(db: &Db, input: NewSpecies) -> Result<Species, mongodb::error::Error> {
        document::insert(db, input.into_record(document::store_now())).await
    }

    /// Find a species by identifier. The `category` reference is not resolved.
    pub async fn find_by_id(db: &Db, id: DocId) -> Result<Option<Species>, mongodb::error::Error> {
        document::find_by_id(db, id).await
    }

    /// Fetch one page of species plus the total matching `query`'s filter.
    pub async fn list(
        db: &Db,
        query: &ListQuery,
    ) -> Result<(Vec<Species>, u64), mongodb::error::Error> {
        let items = document::list(db, query).await?;
        let total = document::count::<Species>(db, &query.filter).await?;
        Ok((items, total))
    }

    /// Update a species. Only supplied fields in `changes` are applied.
    ///
    /// Returns `None` if no species with the given `id` exists.
    pub async fn update(
        db: &Db,
        id: DocId,
        changes: &SpeciesChanges,
    ) -> Result<Option<Species>, mongodb::error::Error> {
        document::update(db, id, changes.to_set_document()).await
    }

    /// Permanently delete a species. Returns `true` if a document was removed.
    pub async fn delete(db: &Db, id: DocId) -> Result<bool, mongodb::error::Error> {
        document::delete::<Species>(db, id).await
    }
}
