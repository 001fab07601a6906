//! Repository for the `categories` collection.

use menagerie_core::query::ListQuery;
use menagerie_core::types::DocId;

use crate::models::category::{Category, CategoryChanges, NewCategory};
use crate::repositories::document;
use crate::Db;

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, stamping both timestamps with the current time.
    pub async fn create(db: &Db, input: NewCategory) -> Result<Category, mongodb::error::Error> {
        document::insert(db, input.into_record(document::store_now())).await
    }

    pub async fn find_by_id(db: &Db, id: DocId) -> Result<Option<Category>, mongodb::error::Error> {
        document::find_by_id(db, id).await
    }

    /// Fetch one page of categories plus the total matching `query`'s filter.
    pub async fn list(
        db: &Db,
        query: &ListQuery,
    ) -> Result<(Vec<Category>, u64), mongodb::error::Error> {
        let items = document::list(db, query).await?;
        let total = document::count::<Category>(db, &query.filter).await?;
        Ok((items, total))
    }

    /// Update a category. Only supplied fields in `changes` are applied.
    ///
    /// Returns `None` if no category with the given `id` exists.
    pub async fn update(
        db: &Db,
        id: DocId,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, mongodb::error::Error> {
        document::update(db, id, changes.to_set_document()).await
    }

    /// Permanently delete a category. Returns `true` if a document was removed.
    pub async fn delete(db: &Db, id: DocId) -> Result<bool, mongodb::error::Error> {
        document::delete::<Category>(db, id).await
    }
}
