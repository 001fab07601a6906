//! Store operations shared by every [`Record`] kind.

use bson::{doc, Document};
use futures::TryStreamExt;
use menagerie_core::query::ListQuery;
use menagerie_core::resource::{ID_FIELD, UPDATED_AT_FIELD};
use menagerie_core::types::{DocId, Timestamp};
use mongodb::options::ReturnDocument;

use crate::models::Record;
use crate::{collection, Db};

/// Current time at the store's millisecond precision, so that a record
/// returned from a write equals the one read back later.
pub fn store_now() -> Timestamp {
    bson::DateTime::now().to_chrono()
}

/// Insert `record`, returning it with the store-assigned identifier.
pub async fn insert<R: Record>(db: &Db, mut record: R) -> Result<R, mongodb::error::Error> {
    let result = collection(db, R::KIND)
        .insert_one(record.to_document())
        .await?;
    if let Some(id) = result.inserted_id.as_object_id() {
        record.set_id(id);
    }
    Ok(record)
}

pub async fn find_by_id<R: Record>(db: &Db, id: DocId) -> Result<Option<R>, mongodb::error::Error> {
    let found = collection(db, R::KIND)
        .find_one(doc! { ID_FIELD: id })
        .await?;
    Ok(found.as_ref().map(R::from_document))
}

/// One page of documents matching `query`, in its sort order.
pub async fn list<R: Record>(db: &Db, query: &ListQuery) -> Result<Vec<R>, mongodb::error::Error> {
    let docs: Vec<Document> = collection(db, R::KIND)
        .find(query.filter.clone())
        .sort(query.sort_document())
        .skip(query.skip())
        .limit(query.limit())
        .await?
        .try_collect()
        .await?;
    Ok(docs.iter().map(R::from_document).collect())
}

/// Number of documents matching `filter`, ignoring pagination.
pub async fn count<R: Record>(db: &Db, filter: &Document) -> Result<u64, mongodb::error::Error> {
    collection(db, R::KIND)
        .count_documents(filter.clone())
        .await
}

/// Apply `set` to the document with `id` and refresh `updatedAt`.
///
/// Returns the normalized document after the update, or `None` if no
/// document has that identifier.
pub async fn update<R: Record>(
    db: &Db,
    id: DocId,
    mut set: Document,
) -> Result<Option<R>, mongodb::error::Error> {
    set.insert(UPDATED_AT_FIELD, bson::DateTime::from_chrono(store_now()));
    let updated = collection(db, R::KIND)
        .find_one_and_update(doc! { ID_FIELD: id }, doc! { "$set": set })
        .return_document(ReturnDocument::After)
        .await?;
    Ok(updated.as_ref().map(R::from_document))
}

/// Delete the document with `id`. Returns `true` if one was removed.
pub async fn delete<R: Record>(db: &Db, id: DocId) -> Result<bool, mongodb::error::Error> {
    let result = collection(db, R::KIND)
        .delete_one(doc! { ID_FIELD: id })
        .await?;
    Ok(result.deleted_count > 0)
}
