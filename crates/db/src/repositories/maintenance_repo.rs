//! One-off data repairs across every resource collection.

use std::collections::BTreeMap;

use bson::{doc, Document};
use menagerie_core::resource::{ResourceKind, CREATED_AT_FIELD, UPDATED_AT_FIELD};
use serde::Serialize;

use crate::{collection, Db};

/// Outcome of a backfill on one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackfillReport {
    pub matched: u64,
    pub modified: u64,
}

pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Persist the timestamps the normalizer would otherwise derive on read.
    ///
    /// `createdAt` is set from the identifier's embedded time where missing,
    /// then `updatedAt` from `createdAt`. Collections are processed in
    /// order and the first store error aborts the rest.
    pub async fn backfill_timestamps(
        db: &Db,
    ) -> Result<BTreeMap<String, BackfillReport>, mongodb::error::Error> {
        let mut reports = BTreeMap::new();
        for kind in ResourceKind::ALL {
            let result = collection(db, kind)
                .update_many(missing_timestamps_filter(), backfill_pipeline())
                .await?;
            let report = BackfillReport {
                matched: result.matched_count,
                modified: result.modified_count,
            };
            tracing::info!(
                collection = kind.collection(),
                matched = report.matched,
                modified = report.modified,
                "Backfilled timestamps"
            );
            reports.insert(kind.collection().to_string(), report);
        }
        Ok(reports)
    }
}

/// Documents where either timestamp is missing or null.
fn missing_timestamps_filter() -> Document {
    doc! {
        "$or": [
            { CREATED_AT_FIELD: null },
            { UPDATED_AT_FIELD: null },
        ]
    }
}

fn backfill_pipeline() -> Vec<Document> {
    vec![
        doc! { "$set": { CREATED_AT_FIELD: { "$ifNull": ["$createdAt", { "$toDate": "$_id" }] } } },
        doc! { "$set": { UPDATED_AT_FIELD: { "$ifNull": ["$updatedAt", "$createdAt"] } } },
    ]
}
