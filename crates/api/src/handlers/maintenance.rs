//! Handlers for `/maintenance` operations.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use menagerie_db::repositories::{BackfillReport, MaintenanceRepo};

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/maintenance/backfill-timestamps
///
/// Writes derived `createdAt`/`updatedAt` values into documents missing them.
/// Responds with per-collection `{ matched, modified }` counts.
pub async fn backfill_timestamps(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, BackfillReport>>> {
    let reports = MaintenanceRepo::backfill_timestamps(&state.db).await?;
    Ok(Json(reports))
}
