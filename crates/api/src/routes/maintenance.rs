//! Route definitions for `/maintenance`.

use axum::routing::post;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// POST   /backfill-timestamps   -> backfill_timestamps
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/backfill-timestamps",
        post(maintenance::backfill_timestamps),
    )
}
