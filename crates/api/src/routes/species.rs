//! Route definitions for the `/species` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::species;
use crate::state::AppState;

/// Routes mounted at `/species`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(species::list).post(species::create))
        .route(
            "/{id}",
            get(species::get_by_id)
                .put(species::update)
                .delete(species::delete),
        )
}
