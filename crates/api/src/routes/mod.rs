pub mod animal;
pub mod category;
pub mod health;
pub mod maintenance;
pub mod species;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /animals                                  list, create
/// /animals/{id}                             get, update, delete
///
/// /categories                               list, create
/// /categories/{id}                          get, update, delete
///
/// /species                                  list, create
/// /species/{id}                             get, update, delete
///
/// /maintenance/backfill-timestamps          persist derived timestamps (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/animals", animal::router())
        .nest("/categories", category::router())
        .nest("/species", species::router())
        .nest("/maintenance", maintenance::router())
}
