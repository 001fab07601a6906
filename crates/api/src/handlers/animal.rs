//! Handlers for the `/animals` resource.
//!
//! Request bodies may use the legacy `animal_name` and `birthdate` fields;
//! ages derived from a birthdate are computed at request time.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use menagerie_core::error::CoreError;
use menagerie_core::query::{build_list_query, ListParams};
use menagerie_core::resource::ResourceKind;
use menagerie_core::types::parse_id;
use menagerie_db::models::animal::{Animal, AnimalInput};
use menagerie_db::repositories::AnimalRepo;

use crate::error::{AppError, AppResult};
use crate::response::Page;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ResourceKind::Animal.entity(),
        id: id.to_string(),
    })
}

/// POST /api/v1/animals
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AnimalInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Animal>)> {
    let Json(input) = payload?;
    let new = input.into_new(chrono::Utc::now())?;
    let animal = AnimalRepo::create(&state.db, new).await?;
    tracing::info!(id = %animal.id, "Animal created");
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /api/v1/animals
///
/// Bad or repeated parameters never fail the request; the first value wins.
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<Animal>>> {
    let query = build_list_query(ResourceKind::Animal, &ListParams::from_pairs(pairs));
    let (items, total) = AnimalRepo::list(&state.db, &query).await?;
    Ok(Json(Page::new(items, query.pagination, total)))
}

/// GET /api/v1/animals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Animal>> {
    let doc_id = parse_id(&id)?;
    let animal = AnimalRepo::find_by_id(&state.db, doc_id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(animal))
}

/// PUT /api/v1/animals/{id}
///
/// Partial update: only supplied, non-blank fields are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AnimalInput>, JsonRejection>,
) -> AppResult<Json<Animal>> {
    let doc_id = parse_id(&id)?;
    let Json(input) = payload?;
    let changes = input.into_changes(chrono::Utc::now())?;
    let animal = AnimalRepo::update(&state.db, doc_id, &changes)
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(%id, "Animal updated");
    Ok(Json(animal))
}

/// DELETE /api/v1/animals/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let doc_id = parse_id(&id)?;
    if AnimalRepo::delete(&state.db, doc_id).await? {
        tracing::info!(%id, "Animal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
