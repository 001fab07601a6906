//! Handlers for the `/species` resource.
//!
//! `category` is a weak reference: it is stored as given and never checked
//! against the categories collection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use menagerie_core::error::CoreError;
use menagerie_core::query::{build_list_query, ListParams};
use menagerie_core::resource::ResourceKind;
use menagerie_core::types::parse_id;
use menagerie_db::models::species::{Species, SpeciesInput};
use menagerie_db::repositories::SpeciesRepo;

use crate::error::{AppError, AppResult};
use crate::response::Page;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ResourceKind::Species.entity(),
        id: id.to_string(),
    })
}

/// POST /api/v1/species
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<SpeciesInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Species>)> {
    let Json(input) = payload?;
    let new = input.into_new()?;
    let species = SpeciesRepo::create(&state.db, new).await?;
    tracing::info!(id = %species.id, "Species created");
    Ok((StatusCode::CREATED, Json(species)))
}

/// GET /api/v1/species
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<Species>>> {
    let query = build_list_query(ResourceKind::Species, &ListParams::from_pairs(pairs));
    let (items, total) = SpeciesRepo::list(&state.db, &query).await?;
    Ok(Json(Page::new(items, query.pagination, total)))
}

/// GET /api/v1/species/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Species>> {
    let doc_id = parse_id(&id)?;
    let species = SpeciesRepo::find_by_id(&state.db, doc_id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(species))
}

/// PUT /api/v1/species/{id}
///
/// Partial update: only supplied, non-blank fields are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SpeciesInput>, JsonRejection>,
) -> AppResult<Json<Species>> {
    let doc_id = parse_id(&id)?;
    let Json(input) = payload?;
    let changes = input.into_changes()?;
    let species = SpeciesRepo::update(&state.db, doc_id, &changes)
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(%id, "Species updated");
    Ok(Json(species))
}

/// DELETE /api/v1/species/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let doc_id = parse_id(&id)?;
    if SpeciesRepo::delete(&state.db, doc_id).await? {
        tracing::info!(%id, "Species deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
