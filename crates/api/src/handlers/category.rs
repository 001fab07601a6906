//! Handlers for the `/categories` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use menagerie_core::error::CoreError;
use menagerie_core::query::{build_list_query, ListParams};
use menagerie_core::resource::ResourceKind;
use menagerie_core::types::parse_id;
use menagerie_db::models::category::{Category, CategoryInput};
use menagerie_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::Page;
use crate::state::AppState;

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ResourceKind::Category.entity(),
        id: id.to_string(),
    })
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let Json(input) = payload?;
    let new = input.into_new()?;
    let category = CategoryRepo::create(&state.db, new).await?;
    tracing::info!(id = %category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/v1/categories
pub async fn list(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<Page<Category>>> {
    let query = build_list_query(ResourceKind::Category, &ListParams::from_pairs(pairs));
    let (items, total) = CategoryRepo::list(&state.db, &query).await?;
    Ok(Json(Page::new(items, query.pagination, total)))
}

/// GET /api/v1/categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let doc_id = parse_id(&id)?;
    let category = CategoryRepo::find_by_id(&state.db, doc_id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(category))
}

/// PUT /api/v1/categories/{id}
///
/// Partial update: only supplied, non-blank fields are changed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> AppResult<Json<Category>> {
    let doc_id = parse_id(&id)?;
    let Json(input) = payload?;
    let changes = input.into_changes()?;
    let category = CategoryRepo::update(&state.db, doc_id, &changes)
        .await?
        .ok_or_else(|| not_found(&id))?;
    tracing::info!(%id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let doc_id = parse_id(&id)?;
    if CategoryRepo::delete(&state.db, doc_id).await? {
        tracing::info!(%id, "Category deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}
