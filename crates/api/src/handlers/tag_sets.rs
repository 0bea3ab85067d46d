//! Handlers for tag sets and their tags.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::tag::{CreateTag, CreateTagSet};
use benchline_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tag-sets
pub async fn list_tag_sets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sets = TagRepo::list_sets(&state.pool).await?;

    Ok(Json(DataResponse { data: sets }))
}

/// GET /api/v1/tag-sets/{id}
pub async fn get_tag_set(
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let set = TagRepo::find_set_by_id(&state.pool, set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TagSet",
            id: set_id,
        }))?;

    Ok(Json(DataResponse { data: set }))
}

/// POST /api/v1/tag-sets
pub async fn create_tag_set(
    State(state): State<AppState>,
    Json(input): Json<CreateTagSet>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let set = TagRepo::create_set(&state.pool, &input).await?;

    tracing::info!(tag_set_id = set.id, name = %set.name, "Tag set created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// Request body for adding tags to a set.
#[derive(Debug, Deserialize)]
pub struct AddTagsRequest {
    pub tags: Vec<CreateTag>,
}

/// GET /api/v1/tag-sets/{id}/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 before listing so an unknown set is not an empty list.
    if TagRepo::find_set_by_id(&state.pool, set_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TagSet",
            id: set_id,
        }));
    }

    let tags = TagRepo::tags_for_set(&state.pool, set_id).await?;

    Ok(Json(DataResponse { data: tags }))
}

/// POST /api/v1/tag-sets/{id}/tags
pub async fn add_tags(
    State(state): State<AppState>,
    Path(set_id): Path<DbId>,
    Json(input): Json<AddTagsRequest>,
) -> AppResult<impl IntoResponse> {
    if input.tags.is_empty() {
        return Err(AppError::BadRequest("tags must not be empty".into()));
    }
    if TagRepo::find_set_by_id(&state.pool, set_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TagSet",
            id: set_id,
        }));
    }

    let tags = TagRepo::add_tags(&state.pool, set_id, &input.tags).await?;

    tracing::info!(tag_set_id = set_id, count = tags.len(), "Tags added to set");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tags })))
}
