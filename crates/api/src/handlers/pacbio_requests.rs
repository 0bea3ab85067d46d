//! Handlers for PacBio sequencing requests.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::pacbio_request::CreatePacbioRequest;
use benchline_db::repositories::{PacbioRequestRepo, SampleRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pacbio/requests
pub async fn list_requests(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let requests = PacbioRequestRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/pacbio/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let request = PacbioRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioRequest",
            id: request_id,
        }))?;

    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/pacbio/requests
pub async fn create_request(
    State(state): State<AppState>,
    Json(input): Json<CreatePacbioRequest>,
) -> AppResult<impl IntoResponse> {
    if input.cost_code.trim().is_empty() {
        return Err(AppError::BadRequest("cost_code must not be empty".into()));
    }
    if SampleRepo::find_by_id(&state.pool, input.sample_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Sample",
            id: input.sample_id,
        }));
    }

    let request = PacbioRequestRepo::create(&state.pool, &input).await?;

    tracing::info!(request_id = request.id, "PacBio request created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: request })))
}

/// DELETE /api/v1/pacbio/requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    Path(request_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PacbioRequestRepo::delete(&state.pool, request_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioRequest",
            id: request_id,
        }));
    }

    tracing::info!(request_id, "PacBio request deleted");

    Ok(StatusCode::NO_CONTENT)
}
