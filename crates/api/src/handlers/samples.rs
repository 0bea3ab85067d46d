//! Handlers for samples.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::sample::CreateSample;
use benchline_db::repositories::SampleRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/samples
pub async fn list_samples(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let samples = SampleRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: samples }))
}

/// GET /api/v1/samples/{id}
pub async fn get_sample(
    State(state): State<AppState>,
    Path(sample_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sample = SampleRepo::find_by_id(&state.pool, sample_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sample",
            id: sample_id,
        }))?;

    Ok(Json(DataResponse { data: sample }))
}

/// POST /api/v1/samples
pub async fn create_sample(
    State(state): State<AppState>,
    Json(input): Json<CreateSample>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let sample = SampleRepo::create(&state.pool, &input).await?;

    tracing::info!(sample_id = sample.id, "Sample created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: sample })))
}
