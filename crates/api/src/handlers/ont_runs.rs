//! Handlers for ONT runs.
//!
//! Run creation and state changes publish warehouse messages describing
//! every flowcell on the run.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::run_options::RunState;
use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::ont_run::{CreateOntRun, UpdateOntRun};
use benchline_db::repositories::OntRunRepo;

use crate::error::{AppError, AppResult};
use crate::factories;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/ont/runs
pub async fn list_runs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let runs = OntRunRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: runs }))
}

/// GET /api/v1/ont/runs/{id}
pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let run = OntRunRepo::find_with_flowcells(&state.pool, run_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OntRun",
            id: run_id,
        }))?;

    Ok(Json(DataResponse { data: run }))
}

/// POST /api/v1/ont/runs
pub async fn create_run(
    State(state): State<AppState>,
    Json(input): Json<CreateOntRun>,
) -> AppResult<impl IntoResponse> {
    let run = factories::ont::create_run(&state, input.flowcells).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: run })))
}

/// PATCH /api/v1/ont/runs/{id}
pub async fn update_run(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
    Json(input): Json<UpdateOntRun>,
) -> AppResult<impl IntoResponse> {
    let Some(new_state) = input.state else {
        return Err(AppError::BadRequest("state must be provided".into()));
    };
    if RunState::parse(&new_state).is_none() {
        return Err(AppError::BadRequest(format!(
            "'{new_state}' is not a run state"
        )));
    }

    let run = OntRunRepo::update_state(&state.pool, run_id, &new_state)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OntRun",
            id: run_id,
        }))?;

    factories::ont::publish_run_event(&state, run.id, &format!("ont.run.{}", run.state)).await?;

    tracing::info!(run_id, state = %run.state, "ONT run updated");

    Ok(Json(DataResponse { data: run }))
}
