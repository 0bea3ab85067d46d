//! Handlers for PacBio runs, their plates, and the sample sheet
//! download.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::sample_sheet::generate_sample_sheet;
use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::pacbio_run::{CreatePacbioRun, UpdatePacbioRun};
use benchline_db::repositories::PacbioRunRepo;
use benchline_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/pacbio/runs
pub async fn list_runs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let runs = PacbioRunRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: runs }))
}

/// GET /api/v1/pacbio/runs/{id}
pub async fn get_run(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let run = PacbioRunRepo::find_by_id(&state.pool, run_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioRun",
            id: run_id,
        }))?;

    Ok(Json(DataResponse { data: run }))
}

/// POST /api/v1/pacbio/runs
pub async fn create_run(
    State(state): State<AppState>,
    Json(input): Json<CreatePacbioRun>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }

    let run = PacbioRunRepo::create(&state.pool, &input).await?;

    state.event_bus.publish(
        PlatformEvent::new("pacbio.run.created")
            .with_source("pacbio_run", run.id)
            .with_payload(serde_json::json!({
                "name": run.name,
                "state": run.state,
                "system_name": run.system_name,
            })),
    );

    tracing::info!(run_id = run.id, name = %run.name, "PacBio run created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: run })))
}

/// PATCH /api/v1/pacbio/runs/{id}
pub async fn update_run(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
    Json(input): Json<UpdatePacbioRun>,
) -> AppResult<impl IntoResponse> {
    if let Some(new_state) = &input.state {
        if benchline_core::run_options::RunState::parse(new_state).is_none() {
            return Err(AppError::BadRequest(format!(
                "'{new_state}' is not a run state"
            )));
        }
    }

    let state_changed = input.state.is_some();
    let run = PacbioRunRepo::update(&state.pool, run_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioRun",
            id: run_id,
        }))?;

    if state_changed {
        state.event_bus.publish(
            PlatformEvent::new(format!("pacbio.run.{}", run.state))
                .with_source("pacbio_run", run.id)
                .with_payload(serde_json::json!({
                    "name": run.name,
                    "state": run.state,
                })),
        );
    }

    tracing::info!(run_id, state = %run.state, "PacBio run updated");

    Ok(Json(DataResponse { data: run }))
}

/// DELETE /api/v1/pacbio/runs/{id}
pub async fn delete_run(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PacbioRunRepo::delete(&state.pool, run_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioRun",
            id: run_id,
        }));
    }

    tracing::info!(run_id, "PacBio run deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/pacbio/runs/{id}/plate
///
/// Create the run's plate. A second plate on the same run is a 409.
pub async fn create_plate(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if PacbioRunRepo::find_by_id(&state.pool, run_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioRun",
            id: run_id,
        }));
    }

    let plate = PacbioRunRepo::create_plate(&state.pool, run_id).await?;

    tracing::info!(run_id, plate_id = plate.id, "PacBio plate created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: plate })))
}

/// GET /api/v1/pacbio/runs/{id}/plate
pub async fn get_plate(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let plate = PacbioRunRepo::plate_for_run(&state.pool, run_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioPlate",
            id: run_id,
        }))?;

    Ok(Json(DataResponse { data: plate }))
}

/// GET /api/v1/pacbio/runs/{id}/sample-sheet
///
/// Project the run's entity graph into the instrument CSV and return it
/// as a downloadable attachment named after the run.
pub async fn sample_sheet(
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = PacbioRunRepo::load_sheet_run(&state.pool, run_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioRun",
            id: run_id,
        }))?;

    let filename = format!("{}.csv", sheet.name);
    let csv = generate_sample_sheet(&sheet);

    tracing::info!(run_id, %filename, "Sample sheet generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}
