//! Handlers for PacBio wells.
//!
//! Well options are validated up front (position, instrument enums,
//! numeric ranges) so the caller gets every problem in one 422 instead
//! of a constraint error per attempt.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use benchline_core::factory::ErrorList;
use benchline_core::run_options::{normalize_ccs_analysis_output, GenerateHiFi};
use benchline_core::types::DbId;
use benchline_core::well::WellPosition;
use benchline_core::CoreError;
use benchline_db::models::pacbio_well::{CreatePacbioWell, UpdatePacbioWell};
use benchline_db::repositories::{PacbioLibraryRepo, PacbioWellRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing wells.
#[derive(Debug, Deserialize)]
pub struct WellListParams {
    pub plate_id: DbId,
}

/// GET /api/v1/pacbio/wells?plate_id={id}
pub async fn list_wells(
    State(state): State<AppState>,
    Query(params): Query<WellListParams>,
) -> AppResult<impl IntoResponse> {
    let wells = PacbioWellRepo::list_for_plate(&state.pool, params.plate_id).await?;

    Ok(Json(DataResponse { data: wells }))
}

/// GET /api/v1/pacbio/wells/{id}
pub async fn get_well(
    State(state): State<AppState>,
    Path(well_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let well = PacbioWellRepo::find_by_id(&state.pool, well_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }))?;

    Ok(Json(DataResponse { data: well }))
}

/// GET /api/v1/pacbio/wells/{id}/libraries
pub async fn list_well_libraries(
    State(state): State<AppState>,
    Path(well_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if PacbioWellRepo::find_by_id(&state.pool, well_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }));
    }

    let libraries = PacbioWellRepo::libraries_for_well(&state.pool, well_id).await?;

    Ok(Json(DataResponse { data: libraries }))
}

/// POST /api/v1/pacbio/wells
pub async fn create_well(
    State(state): State<AppState>,
    Json(input): Json<CreatePacbioWell>,
) -> AppResult<impl IntoResponse> {
    let mut errors = validate_well_options(
        &input.row,
        &input.column,
        Some(input.movie_time),
        Some(input.insert_size),
        Some(&input.generate_hifi),
    );
    for library_id in &input.library_ids {
        if PacbioLibraryRepo::find_by_id(&state.pool, *library_id)
            .await?
            .is_none()
        {
            errors.add("library", format!("{library_id} does not exist"));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let ccs = normalize_ccs_analysis_output(input.ccs_analysis_output.as_deref());
    let well = PacbioWellRepo::create(&state.pool, &input, &ccs).await?;

    tracing::info!(
        well_id = well.id,
        plate_id = well.pacbio_plate_id,
        position = %format!("{}{}", well.row, well.column),
        "PacBio well created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: well })))
}

/// PATCH /api/v1/pacbio/wells/{id}
pub async fn update_well(
    State(state): State<AppState>,
    Path(well_id): Path<DbId>,
    Json(input): Json<UpdatePacbioWell>,
) -> AppResult<impl IntoResponse> {
    let current = PacbioWellRepo::find_by_id(&state.pool, well_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }))?;

    let row = input.row.clone().unwrap_or(current.row);
    let column = input.column.clone().unwrap_or(current.column);
    let errors = validate_well_options(
        &row,
        &column,
        input.movie_time,
        input.insert_size,
        input.generate_hifi.as_deref(),
    );
    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let mut input = input;
    if let Some(ccs) = &input.ccs_analysis_output {
        input.ccs_analysis_output = Some(normalize_ccs_analysis_output(Some(ccs)));
    }

    let well = PacbioWellRepo::update(&state.pool, well_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }))?;

    tracing::info!(well_id, "PacBio well updated");

    Ok(Json(DataResponse { data: well }))
}

/// DELETE /api/v1/pacbio/wells/{id}
pub async fn delete_well(
    State(state): State<AppState>,
    Path(well_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PacbioWellRepo::delete(&state.pool, well_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }));
    }

    tracing::info!(well_id, "PacBio well deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Request body for linking libraries to a well.
#[derive(Debug, Deserialize)]
pub struct AddLibrariesRequest {
    pub library_ids: Vec<DbId>,
}

/// POST /api/v1/pacbio/wells/{id}/libraries
pub async fn add_well_libraries(
    State(state): State<AppState>,
    Path(well_id): Path<DbId>,
    Json(input): Json<AddLibrariesRequest>,
) -> AppResult<impl IntoResponse> {
    if input.library_ids.is_empty() {
        return Err(AppError::BadRequest("library_ids must not be empty".into()));
    }
    if PacbioWellRepo::find_by_id(&state.pool, well_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioWell",
            id: well_id,
        }));
    }

    PacbioWellRepo::add_libraries(&state.pool, well_id, &input.library_ids).await?;

    let libraries = PacbioWellRepo::libraries_for_well(&state.pool, well_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: libraries })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Movie time bounds in hours.
const MOVIE_TIME_RANGE: std::ops::RangeInclusive<f64> = 0.1..=30.0;

/// Minimum insert size in base pairs.
const MIN_INSERT_SIZE: i32 = 10;

/// Validate the option fields shared by create and update payloads.
fn validate_well_options(
    row: &str,
    column: &str,
    movie_time: Option<f64>,
    insert_size: Option<i32>,
    generate_hifi: Option<&str>,
) -> ErrorList {
    let mut errors = ErrorList::new();

    if WellPosition::parse(&format!("{row}{column}")).is_err() {
        errors.add("position", format!("{row}{column} is not a well position"));
    }
    if let Some(movie_time) = movie_time {
        if !MOVIE_TIME_RANGE.contains(&movie_time) {
            errors.add("movie_time", "must be between 0.1 and 30");
        }
    }
    if let Some(insert_size) = insert_size {
        if insert_size < MIN_INSERT_SIZE {
            errors.add("insert_size", format!("must be at least {MIN_INSERT_SIZE}"));
        }
    }
    if let Some(generate_hifi) = generate_hifi {
        if GenerateHiFi::parse(generate_hifi).is_none() {
            errors.add(
                "generate_hifi",
                format!("'{generate_hifi}' is not a recognised option"),
            );
        }
    }

    errors
}
