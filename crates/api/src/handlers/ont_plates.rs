//! Handlers for ONT plates.
//!
//! Plate creation goes through the plate factory: the nested payload
//! (plate → wells → samples) is validated as a whole and persisted in
//! one transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::factory::ont::PlateAttributes;
use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::repositories::OntPlateRepo;

use crate::error::{AppError, AppResult};
use crate::factories;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/ont/plates
pub async fn list_plates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let plates = OntPlateRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: plates }))
}

/// GET /api/v1/ont/plates/{id}
pub async fn get_plate(
    State(state): State<AppState>,
    Path(plate_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let plate = OntPlateRepo::find_by_id(&state.pool, plate_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OntPlate",
            id: plate_id,
        }))?;

    Ok(Json(DataResponse { data: plate }))
}

/// GET /api/v1/ont/plates/{id}/wells
pub async fn list_plate_wells(
    State(state): State<AppState>,
    Path(plate_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if OntPlateRepo::find_by_id(&state.pool, plate_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "OntPlate",
            id: plate_id,
        }));
    }

    let wells = OntPlateRepo::wells_with_requests(&state.pool, plate_id).await?;

    Ok(Json(DataResponse { data: wells }))
}

/// POST /api/v1/ont/plates
pub async fn create_plate(
    State(state): State<AppState>,
    Json(input): Json<PlateAttributes>,
) -> AppResult<impl IntoResponse> {
    let plate =
        factories::ont::create_plate(&state.pool, &state.config.ont_tag_set_name, input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: plate })))
}
