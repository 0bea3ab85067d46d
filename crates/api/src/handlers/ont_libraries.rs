//! Handlers for pooled ONT libraries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::models::ont_library::CreateOntLibraries;
use benchline_db::repositories::OntLibraryRepo;

use crate::error::{AppError, AppResult};
use crate::factories;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/ont/libraries
pub async fn list_libraries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let libraries = OntLibraryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: libraries }))
}

/// GET /api/v1/ont/libraries/{id}
pub async fn get_library(
    State(state): State<AppState>,
    Path(library_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let library = OntLibraryRepo::find_by_id(&state.pool, library_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "OntLibrary",
            id: library_id,
        }))?;

    Ok(Json(DataResponse { data: library }))
}

/// POST /api/v1/ont/libraries
///
/// Pool a plate's tagged requests into numbered libraries.
pub async fn create_libraries(
    State(state): State<AppState>,
    Json(input): Json<CreateOntLibraries>,
) -> AppResult<impl IntoResponse> {
    let libraries = factories::ont::create_libraries(&state.pool, &input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: libraries })))
}
