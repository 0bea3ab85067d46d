//! Handlers for PacBio libraries.
//!
//! Creation goes through the library factory: the whole payload is
//! cross-validated before anything is persisted, and a failure returns
//! every collected error as a 422.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use benchline_core::factory::pacbio::LibraryAttributes;
use benchline_core::types::DbId;
use benchline_core::CoreError;
use benchline_db::repositories::PacbioLibraryRepo;

use crate::error::{AppError, AppResult};
use crate::factories;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for library creation: one or many libraries.
#[derive(Debug, Deserialize)]
pub struct CreateLibrariesRequest {
    pub libraries: Vec<LibraryAttributes>,
}

/// GET /api/v1/pacbio/libraries
pub async fn list_libraries(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let libraries = PacbioLibraryRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: libraries }))
}

/// GET /api/v1/pacbio/libraries/{id}
pub async fn get_library(
    State(state): State<AppState>,
    Path(library_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let library = PacbioLibraryRepo::find_by_id(&state.pool, library_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PacbioLibrary",
            id: library_id,
        }))?;

    Ok(Json(DataResponse { data: library }))
}

/// GET /api/v1/pacbio/libraries/{id}/request-libraries
pub async fn list_request_libraries(
    State(state): State<AppState>,
    Path(library_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if PacbioLibraryRepo::find_by_id(&state.pool, library_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioLibrary",
            id: library_id,
        }));
    }

    let joins = PacbioLibraryRepo::request_libraries(&state.pool, library_id).await?;

    Ok(Json(DataResponse { data: joins }))
}

/// POST /api/v1/pacbio/libraries
pub async fn create_libraries(
    State(state): State<AppState>,
    Json(input): Json<CreateLibrariesRequest>,
) -> AppResult<impl IntoResponse> {
    let libraries = factories::pacbio::create_libraries(&state.pool, input.libraries).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: libraries })))
}

/// DELETE /api/v1/pacbio/libraries/{id}
pub async fn delete_library(
    State(state): State<AppState>,
    Path(library_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = PacbioLibraryRepo::delete(&state.pool, library_id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PacbioLibrary",
            id: library_id,
        }));
    }

    tracing::info!(library_id, "PacBio library deleted");

    Ok(StatusCode::NO_CONTENT)
}
