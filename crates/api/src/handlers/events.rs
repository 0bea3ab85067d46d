//! Handler for inspecting persisted domain events.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use benchline_db::repositories::EventRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/v1/events`.
#[derive(Debug, Deserialize)]
pub struct EventListParams {
    pub event_type: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/v1/events
///
/// List recently persisted events, newest first.
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> AppResult<impl IntoResponse> {
    let events =
        EventRepo::list_recent(&state.pool, params.event_type.as_deref(), params.limit).await?;

    Ok(Json(DataResponse { data: events }))
}
