//! Routes for persisted events, mounted at `/events`.
//!
//! ```text
//! GET /    -> list_events
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(events::list_events))
}
