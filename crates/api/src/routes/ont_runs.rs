//! Routes for ONT runs, mounted at `/ont/runs`.
//!
//! ```text
//! GET    /        -> list_runs
//! POST   /        -> create_run
//! GET    /{id}    -> get_run
//! PATCH  /{id}    -> update_run
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::ont_runs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ont_runs::list_runs).post(ont_runs::create_run))
        .route("/{id}", get(ont_runs::get_run).patch(ont_runs::update_run))
}
