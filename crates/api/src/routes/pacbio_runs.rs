//! Routes for PacBio runs, mounted at `/pacbio/runs`.
//!
//! ```text
//! GET    /                    -> list_runs
//! POST   /                    -> create_run
//! GET    /{id}                -> get_run
//! PATCH  /{id}                -> update_run
//! DELETE /{id}                -> delete_run
//! GET    /{id}/plate          -> get_plate
//! POST   /{id}/plate          -> create_plate
//! GET    /{id}/sample-sheet   -> sample_sheet (CSV download)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::pacbio_runs;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pacbio_runs::list_runs).post(pacbio_runs::create_run))
        .route(
            "/{id}",
            get(pacbio_runs::get_run)
                .patch(pacbio_runs::update_run)
                .delete(pacbio_runs::delete_run),
        )
        .route(
            "/{id}/plate",
            get(pacbio_runs::get_plate).post(pacbio_runs::create_plate),
        )
        .route("/{id}/sample-sheet", get(pacbio_runs::sample_sheet))
}
