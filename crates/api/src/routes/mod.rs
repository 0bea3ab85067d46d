//! Route definitions, one module per resource.

pub mod events;
pub mod health;
pub mod ont_libraries;
pub mod ont_plates;
pub mod ont_runs;
pub mod pacbio_libraries;
pub mod pacbio_requests;
pub mod pacbio_runs;
pub mod pacbio_wells;
pub mod samples;
pub mod tag_sets;

use axum::Router;

use crate::state::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/samples", samples::router())
        .nest("/tag-sets", tag_sets::router())
        .nest("/pacbio/requests", pacbio_requests::router())
        .nest("/pacbio/libraries", pacbio_libraries::router())
        .nest("/pacbio/runs", pacbio_runs::router())
        .nest("/pacbio/wells", pacbio_wells::router())
        .nest("/ont/plates", ont_plates::router())
        .nest("/ont/libraries", ont_libraries::router())
        .nest("/ont/runs", ont_runs::router())
        .nest("/events", events::router())
}
