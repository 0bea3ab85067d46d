//! Routes for PacBio requests, mounted at `/pacbio/requests`.
//!
//! ```text
//! GET    /        -> list_requests
//! POST   /        -> create_request
//! GET    /{id}    -> get_request
//! DELETE /{id}    -> delete_request
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::pacbio_requests;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pacbio_requests::list_requests).post(pacbio_requests::create_request),
        )
        .route(
            "/{id}",
            get(pacbio_requests::get_request).delete(pacbio_requests::delete_request),
        )
}
