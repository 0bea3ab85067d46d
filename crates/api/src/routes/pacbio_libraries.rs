//! Routes for PacBio libraries, mounted at `/pacbio/libraries`.
//!
//! ```text
//! GET    /                          -> list_libraries
//! POST   /                          -> create_libraries (factory)
//! GET    /{id}                      -> get_library
//! DELETE /{id}                      -> delete_library
//! GET    /{id}/request-libraries    -> list_request_libraries
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::pacbio_libraries;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(pacbio_libraries::list_libraries).post(pacbio_libraries::create_libraries),
        )
        .route(
            "/{id}",
            get(pacbio_libraries::get_library).delete(pacbio_libraries::delete_library),
        )
        .route(
            "/{id}/request-libraries",
            get(pacbio_libraries::list_request_libraries),
        )
}
