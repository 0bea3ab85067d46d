//! Routes for ONT libraries, mounted at `/ont/libraries`.
//!
//! ```text
//! GET    /        -> list_libraries
//! POST   /        -> create_libraries (pooling factory)
//! GET    /{id}    -> get_library
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::ont_libraries;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ont_libraries::list_libraries).post(ont_libraries::create_libraries),
        )
        .route("/{id}", get(ont_libraries::get_library))
}
