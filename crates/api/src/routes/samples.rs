//! Routes for samples, mounted at `/samples`.
//!
//! ```text
//! GET    /        -> list_samples
//! POST   /        -> create_sample
//! GET    /{id}    -> get_sample
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::samples;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(samples::list_samples).post(samples::create_sample))
        .route("/{id}", get(samples::get_sample))
}
