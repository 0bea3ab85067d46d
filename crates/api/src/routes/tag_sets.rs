//! Routes for tag sets, mounted at `/tag-sets`.
//!
//! ```text
//! GET    /              -> list_tag_sets
//! POST   /              -> create_tag_set
//! GET    /{id}          -> get_tag_set
//! GET    /{id}/tags     -> list_tags
//! POST   /{id}/tags     -> add_tags
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::tag_sets;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tag_sets::list_tag_sets).post(tag_sets::create_tag_set),
        )
        .route("/{id}", get(tag_sets::get_tag_set))
        .route("/{id}/tags", get(tag_sets::list_tags).post(tag_sets::add_tags))
}
