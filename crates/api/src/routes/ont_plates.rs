//! Routes for ONT plates, mounted at `/ont/plates`.
//!
//! ```text
//! GET    /              -> list_plates
//! POST   /              -> create_plate (factory)
//! GET    /{id}          -> get_plate
//! GET    /{id}/wells    -> list_plate_wells
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::ont_plates;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ont_plates::list_plates).post(ont_plates::create_plate))
        .route("/{id}", get(ont_plates::get_plate))
        .route("/{id}/wells", get(ont_plates::list_plate_wells))
}
