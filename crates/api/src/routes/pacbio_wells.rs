//! Routes for PacBio wells, mounted at `/pacbio/wells`.
//!
//! ```text
//! GET    /?plate_id={id}   -> list_wells
//! POST   /                 -> create_well
//! GET    /{id}             -> get_well
//! PATCH  /{id}             -> update_well
//! DELETE /{id}             -> delete_well
//! GET    /{id}/libraries   -> list_well_libraries
//! POST   /{id}/libraries   -> add_well_libraries
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::pacbio_wells;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pacbio_wells::list_wells).post(pacbio_wells::create_well))
        .route(
            "/{id}",
            get(pacbio_wells::get_well)
                .patch(pacbio_wells::update_well)
                .delete(pacbio_wells::delete_well),
        )
        .route(
            "/{id}/libraries",
            get(pacbio_wells::list_well_libraries).post(pacbio_wells::add_well_libraries),
        )
}
