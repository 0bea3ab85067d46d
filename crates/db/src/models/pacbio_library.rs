//! PacBio library and request-library models.
//!
//! A library is prepared material in a tube; it pools one or more
//! requests through the `pacbio_request_libraries` join, each join row
//! optionally tagged for demultiplexing.

use serde::Serialize;
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `pacbio_libraries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioLibrary {
    pub id: DbId,
    pub volume: f64,
    pub concentration: f64,
    pub template_prep_kit_box_barcode: String,
    pub fragment_size: i32,
    pub tube_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `pacbio_request_libraries` join table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioRequestLibrary {
    pub id: DbId,
    pub pacbio_request_id: DbId,
    pub pacbio_library_id: DbId,
    pub tag_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A library row joined with its tube barcode, for list endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioLibraryWithTube {
    pub id: DbId,
    pub volume: f64,
    pub concentration: f64,
    pub template_prep_kit_box_barcode: String,
    pub fragment_size: i32,
    pub tube_id: DbId,
    pub tube_barcode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
