//! ONT library model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `ont_libraries` table.
///
/// A library pools the tagged requests of one plate; its name is
/// `<plate_barcode>-<pool>` and must be unique across all libraries.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntLibrary {
    pub id: DbId,
    pub name: String,
    pub pool: i32,
    pub pool_size: i32,
    pub ont_plate_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for pooling a plate into libraries.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOntLibraries {
    pub plate_barcode: String,
    /// Number of pools to split the plate into. Defaults to 1.
    pub pool_count: Option<u32>,
}
