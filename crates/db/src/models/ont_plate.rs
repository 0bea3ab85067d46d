//! ONT plate, well, and request models.

use serde::Serialize;
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `ont_plates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntPlate {
    pub id: DbId,
    pub barcode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `ont_wells` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntWell {
    pub id: DbId,
    pub ont_plate_id: DbId,
    pub position: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `ont_requests` table: sample material in a well.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntRequest {
    pub id: DbId,
    pub ont_well_id: DbId,
    pub name: String,
    pub external_id: String,
    pub tag_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A well row with its requests, for nested plate responses.
#[derive(Debug, Clone, Serialize)]
pub struct OntWellWithRequests {
    #[serde(flatten)]
    pub well: OntWell,
    pub requests: Vec<OntRequest>,
}
