//! PacBio run and plate models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `pacbio_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioRun {
    pub id: DbId,
    pub name: String,
    pub state: String,
    pub system_name: String,
    pub binding_kit_box_barcode: String,
    pub sequencing_kit_box_barcode: String,
    pub dna_control_complex_box_barcode: String,
    pub comments: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `pacbio_plates` table. One plate per run.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioPlate {
    pub id: DbId,
    pub pacbio_run_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new run.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePacbioRun {
    pub name: String,
    pub system_name: String,
    pub binding_kit_box_barcode: String,
    pub sequencing_kit_box_barcode: String,
    pub dna_control_complex_box_barcode: String,
    pub comments: Option<String>,
}

/// DTO for updating an existing run. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePacbioRun {
    pub name: Option<String>,
    pub state: Option<String>,
    pub system_name: Option<String>,
    pub binding_kit_box_barcode: Option<String>,
    pub sequencing_kit_box_barcode: Option<String>,
    pub dna_control_complex_box_barcode: Option<String>,
    pub comments: Option<String>,
}
