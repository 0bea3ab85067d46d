//! ONT run and flowcell models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `ont_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntRun {
    pub id: DbId,
    pub state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `ont_flowcells` table.
///
/// A GridION run carries up to five flowcells; `position` is the
/// 1-based slot on the instrument.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OntFlowcell {
    pub id: DbId,
    pub ont_run_id: DbId,
    pub position: i32,
    pub ont_library_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a run with its flowcells.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOntRun {
    #[serde(default)]
    pub flowcells: Vec<CreateOntFlowcell>,
}

/// One flowcell entry in a run payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOntFlowcell {
    pub position: i32,
    pub ont_library_id: DbId,
}

/// DTO for updating a run's state.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOntRun {
    pub state: Option<String>,
}

/// A run row with its flowcells, for detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct OntRunWithFlowcells {
    #[serde(flatten)]
    pub run: OntRun,
    pub flowcells: Vec<OntFlowcell>,
}

/// Flat join row used to build warehouse flowcell messages:
/// one row per sample request reachable from a flowcell's library.
#[derive(Debug, Clone, FromRow)]
pub struct FlowcellMessageRow {
    pub flowcell_id: DbId,
    pub position: i32,
    pub run_id: DbId,
    pub library_name: String,
    pub sample_name: String,
    pub sample_external_id: String,
    pub tag_group_id: Option<String>,
    pub tag_oligo: Option<String>,
    pub tag_set_id: Option<DbId>,
    pub tag_set_name: Option<String>,
}
