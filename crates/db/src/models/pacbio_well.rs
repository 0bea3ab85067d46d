//! PacBio well model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `pacbio_wells` table.
///
/// `row`/`column` address the well on its plate; the column is stored
/// without a leading zero (`"1"`, not `"01"`). Instrument options are
/// stored as the exact strings the instrument accepts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioWell {
    pub id: DbId,
    pub pacbio_plate_id: DbId,
    pub row: String,
    pub column: String,
    pub movie_time: f64,
    pub insert_size: i32,
    pub on_plate_loading_concentration: f64,
    pub comment: Option<String>,
    pub generate_hifi: String,
    pub ccs_analysis_output: String,
    pub pre_extension_time: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new well, optionally placing libraries in it.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePacbioWell {
    pub pacbio_plate_id: DbId,
    pub row: String,
    pub column: String,
    pub movie_time: f64,
    pub insert_size: i32,
    pub on_plate_loading_concentration: f64,
    pub comment: Option<String>,
    pub generate_hifi: String,
    /// `"Yes"` or `"No"`; blank normalizes to `"No"`.
    pub ccs_analysis_output: Option<String>,
    pub pre_extension_time: Option<i32>,
    /// Libraries to place in the well on creation.
    #[serde(default)]
    pub library_ids: Vec<DbId>,
}

/// DTO for updating an existing well. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePacbioWell {
    pub row: Option<String>,
    pub column: Option<String>,
    pub movie_time: Option<f64>,
    pub insert_size: Option<i32>,
    pub on_plate_loading_concentration: Option<f64>,
    pub comment: Option<String>,
    pub generate_hifi: Option<String>,
    pub ccs_analysis_output: Option<String>,
    pub pre_extension_time: Option<i32>,
}
