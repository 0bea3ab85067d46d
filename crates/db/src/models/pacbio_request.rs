//! PacBio sequencing request model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `pacbio_requests` table.
///
/// A request asks for one sample to be sequenced; the `cost_code` is the
/// billing reference the library factory insists on before a request can
/// be pooled into a library.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioRequest {
    pub id: DbId,
    pub library_type: String,
    pub estimated_yield: Option<i32>,
    pub number_of_smrt_cells: Option<i32>,
    pub cost_code: String,
    pub external_study_id: Uuid,
    pub sample_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A request row joined with its sample name, for list endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PacbioRequestWithSample {
    pub id: DbId,
    pub library_type: String,
    pub estimated_yield: Option<i32>,
    pub number_of_smrt_cells: Option<i32>,
    pub cost_code: String,
    pub external_study_id: Uuid,
    pub sample_id: DbId,
    pub sample_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePacbioRequest {
    pub library_type: String,
    pub estimated_yield: Option<i32>,
    pub number_of_smrt_cells: Option<i32>,
    pub cost_code: String,
    pub external_study_id: Uuid,
    pub sample_id: DbId,
}
