//! Sample model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `samples` table.
///
/// `external_id` is the sample's UUID in the upstream sample tracking
/// system; it is the handle other services use to refer to the sample.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sample {
    pub id: DbId,
    pub name: String,
    pub external_id: Uuid,
    pub species: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new sample.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSample {
    pub name: String,
    pub external_id: Uuid,
    pub species: Option<String>,
}
