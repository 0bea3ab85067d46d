//! Tube container model.

use serde::Serialize;
use sqlx::FromRow;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `tubes` table.
///
/// The barcode is generated by the database as `TRAC-<id>` so every
/// tube is labelled the moment it exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tube {
    pub id: DbId,
    pub barcode: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
