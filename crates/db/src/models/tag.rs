//! Tag set and tag models and DTOs.
//!
//! Tags are short oligo sequences ligated onto library material so that
//! pooled samples can be demultiplexed after sequencing. Every tag
//! belongs to a named tag set.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use benchline_core::types::{DbId, Timestamp};

/// A row from the `tag_sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagSet {
    pub id: DbId,
    pub name: String,
    pub uuid: Uuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub oligo: String,
    pub group_id: String,
    pub tag_set_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagSet {
    pub name: String,
}

/// DTO for adding a tag to a set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub oligo: String,
    pub group_id: String,
}
