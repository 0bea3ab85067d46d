//! Repository for the `samples` table.

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::sample::{CreateSample, Sample};

/// Column list for `samples` queries.
const COLUMNS: &str = "id, name, external_id, species, created_at, updated_at";

/// Provides CRUD operations for samples.
pub struct SampleRepo;

impl SampleRepo {
    /// Insert a new sample.
    pub async fn create(pool: &PgPool, input: &CreateSample) -> Result<Sample, sqlx::Error> {
        let query = format!(
            "INSERT INTO samples (name, external_id, species) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sample>(&query)
            .bind(&input.name)
            .bind(input.external_id)
            .bind(&input.species)
            .fetch_one(pool)
            .await
    }

    /// Find a sample by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sample>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM samples WHERE id = $1");
        sqlx::query_as::<_, Sample>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all samples, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Sample>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM samples ORDER BY id DESC");
        sqlx::query_as::<_, Sample>(&query).fetch_all(pool).await
    }
}
