//! Repository for the `pacbio_requests` table.

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::pacbio_request::{
    CreatePacbioRequest, PacbioRequest, PacbioRequestWithSample,
};

/// Column list for `pacbio_requests` queries.
const COLUMNS: &str = "\
    id, library_type, estimated_yield, number_of_smrt_cells, cost_code, \
    external_study_id, sample_id, created_at, updated_at";

/// Column list for request rows joined with their sample.
const JOINED_COLUMNS: &str = "\
    r.id, r.library_type, r.estimated_yield, r.number_of_smrt_cells, r.cost_code, \
    r.external_study_id, r.sample_id, s.name AS sample_name, r.created_at, r.updated_at";

/// Provides CRUD operations for PacBio sequencing requests.
pub struct PacbioRequestRepo;

impl PacbioRequestRepo {
    /// Insert a new request.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePacbioRequest,
    ) -> Result<PacbioRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO pacbio_requests \
                (library_type, estimated_yield, number_of_smrt_cells, cost_code, \
                 external_study_id, sample_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PacbioRequest>(&query)
            .bind(&input.library_type)
            .bind(input.estimated_yield)
            .bind(input.number_of_smrt_cells)
            .bind(&input.cost_code)
            .bind(input.external_study_id)
            .bind(input.sample_id)
            .fetch_one(pool)
            .await
    }

    /// Find a request by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PacbioRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pacbio_requests WHERE id = $1");
        sqlx::query_as::<_, PacbioRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every request whose id is in `ids`.
    ///
    /// The library factory resolves its request references with this
    /// single query; missing ids simply do not appear in the result.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<PacbioRequest>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM pacbio_requests WHERE id = ANY($1)");
        sqlx::query_as::<_, PacbioRequest>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all requests with their sample names, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PacbioRequestWithSample>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM pacbio_requests r \
             JOIN samples s ON s.id = r.sample_id \
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, PacbioRequestWithSample>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a request by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pacbio_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
