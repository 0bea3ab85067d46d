//! Repository for the `pacbio_libraries`, `pacbio_request_libraries`,
//! and `tubes` tables.
//!
//! Library creation is the persistence half of the library factory:
//! the whole validated batch (tubes, libraries, request-library joins)
//! is written in one transaction so a failure leaves nothing behind.

use sqlx::{PgPool, Postgres, Transaction};

use benchline_core::factory::pacbio::LibraryAttributes;
use benchline_core::types::DbId;

use crate::models::pacbio_library::{
    PacbioLibrary, PacbioLibraryWithTube, PacbioRequestLibrary,
};
use crate::models::tube::Tube;

/// Column list for `pacbio_libraries` queries.
const COLUMNS: &str = "\
    id, volume, concentration, template_prep_kit_box_barcode, fragment_size, \
    tube_id, created_at, updated_at";

/// Column list for library rows joined with their tube barcode.
const JOINED_COLUMNS: &str = "\
    l.id, l.volume, l.concentration, l.template_prep_kit_box_barcode, \
    l.fragment_size, l.tube_id, t.barcode AS tube_barcode, l.created_at, l.updated_at";

/// Column list for `pacbio_request_libraries` queries.
const REQUEST_LIBRARY_COLUMNS: &str = "\
    id, pacbio_request_id, pacbio_library_id, tag_id, created_at, updated_at";

/// Provides persistence for PacBio libraries and their request joins.
pub struct PacbioLibraryRepo;

impl PacbioLibraryRepo {
    /// Persist a validated batch of libraries atomically.
    ///
    /// For each library: a tube is created, then the library row, then
    /// one request-library row per request entry. Any failure rolls the
    /// whole batch back.
    pub async fn create_batch(
        pool: &PgPool,
        libraries: &[LibraryAttributes],
    ) -> Result<Vec<PacbioLibrary>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(libraries.len());

        for attributes in libraries {
            created.push(Self::create_one(&mut tx, attributes).await?);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn create_one(
        tx: &mut Transaction<'_, Postgres>,
        attributes: &LibraryAttributes,
    ) -> Result<PacbioLibrary, sqlx::Error> {
        let tube = sqlx::query_as::<_, Tube>(
            "INSERT INTO tubes DEFAULT VALUES \
             RETURNING id, barcode, created_at, updated_at",
        )
        .fetch_one(&mut **tx)
        .await?;

        let library_query = format!(
            "INSERT INTO pacbio_libraries \
                (volume, concentration, template_prep_kit_box_barcode, fragment_size, tube_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let library = sqlx::query_as::<_, PacbioLibrary>(&library_query)
            .bind(attributes.volume)
            .bind(attributes.concentration)
            .bind(&attributes.template_prep_kit_box_barcode)
            .bind(attributes.fragment_size)
            .bind(tube.id)
            .fetch_one(&mut **tx)
            .await?;

        for request in &attributes.requests {
            sqlx::query(
                "INSERT INTO pacbio_request_libraries \
                    (pacbio_request_id, pacbio_library_id, tag_id) \
                 VALUES ($1, $2, $3)",
            )
            .bind(request.id)
            .bind(library.id)
            .bind(request.tag_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(library)
    }

    /// Find a library by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PacbioLibrary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pacbio_libraries WHERE id = $1");
        sqlx::query_as::<_, PacbioLibrary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all libraries with their tube barcodes, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PacbioLibraryWithTube>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} \
             FROM pacbio_libraries l \
             JOIN tubes t ON t.id = l.tube_id \
             ORDER BY l.id DESC"
        );
        sqlx::query_as::<_, PacbioLibraryWithTube>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the request-library joins of a library.
    pub async fn request_libraries(
        pool: &PgPool,
        library_id: DbId,
    ) -> Result<Vec<PacbioRequestLibrary>, sqlx::Error> {
        let query = format!(
            "SELECT {REQUEST_LIBRARY_COLUMNS} \
             FROM pacbio_request_libraries \
             WHERE pacbio_library_id = $1 \
             ORDER BY id"
        );
        sqlx::query_as::<_, PacbioRequestLibrary>(&query)
            .bind(library_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a library by ID. Cascade deletes its request joins; the
    /// tube is kept (it still physically exists in the lab).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pacbio_libraries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
