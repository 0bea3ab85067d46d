//! Repository for the `ont_libraries` table.

use sqlx::PgPool;

use benchline_core::factory::ont::pooled_library_name;
use benchline_core::types::DbId;

use crate::models::ont_library::OntLibrary;

/// Column list for `ont_libraries` queries.
const COLUMNS: &str = "id, name, pool, pool_size, ont_plate_id, created_at, updated_at";

/// Provides persistence for pooled ONT libraries.
pub struct OntLibraryRepo;

impl OntLibraryRepo {
    /// Create `pool_count` libraries pooled from a plate, atomically.
    ///
    /// Library `n` is named `<plate_barcode>-<n>`; `pool_size` records
    /// how many tagged requests went into each pool.
    pub async fn create_pools(
        pool: &PgPool,
        plate_id: DbId,
        plate_barcode: &str,
        pool_count: u32,
        pool_size: i32,
    ) -> Result<Vec<OntLibrary>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(pool_count as usize);

        let query = format!(
            "INSERT INTO ont_libraries (name, pool, pool_size, ont_plate_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        for pool_number in 1..=pool_count {
            let library = sqlx::query_as::<_, OntLibrary>(&query)
                .bind(pooled_library_name(plate_barcode, pool_number))
                .bind(pool_number as i32)
                .bind(pool_size)
                .bind(plate_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(library);
        }

        tx.commit().await?;
        Ok(created)
    }

    /// Find a library by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OntLibrary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ont_libraries WHERE id = $1");
        sqlx::query_as::<_, OntLibrary>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all libraries, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OntLibrary>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ont_libraries ORDER BY id DESC");
        sqlx::query_as::<_, OntLibrary>(&query).fetch_all(pool).await
    }

    /// Which of the given library names are already taken.
    pub async fn existing_names(
        pool: &PgPool,
        names: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, String>("SELECT name FROM ont_libraries WHERE name = ANY($1)")
            .bind(names)
            .fetch_all(pool)
            .await
    }
}
