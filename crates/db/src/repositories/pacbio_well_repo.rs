//! Repository for the `pacbio_wells` and `pacbio_well_libraries` tables.

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::pacbio_library::PacbioLibrary;
use crate::models::pacbio_well::{CreatePacbioWell, PacbioWell, UpdatePacbioWell};

/// Column list for `pacbio_wells` queries. Row and column need quoting.
const COLUMNS: &str = "\
    id, pacbio_plate_id, \"row\", \"column\", movie_time, insert_size, \
    on_plate_loading_concentration, comment, generate_hifi, ccs_analysis_output, \
    pre_extension_time, created_at, updated_at";

/// Column list for `pacbio_libraries` rows fetched through the well join.
const LIBRARY_COLUMNS: &str = "\
    l.id, l.volume, l.concentration, l.template_prep_kit_box_barcode, \
    l.fragment_size, l.tube_id, l.created_at, l.updated_at";

/// Provides CRUD operations for PacBio wells and their library links.
pub struct PacbioWellRepo;

impl PacbioWellRepo {
    /// Insert a new well, linking any libraries in the same transaction.
    ///
    /// `ccs_analysis_output` must already be normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePacbioWell,
        ccs_analysis_output: &str,
    ) -> Result<PacbioWell, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO pacbio_wells \
                (pacbio_plate_id, \"row\", \"column\", movie_time, insert_size, \
                 on_plate_loading_concentration, comment, generate_hifi, \
                 ccs_analysis_output, pre_extension_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        let well = sqlx::query_as::<_, PacbioWell>(&query)
            .bind(input.pacbio_plate_id)
            .bind(&input.row)
            .bind(&input.column)
            .bind(input.movie_time)
            .bind(input.insert_size)
            .bind(input.on_plate_loading_concentration)
            .bind(&input.comment)
            .bind(&input.generate_hifi)
            .bind(ccs_analysis_output)
            .bind(input.pre_extension_time)
            .fetch_one(&mut *tx)
            .await?;

        for library_id in &input.library_ids {
            sqlx::query(
                "INSERT INTO pacbio_well_libraries (pacbio_well_id, pacbio_library_id) \
                 VALUES ($1, $2)",
            )
            .bind(well.id)
            .bind(library_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(well)
    }

    /// Find a well by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PacbioWell>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pacbio_wells WHERE id = $1");
        sqlx::query_as::<_, PacbioWell>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the wells of a plate in insertion order.
    pub async fn list_for_plate(
        pool: &PgPool,
        plate_id: DbId,
    ) -> Result<Vec<PacbioWell>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pacbio_wells WHERE pacbio_plate_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, PacbioWell>(&query)
            .bind(plate_id)
            .fetch_all(pool)
            .await
    }

    /// Update a well. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no well with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePacbioWell,
    ) -> Result<Option<PacbioWell>, sqlx::Error> {
        let query = format!(
            "UPDATE pacbio_wells SET \
                 \"row\" = COALESCE($2, \"row\"), \
                 \"column\" = COALESCE($3, \"column\"), \
                 movie_time = COALESCE($4, movie_time), \
                 insert_size = COALESCE($5, insert_size), \
                 on_plate_loading_concentration = COALESCE($6, on_plate_loading_concentration), \
                 comment = COALESCE($7, comment), \
                 generate_hifi = COALESCE($8, generate_hifi), \
                 ccs_analysis_output = COALESCE($9, ccs_analysis_output), \
                 pre_extension_time = COALESCE($10, pre_extension_time), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PacbioWell>(&query)
            .bind(id)
            .bind(&input.row)
            .bind(&input.column)
            .bind(input.movie_time)
            .bind(input.insert_size)
            .bind(input.on_plate_loading_concentration)
            .bind(&input.comment)
            .bind(&input.generate_hifi)
            .bind(&input.ccs_analysis_output)
            .bind(input.pre_extension_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a well by ID. Cascade deletes its library links.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pacbio_wells WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the libraries placed in a well.
    pub async fn libraries_for_well(
        pool: &PgPool,
        well_id: DbId,
    ) -> Result<Vec<PacbioLibrary>, sqlx::Error> {
        let query = format!(
            "SELECT {LIBRARY_COLUMNS} \
             FROM pacbio_well_libraries wl \
             JOIN pacbio_libraries l ON l.id = wl.pacbio_library_id \
             WHERE wl.pacbio_well_id = $1 \
             ORDER BY wl.id"
        );
        sqlx::query_as::<_, PacbioLibrary>(&query)
            .bind(well_id)
            .fetch_all(pool)
            .await
    }

    /// Link additional libraries to an existing well.
    pub async fn add_libraries(
        pool: &PgPool,
        well_id: DbId,
        library_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for library_id in library_ids {
            sqlx::query(
                "INSERT INTO pacbio_well_libraries (pacbio_well_id, pacbio_library_id) \
                 VALUES ($1, $2) \
                 ON CONFLICT (pacbio_well_id, pacbio_library_id) DO NOTHING",
            )
            .bind(well_id)
            .bind(library_id)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
