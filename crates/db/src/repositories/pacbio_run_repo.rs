//! Repository for the `pacbio_runs` and `pacbio_plates` tables, plus
//! the sample-sheet projection query.

use sqlx::{FromRow, PgPool};

use benchline_core::sample_sheet::{
    SheetLibrary, SheetRequestLibrary, SheetRun, SheetTag, SheetWell,
};
use benchline_core::types::DbId;
use benchline_core::well::WellPosition;

use crate::models::pacbio_run::{CreatePacbioRun, PacbioPlate, PacbioRun, UpdatePacbioRun};

/// Column list for `pacbio_runs` queries.
const COLUMNS: &str = "\
    id, name, state, system_name, binding_kit_box_barcode, sequencing_kit_box_barcode, \
    dna_control_complex_box_barcode, comments, created_at, updated_at";

/// Column list for `pacbio_plates` queries.
const PLATE_COLUMNS: &str = "id, pacbio_run_id, created_at, updated_at";

/// Flat join row feeding the sample-sheet assembly.
///
/// Wells without libraries still appear (left joins) with the library
/// and request fields null.
#[derive(Debug, FromRow)]
struct SheetQueryRow {
    well_id: DbId,
    row: String,
    column: String,
    movie_time: f64,
    insert_size: i32,
    on_plate_loading_concentration: f64,
    pre_extension_time: Option<i32>,
    generate_hifi: String,
    ccs_analysis_output: String,
    library_id: Option<DbId>,
    template_prep_kit_box_barcode: Option<String>,
    sample_name: Option<String>,
    tag_group_id: Option<String>,
    tag_set_uuid: Option<String>,
}

/// Provides CRUD operations for PacBio runs and their plates.
pub struct PacbioRunRepo;

impl PacbioRunRepo {
    /// Insert a new run in the `pending` state.
    pub async fn create(pool: &PgPool, input: &CreatePacbioRun) -> Result<PacbioRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO pacbio_runs \
                (name, system_name, binding_kit_box_barcode, sequencing_kit_box_barcode, \
                 dna_control_complex_box_barcode, comments) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PacbioRun>(&query)
            .bind(&input.name)
            .bind(&input.system_name)
            .bind(&input.binding_kit_box_barcode)
            .bind(&input.sequencing_kit_box_barcode)
            .bind(&input.dna_control_complex_box_barcode)
            .bind(&input.comments)
            .fetch_one(pool)
            .await
    }

    /// Find a run by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PacbioRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pacbio_runs WHERE id = $1");
        sqlx::query_as::<_, PacbioRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all runs, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PacbioRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pacbio_runs ORDER BY id DESC");
        sqlx::query_as::<_, PacbioRun>(&query).fetch_all(pool).await
    }

    /// Update a run. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no run with the given ID exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePacbioRun,
    ) -> Result<Option<PacbioRun>, sqlx::Error> {
        let query = format!(
            "UPDATE pacbio_runs SET \
                 name = COALESCE($2, name), \
                 state = COALESCE($3, state), \
                 system_name = COALESCE($4, system_name), \
                 binding_kit_box_barcode = COALESCE($5, binding_kit_box_barcode), \
                 sequencing_kit_box_barcode = COALESCE($6, sequencing_kit_box_barcode), \
                 dna_control_complex_box_barcode = COALESCE($7, dna_control_complex_box_barcode), \
                 comments = COALESCE($8, comments), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PacbioRun>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.state)
            .bind(&input.system_name)
            .bind(&input.binding_kit_box_barcode)
            .bind(&input.sequencing_kit_box_barcode)
            .bind(&input.dna_control_complex_box_barcode)
            .bind(&input.comments)
            .fetch_optional(pool)
            .await
    }

    /// Delete a run by ID. Cascade deletes its plate, wells, and well
    /// links, but never the libraries placed in them.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM pacbio_runs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Create the run's plate. One plate per run, enforced by constraint.
    pub async fn create_plate(pool: &PgPool, run_id: DbId) -> Result<PacbioPlate, sqlx::Error> {
        let query = format!(
            "INSERT INTO pacbio_plates (pacbio_run_id) VALUES ($1) RETURNING {PLATE_COLUMNS}"
        );
        sqlx::query_as::<_, PacbioPlate>(&query)
            .bind(run_id)
            .fetch_one(pool)
            .await
    }

    /// Find the run's plate, if it has one.
    pub async fn plate_for_run(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Option<PacbioPlate>, sqlx::Error> {
        let query = format!("SELECT {PLATE_COLUMNS} FROM pacbio_plates WHERE pacbio_run_id = $1");
        sqlx::query_as::<_, PacbioPlate>(&query)
            .bind(run_id)
            .fetch_optional(pool)
            .await
    }

    /// Load the full sample-sheet projection for a run.
    ///
    /// Returns `None` when the run does not exist. A run without a plate
    /// or wells yields a sheet with no well rows.
    pub async fn load_sheet_run(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Option<SheetRun>, sqlx::Error> {
        let Some(run) = Self::find_by_id(pool, run_id).await? else {
            return Ok(None);
        };

        let rows = sqlx::query_as::<_, SheetQueryRow>(
            "SELECT w.id AS well_id, w.\"row\", w.\"column\", w.movie_time, w.insert_size, \
                    w.on_plate_loading_concentration, w.pre_extension_time, w.generate_hifi, \
                    w.ccs_analysis_output, \
                    l.id AS library_id, l.template_prep_kit_box_barcode, \
                    s.name AS sample_name, \
                    t.group_id AS tag_group_id, ts.uuid::text AS tag_set_uuid \
             FROM pacbio_plates p \
             JOIN pacbio_wells w ON w.pacbio_plate_id = p.id \
             LEFT JOIN pacbio_well_libraries wl ON wl.pacbio_well_id = w.id \
             LEFT JOIN pacbio_libraries l ON l.id = wl.pacbio_library_id \
             LEFT JOIN pacbio_request_libraries rl ON rl.pacbio_library_id = l.id \
             LEFT JOIN pacbio_requests r ON r.id = rl.pacbio_request_id \
             LEFT JOIN samples s ON s.id = r.sample_id \
             LEFT JOIN tags t ON t.id = rl.tag_id \
             LEFT JOIN tag_sets ts ON ts.id = t.tag_set_id \
             WHERE p.pacbio_run_id = $1 \
             ORDER BY w.id, l.id, rl.id",
        )
        .bind(run_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(assemble_sheet_run(run, rows)))
    }
}

/// Fold the flat join rows back into the nested sheet structure.
fn assemble_sheet_run(run: PacbioRun, rows: Vec<SheetQueryRow>) -> SheetRun {
    let mut wells: Vec<SheetWell> = Vec::new();
    let mut current_well: Option<DbId> = None;
    let mut current_library: Option<DbId> = None;

    for row in rows {
        if current_well != Some(row.well_id) {
            current_well = Some(row.well_id);
            current_library = None;
            wells.push(SheetWell {
                // Row/column come from validated inserts, so a parse
                // failure here means the table itself is corrupt.
                position: WellPosition::parse(&format!("{}{}", row.row, row.column))
                    .unwrap_or_else(|e| panic!("invalid well position in database: {e}")),
                movie_time: row.movie_time,
                insert_size: row.insert_size,
                on_plate_loading_concentration: row.on_plate_loading_concentration,
                pre_extension_time: row.pre_extension_time,
                generate_hifi: row.generate_hifi.clone(),
                ccs_analysis_output: row.ccs_analysis_output.clone(),
                libraries: Vec::new(),
            });
        }

        // A well row was pushed above, so last_mut always succeeds.
        let Some(well) = wells.last_mut() else {
            continue;
        };

        let Some(library_id) = row.library_id else {
            continue;
        };

        if current_library != Some(library_id) {
            current_library = Some(library_id);
            well.libraries.push(SheetLibrary {
                template_prep_kit_box_barcode: row
                    .template_prep_kit_box_barcode
                    .clone()
                    .unwrap_or_default(),
                request_libraries: Vec::new(),
            });
        }

        if let Some(sample_name) = row.sample_name {
            let tag = match (row.tag_group_id, row.tag_set_uuid) {
                (Some(group_id), Some(tag_set_uuid)) => Some(SheetTag {
                    group_id,
                    tag_set_uuid,
                }),
                _ => None,
            };
            if let Some(library) = well.libraries.last_mut() {
                library
                    .request_libraries
                    .push(SheetRequestLibrary { sample_name, tag });
            }
        }
    }

    SheetRun {
        system_name: run.system_name,
        name: run.name,
        binding_kit_box_barcode: run.binding_kit_box_barcode,
        sequencing_kit_box_barcode: run.sequencing_kit_box_barcode,
        dna_control_complex_box_barcode: run.dna_control_complex_box_barcode,
        comments: run.comments.unwrap_or_default(),
        wells,
    }
}
