//! Repository for the `ont_runs` and `ont_flowcells` tables.

use sqlx::PgPool;

use benchline_core::types::DbId;

use crate::models::ont_run::{
    CreateOntFlowcell, FlowcellMessageRow, OntFlowcell, OntRun, OntRunWithFlowcells,
};

/// Column list for `ont_runs` queries.
const RUN_COLUMNS: &str = "id, state, created_at, updated_at";

/// Column list for `ont_flowcells` queries.
const FLOWCELL_COLUMNS: &str = "\
    id, ont_run_id, position, ont_library_id, created_at, updated_at";

/// Provides CRUD operations for ONT runs and their flowcells.
pub struct OntRunRepo;

impl OntRunRepo {
    /// Create a run and its flowcells in one transaction.
    pub async fn create_with_flowcells(
        pool: &PgPool,
        flowcells: &[CreateOntFlowcell],
    ) -> Result<OntRunWithFlowcells, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let run_query = format!(
            "INSERT INTO ont_runs DEFAULT VALUES RETURNING {RUN_COLUMNS}"
        );
        let run = sqlx::query_as::<_, OntRun>(&run_query)
            .fetch_one(&mut *tx)
            .await?;

        let flowcell_query = format!(
            "INSERT INTO ont_flowcells (ont_run_id, position, ont_library_id) \
             VALUES ($1, $2, $3) \
             RETURNING {FLOWCELL_COLUMNS}"
        );
        let mut created = Vec::with_capacity(flowcells.len());
        for flowcell in flowcells {
            let row = sqlx::query_as::<_, OntFlowcell>(&flowcell_query)
                .bind(run.id)
                .bind(flowcell.position)
                .bind(flowcell.ont_library_id)
                .fetch_one(&mut *tx)
                .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(OntRunWithFlowcells {
            run,
            flowcells: created,
        })
    }

    /// Find a run by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OntRun>, sqlx::Error> {
        let query = format!("SELECT {RUN_COLUMNS} FROM ont_runs WHERE id = $1");
        sqlx::query_as::<_, OntRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a run with its flowcells.
    pub async fn find_with_flowcells(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OntRunWithFlowcells>, sqlx::Error> {
        let Some(run) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let flowcells = Self::flowcells_for_run(pool, id).await?;
        Ok(Some(OntRunWithFlowcells { run, flowcells }))
    }

    /// List all runs, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OntRun>, sqlx::Error> {
        let query = format!("SELECT {RUN_COLUMNS} FROM ont_runs ORDER BY id DESC");
        sqlx::query_as::<_, OntRun>(&query).fetch_all(pool).await
    }

    /// Update a run's state.
    ///
    /// Returns `None` if no run with the given ID exists.
    pub async fn update_state(
        pool: &PgPool,
        id: DbId,
        state: &str,
    ) -> Result<Option<OntRun>, sqlx::Error> {
        let query = format!(
            "UPDATE ont_runs SET state = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, OntRun>(&query)
            .bind(id)
            .bind(state)
            .fetch_optional(pool)
            .await
    }

    /// List a run's flowcells ordered by instrument slot.
    pub async fn flowcells_for_run(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Vec<OntFlowcell>, sqlx::Error> {
        let query = format!(
            "SELECT {FLOWCELL_COLUMNS} FROM ont_flowcells \
             WHERE ont_run_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, OntFlowcell>(&query)
            .bind(run_id)
            .fetch_all(pool)
            .await
    }

    /// Flat rows for building warehouse messages: one per sample request
    /// reachable from each of the run's flowcells.
    pub async fn flowcell_message_rows(
        pool: &PgPool,
        run_id: DbId,
    ) -> Result<Vec<FlowcellMessageRow>, sqlx::Error> {
        sqlx::query_as::<_, FlowcellMessageRow>(
            "SELECT f.id AS flowcell_id, f.position, f.ont_run_id AS run_id, \
                    l.name AS library_name, \
                    r.name AS sample_name, r.external_id AS sample_external_id, \
                    t.group_id AS tag_group_id, t.oligo AS tag_oligo, \
                    ts.id AS tag_set_id, ts.name AS tag_set_name \
             FROM ont_flowcells f \
             JOIN ont_libraries l ON l.id = f.ont_library_id \
             JOIN ont_wells w ON w.ont_plate_id = l.ont_plate_id \
             JOIN ont_requests r ON r.ont_well_id = w.id \
             LEFT JOIN tags t ON t.id = r.tag_id \
             LEFT JOIN tag_sets ts ON ts.id = t.tag_set_id \
             WHERE f.ont_run_id = $1 \
             ORDER BY f.position, r.id",
        )
        .bind(run_id)
        .fetch_all(pool)
        .await
    }
}
