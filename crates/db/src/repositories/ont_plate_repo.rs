//! Repository for the `ont_plates`, `ont_wells`, and `ont_requests`
//! tables.
//!
//! Plate creation is the persistence half of the ONT plate factory:
//! the plate, its wells, and their sample requests are written in one
//! transaction from an already-validated payload.

use std::collections::HashMap;

use sqlx::PgPool;

use benchline_core::factory::ont::PlateAttributes;
use benchline_core::types::DbId;
use benchline_core::well::WellPosition;

use crate::models::ont_plate::{OntPlate, OntRequest, OntWell, OntWellWithRequests};

/// Column list for `ont_plates` queries.
const PLATE_COLUMNS: &str = "id, barcode, created_at, updated_at";

/// Column list for `ont_wells` queries.
const WELL_COLUMNS: &str = "id, ont_plate_id, position, created_at, updated_at";

/// Column list for `ont_requests` queries.
const REQUEST_COLUMNS: &str = "\
    id, ont_well_id, name, external_id, tag_id, created_at, updated_at";

/// Provides persistence for ONT plates and their nested graph.
pub struct OntPlateRepo;

impl OntPlateRepo {
    /// Persist a validated plate graph atomically.
    ///
    /// `tag_ids_by_oligo` is the same pre-loaded tag set the validator
    /// used; every oligo in the payload is guaranteed to resolve.
    pub async fn create_with_graph(
        pool: &PgPool,
        attributes: &PlateAttributes,
        tag_ids_by_oligo: &HashMap<String, DbId>,
    ) -> Result<OntPlate, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let plate_query = format!(
            "INSERT INTO ont_plates (barcode) VALUES ($1) RETURNING {PLATE_COLUMNS}"
        );
        let plate = sqlx::query_as::<_, OntPlate>(&plate_query)
            .bind(&attributes.barcode)
            .fetch_one(&mut *tx)
            .await?;

        let well_query = format!(
            "INSERT INTO ont_wells (ont_plate_id, position) \
             VALUES ($1, $2) \
             RETURNING {WELL_COLUMNS}"
        );
        for well_attributes in &attributes.wells {
            // Store positions in their canonical form ("A1", not "A01").
            let position = WellPosition::parse(&well_attributes.position)
                .map(|p| p.to_string())
                .unwrap_or_else(|_| well_attributes.position.clone());

            let well = sqlx::query_as::<_, OntWell>(&well_query)
                .bind(plate.id)
                .bind(&position)
                .fetch_one(&mut *tx)
                .await?;

            for sample in &well_attributes.samples {
                let tag_id = sample
                    .tag_oligo
                    .as_ref()
                    .and_then(|oligo| tag_ids_by_oligo.get(oligo))
                    .copied();
                sqlx::query(
                    "INSERT INTO ont_requests (ont_well_id, name, external_id, tag_id) \
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(well.id)
                .bind(&sample.name)
                .bind(&sample.external_id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(plate)
    }

    /// Find a plate by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OntPlate>, sqlx::Error> {
        let query = format!("SELECT {PLATE_COLUMNS} FROM ont_plates WHERE id = $1");
        sqlx::query_as::<_, OntPlate>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a plate by its unique barcode.
    pub async fn find_by_barcode(
        pool: &PgPool,
        barcode: &str,
    ) -> Result<Option<OntPlate>, sqlx::Error> {
        let query = format!("SELECT {PLATE_COLUMNS} FROM ont_plates WHERE barcode = $1");
        sqlx::query_as::<_, OntPlate>(&query)
            .bind(barcode)
            .fetch_optional(pool)
            .await
    }

    /// List all plates, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<OntPlate>, sqlx::Error> {
        let query = format!("SELECT {PLATE_COLUMNS} FROM ont_plates ORDER BY id DESC");
        sqlx::query_as::<_, OntPlate>(&query).fetch_all(pool).await
    }

    /// List a plate's wells with their requests, in well insertion order.
    pub async fn wells_with_requests(
        pool: &PgPool,
        plate_id: DbId,
    ) -> Result<Vec<OntWellWithRequests>, sqlx::Error> {
        let wells_query = format!(
            "SELECT {WELL_COLUMNS} FROM ont_wells WHERE ont_plate_id = $1 ORDER BY id"
        );
        let wells = sqlx::query_as::<_, OntWell>(&wells_query)
            .bind(plate_id)
            .fetch_all(pool)
            .await?;

        let requests_query = format!(
            "SELECT {REQUEST_COLUMNS} \
             FROM ont_requests \
             WHERE ont_well_id = ANY($1) \
             ORDER BY id"
        );
        let well_ids: Vec<DbId> = wells.iter().map(|well| well.id).collect();
        let requests = sqlx::query_as::<_, OntRequest>(&requests_query)
            .bind(&well_ids)
            .fetch_all(pool)
            .await?;

        let mut by_well: HashMap<DbId, Vec<OntRequest>> = HashMap::new();
        for request in requests {
            by_well.entry(request.ont_well_id).or_default().push(request);
        }

        Ok(wells
            .into_iter()
            .map(|well| {
                let requests = by_well.remove(&well.id).unwrap_or_default();
                OntWellWithRequests { well, requests }
            })
            .collect())
    }

    /// Count the tagged requests on a plate.
    ///
    /// The pooling factory uses this as the pool size.
    pub async fn tagged_request_count(pool: &PgPool, plate_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) \
             FROM ont_requests r \
             JOIN ont_wells w ON w.id = r.ont_well_id \
             WHERE w.ont_plate_id = $1 AND r.tag_id IS NOT NULL",
        )
        .bind(plate_id)
        .fetch_one(pool)
        .await
    }
}
