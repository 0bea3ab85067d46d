//! ONT factory orchestration: plates with nested samples, pooled
//! libraries, and runs with flowcells.

use std::collections::HashSet;

use chrono::Utc;

use benchline_core::factory::ont::{pooled_library_name, validate_plate, PlateAttributes};
use benchline_core::factory::ErrorList;
use benchline_core::types::DbId;
use benchline_db::models::ont_library::{CreateOntLibraries, OntLibrary};
use benchline_db::models::ont_plate::OntPlate;
use benchline_db::models::ont_run::{CreateOntFlowcell, OntRunWithFlowcells};
use benchline_db::repositories::{OntLibraryRepo, OntPlateRepo, OntRunRepo, TagRepo};
use benchline_db::DbPool;

use benchline_events::message::build_flowcell_messages;
use benchline_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Slots available on the GridION instrument.
const FLOWCELL_POSITIONS: std::ops::RangeInclusive<i32> = 1..=5;

// ---------------------------------------------------------------------------
// Plate factory
// ---------------------------------------------------------------------------

/// Validate and persist a plate with nested wells and samples.
///
/// The configured tag set is loaded once; every sample `tag_oligo` in
/// the payload resolves against it.
pub async fn create_plate(
    pool: &DbPool,
    tag_set_name: &str,
    attributes: PlateAttributes,
) -> AppResult<OntPlate> {
    let barcode_taken = OntPlateRepo::find_by_barcode(pool, &attributes.barcode)
        .await?
        .is_some();
    let tags = TagRepo::tag_ids_by_oligo(pool, tag_set_name).await?;

    let errors = validate_plate(&attributes, &tags, barcode_taken);
    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let plate = OntPlateRepo::create_with_graph(pool, &attributes, &tags).await?;

    tracing::info!(plate_id = plate.id, barcode = %plate.barcode, "ONT plate created");

    Ok(plate)
}

// ---------------------------------------------------------------------------
// Library pooling factory
// ---------------------------------------------------------------------------

/// Pool a plate's tagged requests into numbered libraries.
pub async fn create_libraries(
    pool: &DbPool,
    input: &CreateOntLibraries,
) -> AppResult<Vec<OntLibrary>> {
    let mut errors = ErrorList::new();

    let plate = OntPlateRepo::find_by_barcode(pool, &input.plate_barcode).await?;
    let Some(plate) = plate else {
        errors.add("plate_barcode", format!("{} does not exist", input.plate_barcode));
        return Err(AppError::FactoryValidation(errors));
    };

    let tagged = OntPlateRepo::tagged_request_count(pool, plate.id).await?;
    if tagged == 0 {
        errors.add("plate", "has no tagged requests to pool");
    }

    let pool_count = input.pool_count.unwrap_or(1).max(1);
    let names: Vec<String> = (1..=pool_count)
        .map(|pool_number| pooled_library_name(&plate.barcode, pool_number))
        .collect();
    for taken in OntLibraryRepo::existing_names(pool, &names).await? {
        errors.add("name", format!("{taken} has already been taken"));
    }

    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let libraries =
        OntLibraryRepo::create_pools(pool, plate.id, &plate.barcode, pool_count, tagged as i32)
            .await?;

    tracing::info!(
        plate_id = plate.id,
        count = libraries.len(),
        "ONT libraries pooled"
    );

    Ok(libraries)
}

// ---------------------------------------------------------------------------
// Run factory
// ---------------------------------------------------------------------------

/// Validate and persist a run with its flowcells, then publish the
/// warehouse messages describing it.
pub async fn create_run(
    state: &AppState,
    flowcells: Vec<CreateOntFlowcell>,
) -> AppResult<OntRunWithFlowcells> {
    let mut errors = ErrorList::new();

    let mut positions: HashSet<i32> = HashSet::new();
    for flowcell in &flowcells {
        if !FLOWCELL_POSITIONS.contains(&flowcell.position) {
            errors.add("position", format!("{} is not an instrument slot", flowcell.position));
        }
        if !positions.insert(flowcell.position) {
            errors.add(
                "position",
                format!("{} is used more than once", flowcell.position),
            );
        }
        if OntLibraryRepo::find_by_id(&state.pool, flowcell.ont_library_id)
            .await?
            .is_none()
        {
            errors.add(
                "library",
                format!("{} does not exist", flowcell.ont_library_id),
            );
        }
    }

    if !errors.is_empty() {
        return Err(AppError::FactoryValidation(errors));
    }

    let run = OntRunRepo::create_with_flowcells(&state.pool, &flowcells).await?;

    publish_run_event(state, run.run.id, "ont.run.created").await?;

    tracing::info!(
        run_id = run.run.id,
        flowcells = run.flowcells.len(),
        "ONT run created"
    );

    Ok(run)
}

/// Publish a run lifecycle event carrying the warehouse messages for
/// every flowcell on the run.
pub async fn publish_run_event(
    state: &AppState,
    run_id: DbId,
    event_type: &str,
) -> AppResult<()> {
    let rows = OntRunRepo::flowcell_message_rows(&state.pool, run_id).await?;
    let messages = build_flowcell_messages(&rows, &state.config.message, Utc::now());

    let payload = serde_json::json!({ "messages": messages });
    state.event_bus.publish(
        PlatformEvent::new(event_type)
            .with_source("ont_run", run_id)
            .with_payload(payload),
    );

    Ok(())
}
