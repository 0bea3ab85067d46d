//! Integration tests for ONT graph persistence: plate factory output,
//! library pooling, and runs with flowcells.

use sqlx::PgPool;

use benchline_core::factory::ont::{PlateAttributes, SampleAttributes, WellAttributes};
use benchline_db::models::ont_run::CreateOntFlowcell;
use benchline_db::models::tag::{CreateTag, CreateTagSet};
use benchline_db::repositories::{OntLibraryRepo, OntPlateRepo, OntRunRepo, TagRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_tag_set(pool: &PgPool) -> std::collections::HashMap<String, i64> {
    let set = TagRepo::create_set(
        pool,
        &CreateTagSet {
            name: "ont_native_96".to_string(),
        },
    )
    .await
    .unwrap();
    TagRepo::add_tags(
        pool,
        set.id,
        &[
            CreateTag {
                oligo: "ACGT".to_string(),
                group_id: "NB01".to_string(),
            },
            CreateTag {
                oligo: "TGCA".to_string(),
                group_id: "NB02".to_string(),
            },
        ],
    )
    .await
    .unwrap();

    TagRepo::tag_ids_by_oligo(pool, "ont_native_96").await.unwrap()
}

fn plate_attributes(barcode: &str) -> PlateAttributes {
    PlateAttributes {
        barcode: barcode.to_string(),
        wells: vec![
            WellAttributes {
                position: "A1".to_string(),
                samples: vec![SampleAttributes {
                    name: "Sample in A1".to_string(),
                    external_id: "ExtIdA1-1".to_string(),
                    tag_oligo: Some("ACGT".to_string()),
                }],
            },
            WellAttributes {
                position: "H12".to_string(),
                samples: vec![
                    SampleAttributes {
                        name: "Sample 1 in H12".to_string(),
                        external_id: "ExtIdH12-1".to_string(),
                        tag_oligo: Some("TGCA".to_string()),
                    },
                    SampleAttributes {
                        name: "Sample 2 in H12".to_string(),
                        external_id: "ExtIdH12-2".to_string(),
                        tag_oligo: None,
                    },
                ],
            },
        ],
    }
}

// ---------------------------------------------------------------------------
// Plate graph persistence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn plate_graph_persists_wells_and_requests(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();

    assert_eq!(plate.barcode, "PLATE-1234");

    let wells = OntPlateRepo::wells_with_requests(&pool, plate.id).await.unwrap();
    assert_eq!(wells.len(), 2);
    assert_eq!(wells[0].well.position, "A1");
    assert_eq!(wells[0].requests.len(), 1);
    assert_eq!(wells[0].requests[0].name, "Sample in A1");
    assert!(wells[0].requests[0].tag_id.is_some());

    assert_eq!(wells[1].requests.len(), 2);
    assert!(wells[1].requests[1].tag_id.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn plate_positions_are_stored_in_canonical_form(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let mut attributes = plate_attributes("PLATE-1234");
    attributes.wells[0].position = "A01".to_string();

    let plate = OntPlateRepo::create_with_graph(&pool, &attributes, &tags).await.unwrap();

    let wells = OntPlateRepo::wells_with_requests(&pool, plate.id).await.unwrap();
    assert_eq!(wells[0].well.position, "A1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_plate_barcode_is_a_unique_violation(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();

    let err = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_ont_plates_barcode"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tagged_request_count_ignores_untagged(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();

    let count = OntPlateRepo::tagged_request_count(&pool, plate.id).await.unwrap();
    assert_eq!(count, 2);
}

// ---------------------------------------------------------------------------
// Library pooling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn pooling_creates_numbered_libraries(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();

    let libraries = OntLibraryRepo::create_pools(&pool, plate.id, &plate.barcode, 2, 2)
        .await
        .unwrap();

    assert_eq!(libraries.len(), 2);
    assert_eq!(libraries[0].name, "PLATE-1234-1");
    assert_eq!(libraries[1].name, "PLATE-1234-2");
    assert_eq!(libraries[0].pool, 1);
    assert_eq!(libraries[0].pool_size, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn existing_names_reports_taken_library_names(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();
    OntLibraryRepo::create_pools(&pool, plate.id, &plate.barcode, 1, 2)
        .await
        .unwrap();

    let taken = OntLibraryRepo::existing_names(
        &pool,
        &["PLATE-1234-1".to_string(), "PLATE-1234-2".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(taken, vec!["PLATE-1234-1".to_string()]);
}

// ---------------------------------------------------------------------------
// Runs and flowcells
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_with_flowcells_round_trips(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();
    let libraries = OntLibraryRepo::create_pools(&pool, plate.id, &plate.barcode, 2, 2)
        .await
        .unwrap();

    let run = OntRunRepo::create_with_flowcells(
        &pool,
        &[
            CreateOntFlowcell {
                position: 1,
                ont_library_id: libraries[0].id,
            },
            CreateOntFlowcell {
                position: 2,
                ont_library_id: libraries[1].id,
            },
        ],
    )
    .await
    .unwrap();

    assert_eq!(run.run.state, "pending");
    assert_eq!(run.flowcells.len(), 2);

    let found = OntRunRepo::find_with_flowcells(&pool, run.run.id).await.unwrap().unwrap();
    assert_eq!(found.flowcells[0].position, 1);
    assert_eq!(found.flowcells[1].position, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn flowcell_position_out_of_range_is_rejected(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();
    let libraries = OntLibraryRepo::create_pools(&pool, plate.id, &plate.barcode, 1, 2)
        .await
        .unwrap();

    let result = OntRunRepo::create_with_flowcells(
        &pool,
        &[CreateOntFlowcell {
            position: 6,
            ont_library_id: libraries[0].id,
        }],
    )
    .await;

    assert!(result.is_err());
    // The run row must not survive the rollback.
    assert!(OntRunRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn message_rows_join_flowcells_to_samples_and_tags(pool: PgPool) {
    let tags = seed_tag_set(&pool).await;
    let plate = OntPlateRepo::create_with_graph(&pool, &plate_attributes("PLATE-1234"), &tags)
        .await
        .unwrap();
    let libraries = OntLibraryRepo::create_pools(&pool, plate.id, &plate.barcode, 1, 2)
        .await
        .unwrap();
    let run = OntRunRepo::create_with_flowcells(
        &pool,
        &[CreateOntFlowcell {
            position: 1,
            ont_library_id: libraries[0].id,
        }],
    )
    .await
    .unwrap();

    let rows = OntRunRepo::flowcell_message_rows(&pool, run.run.id).await.unwrap();

    // Three sample requests on the plate, all reachable from the flowcell.
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|row| row.position == 1));
    assert!(rows.iter().all(|row| row.library_name == "PLATE-1234-1"));

    let tagged: Vec<_> = rows.iter().filter(|row| row.tag_oligo.is_some()).collect();
    assert_eq!(tagged.len(), 2);
    assert_eq!(tagged[0].tag_set_name.as_deref(), Some("ont_native_96"));
}
