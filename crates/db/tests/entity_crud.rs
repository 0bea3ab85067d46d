//! Integration tests for the PacBio repository layer against a real
//! database: the request → library → run → plate → well hierarchy,
//! cascade behaviour, and unique constraint violations.

use sqlx::PgPool;
use uuid::Uuid;

use benchline_core::factory::pacbio::{LibraryAttributes, RequestAttributes};
use benchline_db::models::pacbio_request::CreatePacbioRequest;
use benchline_db::models::pacbio_run::{CreatePacbioRun, UpdatePacbioRun};
use benchline_db::models::pacbio_well::CreatePacbioWell;
use benchline_db::models::sample::CreateSample;
use benchline_db::models::tag::{CreateTag, CreateTagSet};
use benchline_db::repositories::{
    PacbioLibraryRepo, PacbioRequestRepo, PacbioRunRepo, PacbioWellRepo, SampleRepo, TagRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_sample(name: &str) -> CreateSample {
    CreateSample {
        name: name.to_string(),
        external_id: Uuid::new_v4(),
        species: Some("human".to_string()),
    }
}

fn new_request(sample_id: i64) -> CreatePacbioRequest {
    CreatePacbioRequest {
        library_type: "Standard".to_string(),
        estimated_yield: Some(100),
        number_of_smrt_cells: Some(3),
        cost_code: "S4699".to_string(),
        external_study_id: Uuid::new_v4(),
        sample_id,
    }
}

fn new_run(name: &str) -> CreatePacbioRun {
    CreatePacbioRun {
        name: name.to_string(),
        system_name: "Sequel II".to_string(),
        binding_kit_box_barcode: "BK5678".to_string(),
        sequencing_kit_box_barcode: "SK9012".to_string(),
        dna_control_complex_box_barcode: "DC3456".to_string(),
        comments: None,
    }
}

fn new_well(plate_id: i64, row: &str, column: &str, library_ids: Vec<i64>) -> CreatePacbioWell {
    CreatePacbioWell {
        pacbio_plate_id: plate_id,
        row: row.to_string(),
        column: column.to_string(),
        movie_time: 20.0,
        insert_size: 100,
        on_plate_loading_concentration: 8.35,
        comment: None,
        generate_hifi: "In SMRT Link".to_string(),
        ccs_analysis_output: Some("Yes".to_string()),
        pre_extension_time: Some(2),
        library_ids,
    }
}

async fn create_library(pool: &PgPool, request_id: i64) -> i64 {
    let attributes = LibraryAttributes {
        volume: 1.11,
        concentration: 2.22,
        template_prep_kit_box_barcode: "LK1234567".to_string(),
        fragment_size: 100,
        requests: vec![RequestAttributes {
            id: request_id,
            tag_id: None,
        }],
    };
    PacbioLibraryRepo::create_batch(pool, &[attributes])
        .await
        .unwrap()[0]
        .id
}

// ---------------------------------------------------------------------------
// Samples and requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn sample_create_and_find(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();

    let found = SampleRepo::find_by_id(&pool, sample.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Sample 1");
    assert_eq!(found.external_id, sample.external_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_sample_external_id_is_a_unique_violation(pool: PgPool) {
    let input = new_sample("Sample 1");
    SampleRepo::create(&pool, &input).await.unwrap();

    let err = SampleRepo::create(&pool, &input).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_samples_external_id"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_list_includes_sample_name(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();

    let requests = PacbioRequestRepo::list(&pool).await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].sample_name, "Sample 1");
    assert_eq!(requests[0].cost_code, "S4699");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_ids_skips_missing_requests(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    let request = PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();

    let found = PacbioRequestRepo::find_by_ids(&pool, &[request.id, 9999]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, request.id);
}

// ---------------------------------------------------------------------------
// Library batch persistence
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn library_batch_creates_tube_library_and_joins(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    let request = PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();

    let tag_set = TagRepo::create_set(&pool, &CreateTagSet { name: "Sequel_16_barcodes_v3".to_string() })
        .await
        .unwrap();
    let tags = TagRepo::add_tags(
        &pool,
        tag_set.id,
        &[CreateTag {
            oligo: "ACGT".to_string(),
            group_id: "bc1001".to_string(),
        }],
    )
    .await
    .unwrap();

    let attributes = LibraryAttributes {
        volume: 1.11,
        concentration: 2.22,
        template_prep_kit_box_barcode: "LK1234567".to_string(),
        fragment_size: 100,
        requests: vec![RequestAttributes {
            id: request.id,
            tag_id: Some(tags[0].id),
        }],
    };

    let libraries = PacbioLibraryRepo::create_batch(&pool, &[attributes]).await.unwrap();
    assert_eq!(libraries.len(), 1);

    let listed = PacbioLibraryRepo::list(&pool).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].tube_barcode, format!("TRAC-{}", listed[0].tube_id));

    let joins = PacbioLibraryRepo::request_libraries(&pool, libraries[0].id).await.unwrap();
    assert_eq!(joins.len(), 1);
    assert_eq!(joins[0].pacbio_request_id, request.id);
    assert_eq!(joins[0].tag_id, Some(tags[0].id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn library_batch_rolls_back_on_bad_reference(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    let request = PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();

    let good = LibraryAttributes {
        volume: 1.11,
        concentration: 2.22,
        template_prep_kit_box_barcode: "LK1234567".to_string(),
        fragment_size: 100,
        requests: vec![RequestAttributes {
            id: request.id,
            tag_id: None,
        }],
    };
    let mut bad = good.clone();
    // Unknown request id trips the foreign key inside the transaction.
    bad.requests[0].id = 9999;

    let result = PacbioLibraryRepo::create_batch(&pool, &[good, bad]).await;
    assert!(result.is_err());

    // The first library must not survive the rollback.
    assert!(PacbioLibraryRepo::list(&pool).await.unwrap().is_empty());
    let tubes: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tubes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tubes.0, 0);
}

// ---------------------------------------------------------------------------
// Runs, plates, wells
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_create_update_and_state(pool: PgPool) {
    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    assert_eq!(run.state, "pending");

    let updated = PacbioRunRepo::update(
        &pool,
        run.id,
        &UpdatePacbioRun {
            name: None,
            state: Some("started".to_string()),
            system_name: None,
            binding_kit_box_barcode: None,
            sequencing_kit_box_barcode: None,
            dna_control_complex_box_barcode: None,
            comments: Some("loaded".to_string()),
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.state, "started");
    assert_eq!(updated.comments.as_deref(), Some("loaded"));
    assert_eq!(updated.name, "RUN-1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_plate_per_run(pool: PgPool) {
    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    PacbioRunRepo::create_plate(&pool, run.id).await.unwrap();

    let err = PacbioRunRepo::create_plate(&pool, run.id).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_pacbio_plates_run"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn well_create_links_libraries(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    let request = PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();
    let library_id = create_library(&pool, request.id).await;

    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    let plate = PacbioRunRepo::create_plate(&pool, run.id).await.unwrap();

    let well = PacbioWellRepo::create(&pool, &new_well(plate.id, "A", "1", vec![library_id]), "Yes")
        .await
        .unwrap();

    let libraries = PacbioWellRepo::libraries_for_well(&pool, well.id).await.unwrap();
    assert_eq!(libraries.len(), 1);
    assert_eq!(libraries[0].id, library_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_well_position_on_a_plate_is_rejected(pool: PgPool) {
    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    let plate = PacbioRunRepo::create_plate(&pool, run.id).await.unwrap();

    PacbioWellRepo::create(&pool, &new_well(plate.id, "A", "1", vec![]), "No")
        .await
        .unwrap();
    let err = PacbioWellRepo::create(&pool, &new_well(plate.id, "A", "1", vec![]), "No")
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_pacbio_wells_position"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_a_run_cascades_to_wells_but_not_libraries(pool: PgPool) {
    let sample = SampleRepo::create(&pool, &new_sample("Sample 1")).await.unwrap();
    let request = PacbioRequestRepo::create(&pool, &new_request(sample.id)).await.unwrap();
    let library_id = create_library(&pool, request.id).await;

    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    let plate = PacbioRunRepo::create_plate(&pool, run.id).await.unwrap();
    PacbioWellRepo::create(&pool, &new_well(plate.id, "A", "1", vec![library_id]), "No")
        .await
        .unwrap();

    assert!(PacbioRunRepo::delete(&pool, run.id).await.unwrap());

    let wells: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pacbio_wells")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(wells.0, 0);

    // The library survives the run deletion.
    assert!(PacbioLibraryRepo::find_by_id(&pool, library_id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn well_check_constraints_reject_out_of_range_values(pool: PgPool) {
    let run = PacbioRunRepo::create(&pool, &new_run("RUN-1")).await.unwrap();
    let plate = PacbioRunRepo::create_plate(&pool, run.id).await.unwrap();

    let mut well = new_well(plate.id, "A", "1", vec![]);
    well.movie_time = 31.0;
    assert!(PacbioWellRepo::create(&pool, &well, "No").await.is_err());

    let mut well = new_well(plate.id, "A", "2", vec![]);
    well.insert_size = 5;
    assert!(PacbioWellRepo::create(&pool, &well, "No").await.is_err());
}
