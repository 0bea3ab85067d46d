//! Integration tests for the PacBio endpoints: request CRUD, the
//! library factory, run lifecycle, and well validation.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post_json, send_json};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

async fn create_sample(app: &axum::Router, name: &str) -> i64 {
    let data = create(
        app,
        "/api/v1/samples",
        json!({
            "name": name,
            "external_id": Uuid::new_v4(),
            "species": "human",
        }),
    )
    .await;
    data["id"].as_i64().expect("sample id")
}

async fn create_request(app: &axum::Router, sample_id: i64) -> i64 {
    let data = create(
        app,
        "/api/v1/pacbio/requests",
        json!({
            "library_type": "Standard",
            "estimated_yield": 100,
            "number_of_smrt_cells": 3,
            "cost_code": "S4699",
            "external_study_id": Uuid::new_v4(),
            "sample_id": sample_id,
        }),
    )
    .await;
    data["id"].as_i64().expect("request id")
}

async fn create_tag(app: &axum::Router, oligo: &str, group_id: &str) -> i64 {
    // Create the set on first use; ignore the conflict after that.
    let response = post_json(
        app.clone(),
        "/api/v1/tag-sets",
        json!({"name": "Sequel_16_barcodes_v3"}),
    )
    .await;
    let set_id = if response.status() == StatusCode::CREATED {
        body_json(response).await["data"]["id"].as_i64().unwrap()
    } else {
        let response = get(app.clone(), "/api/v1/tag-sets").await;
        body_json(response).await["data"][0]["id"].as_i64().unwrap()
    };

    let tags = create(
        app,
        &format!("/api/v1/tag-sets/{set_id}/tags"),
        json!({"tags": [{"oligo": oligo, "group_id": group_id}]}),
    )
    .await;
    tags[0]["id"].as_i64().expect("tag id")
}

fn library_payload(request_id: i64, tag_id: Option<i64>) -> serde_json::Value {
    json!({
        "volume": 1.11,
        "concentration": 2.22,
        "template_prep_kit_box_barcode": "LK1234567",
        "fragment_size": 100,
        "requests": [{"id": request_id, "tag_id": tag_id}],
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_create_and_list_with_sample_name(pool: PgPool) {
    let app = common::build_test_app(pool);
    let sample_id = create_sample(&app, "Sample 1").await;
    create_request(&app, sample_id).await;

    let response = get(app.clone(), "/api/v1/pacbio/requests").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["sample_name"], "Sample 1");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn request_for_unknown_sample_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/pacbio/requests",
        json!({
            "library_type": "Standard",
            "cost_code": "S4699",
            "external_study_id": Uuid::new_v4(),
            "sample_id": 9999,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Library factory
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn library_factory_creates_library_with_tube(pool: PgPool) {
    let app = common::build_test_app(pool);
    let sample_id = create_sample(&app, "Sample 1").await;
    let request_id = create_request(&app, sample_id).await;

    let data = create(
        &app,
        "/api/v1/pacbio/libraries",
        json!({"libraries": [library_payload(request_id, None)]}),
    )
    .await;
    assert_eq!(data.as_array().unwrap().len(), 1);

    let response = get(app.clone(), "/api/v1/pacbio/libraries").await;
    let json = body_json(response).await;
    let tube_barcode = json["data"][0]["tube_barcode"].as_str().unwrap();
    assert!(tube_barcode.starts_with("TRAC-"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn library_factory_collects_every_validation_error(pool: PgPool) {
    let app = common::build_test_app(pool);
    let sample_id = create_sample(&app, "Sample 1").await;
    let request_id = create_request(&app, sample_id).await;
    let tag_id = create_tag(&app, "CACATATCAGAGTGCG", "bc1001").await;

    // Two requests, one untagged, and the same request twice.
    let response = post_json(
        app.clone(),
        "/api/v1/pacbio/libraries",
        json!({"libraries": [{
            "volume": 1.11,
            "concentration": 2.22,
            "template_prep_kit_box_barcode": "LK1234567",
            "fragment_size": 100,
            "requests": [
                {"id": request_id, "tag_id": tag_id},
                {"id": request_id, "tag_id": null},
            ],
        }]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let errors = json["errors"].as_array().unwrap();
    let messages: Vec<_> = errors
        .iter()
        .map(|e| {
            (
                e["field"].as_str().unwrap().to_string(),
                e["message"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert!(messages.contains(&("request".into(), "is used more than once".into())));
    assert!(messages.contains(&("tag".into(), "must be present".into())));

    // Nothing was persisted.
    let response = get(app.clone(), "/api/v1/pacbio/libraries").await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn library_factory_rejects_duplicate_tags(pool: PgPool) {
    let app = common::build_test_app(pool);
    let sample_id = create_sample(&app, "Sample 1").await;
    let request_1 = create_request(&app, sample_id).await;
    let request_2 = create_request(&app, sample_id).await;
    let tag_id = create_tag(&app, "CACATATCAGAGTGCG", "bc1001").await;

    let response = post_json(
        app,
        "/api/v1/pacbio/libraries",
        json!({"libraries": [{
            "volume": 1.11,
            "concentration": 2.22,
            "template_prep_kit_box_barcode": "LK1234567",
            "fragment_size": 100,
            "requests": [
                {"id": request_1, "tag_id": tag_id},
                {"id": request_2, "tag_id": tag_id},
            ],
        }]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    let messages: Vec<_> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect();
    assert!(messages.contains(&"is used more than once".to_string()));
}

// ---------------------------------------------------------------------------
// Runs and wells
// ---------------------------------------------------------------------------

fn run_payload(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "system_name": "Sequel II",
        "binding_kit_box_barcode": "BK5678",
        "sequencing_kit_box_barcode": "SK9012",
        "dna_control_complex_box_barcode": "DC3456",
        "comments": "A Run Comment",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);

    let run = create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    let run_id = run["id"].as_i64().unwrap();
    assert_eq!(run["state"], "pending");

    let response = send_json(
        app.clone(),
        "PATCH",
        &format!("/api/v1/pacbio/runs/{run_id}"),
        json!({"state": "started"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["state"], "started");

    let response = delete(app.clone(), &format!("/api/v1/pacbio/runs/{run_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/pacbio/runs/{run_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_run_name_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;

    let response = post_json(app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_run_state_is_a_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    let run = create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    let run_id = run["id"].as_i64().unwrap();

    let response = send_json(
        app,
        "PATCH",
        &format!("/api/v1/pacbio/runs/{run_id}"),
        json!({"state": "paused"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn well_validation_reports_every_problem(pool: PgPool) {
    let app = common::build_test_app(pool);
    let run = create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    let run_id = run["id"].as_i64().unwrap();
    let plate = create(&app, &format!("/api/v1/pacbio/runs/{run_id}/plate"), json!({})).await;
    let plate_id = plate["id"].as_i64().unwrap();

    let response = post_json(
        app,
        "/api/v1/pacbio/wells",
        json!({
            "pacbio_plate_id": plate_id,
            "row": "Z",
            "column": "99",
            "movie_time": 31.0,
            "insert_size": 5,
            "on_plate_loading_concentration": 8.35,
            "generate_hifi": "Sometimes",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["errors"].as_array().unwrap().len(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn well_blank_ccs_analysis_output_is_stored_as_no(pool: PgPool) {
    let app = common::build_test_app(pool);
    let run = create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    let run_id = run["id"].as_i64().unwrap();
    let plate = create(&app, &format!("/api/v1/pacbio/runs/{run_id}/plate"), json!({})).await;
    let plate_id = plate["id"].as_i64().unwrap();

    let well = create(
        &app,
        "/api/v1/pacbio/wells",
        json!({
            "pacbio_plate_id": plate_id,
            "row": "A",
            "column": "1",
            "movie_time": 20.0,
            "insert_size": 100,
            "on_plate_loading_concentration": 8.35,
            "generate_hifi": "In SMRT Link",
            "ccs_analysis_output": "",
        }),
    )
    .await;

    assert_eq!(well["ccs_analysis_output"], "No");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_plate_on_a_run_is_a_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let run = create(&app, "/api/v1/pacbio/runs", run_payload("RUN-1")).await;
    let run_id = run["id"].as_i64().unwrap();

    create(&app, &format!("/api/v1/pacbio/runs/{run_id}/plate"), json!({})).await;
    let response = post_json(
        app,
        &format!("/api/v1/pacbio/runs/{run_id}/plate"),
        json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
