//! HTTP-level integration tests for catalogs, accounts and employees.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use oppboard_core::semaphore::CellColor;
use oppboard_db::models::opportunity::CreateOpportunity;
use oppboard_db::repositories::OpportunityRepo;
use serde_json::json;
use sqlx::PgPool;

fn new_opportunity(account_id: i64) -> CreateOpportunity {
    CreateOpportunity {
        name: Some("Integración ERP".to_string()),
        account_id: Some(account_id),
        status_id: Some(1),
        opportunity_type_id: Some(6),
        color: CellColor::None,
        percentage: 20,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/catalogs returns every seeded catalog
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_contains_all_catalogs(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/catalogs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["statuses"].as_array().unwrap().len(), 9);
    assert_eq!(data["statuses"][3]["name"], "Ganada");
    assert_eq!(data["accounts"].as_array().unwrap().len(), 6);
    assert_eq!(data["motives"].as_array().unwrap().len(), 4);
    assert!(data["employees"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["name"] == "Carlos Giorgi" && e["is_active"] == false));
}

// ---------------------------------------------------------------------------
// Test: named catalog CRUD by slug
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_named_catalog_create_rename_delete(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/catalogs/motives",
        json!({"name": "Alcance"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/catalogs/motives/{id}"),
        json!({"name": "Cambio de alcance"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["name"], "Cambio de alcance");

    let uri = format!("/api/v1/catalogs/motives/{id}");
    let response = delete(build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Motive with id {id} not found")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_catalog_kind_is_bad_request(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/catalogs/colors").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Unknown catalog: colors");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_catalog_name_is_conflict(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/catalogs/motives",
        json!({"name": "Precio"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_catalog_name_is_rejected(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/api/v1/catalogs/document-types",
        json!({"name": ""}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name is required");
}

// ---------------------------------------------------------------------------
// Test: removed references degrade to stale labels; statuses in use cannot go
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_reference_renders_stale_label(pool: PgPool) {
    let opp = OpportunityRepo::create(&pool, &new_opportunity(1), &[], false)
        .await
        .unwrap();

    let response = delete(
        build_test_app(pool.clone()),
        "/api/v1/catalogs/opportunity-types/6",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(
        build_test_app(pool),
        &format!("/api/v1/opportunities/{}", opp.id),
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["opportunity_type_id"], 6);
    assert_eq!(data["labels"]["opportunity_type"], "#6 (removed)");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_in_use_cannot_be_deleted(pool: PgPool) {
    OpportunityRepo::create(&pool, &new_opportunity(1), &[], false)
        .await
        .unwrap();

    let response = delete(build_test_app(pool), "/api/v1/catalogs/statuses/1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Test: accounts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_deactivation_guard(pool: PgPool) {
    let opp = OpportunityRepo::create(&pool, &new_opportunity(3), &[], false)
        .await
        .unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts/3",
        json!({"is_active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Once the opportunity leaves the active list the account may go.
    OpportunityRepo::set_archived(&pool, opp.id, true).await.unwrap();
    let response = put_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts/3",
        json!({"is_active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], false);

    let active = body_json(get(build_test_app(pool.clone()), "/api/v1/accounts").await).await;
    assert!(active["data"].as_array().unwrap().iter().all(|a| a["id"] != 3));

    let all = body_json(
        get(build_test_app(pool), "/api/v1/accounts?include_inactive=true").await,
    )
    .await;
    assert!(all["data"].as_array().unwrap().iter().any(|a| a["id"] == 3));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_create_validates_email(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts",
        json!({"name": "Banco Nación", "contact_email": "not-an-email"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(
        build_test_app(pool),
        "/api/v1/accounts",
        json!({"name": "Banco Nación", "contact_email": "compras@bna.com.ar"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["is_active"], true);
}

// ---------------------------------------------------------------------------
// Test: employees
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_employee_create_joins_role(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/employees",
        json!({"full_name": "Lucía Pérez", "role_id": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["role_name"], "DC");
    let id = data["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/employees/{id}"),
        json!({"is_active": false}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(build_test_app(pool), "/api/v1/employees/4242").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
