//! HTTP-level integration tests for the `/trash` endpoints.
//!
//! Records are created through the repository layer and moved through the
//! HTTP API.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post};
use oppboard_core::lifecycle::Partition;
use oppboard_core::semaphore::CellColor;
use oppboard_db::models::opportunity::CreateOpportunity;
use oppboard_db::repositories::OpportunityRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_opportunity(name: &str) -> CreateOpportunity {
    CreateOpportunity {
        name: Some(name.to_string()),
        account_id: Some(1),
        status_id: Some(1),
        color: CellColor::Red,
        percentage: 0,
        ..Default::default()
    }
}

async fn trashed(pool: &PgPool, name: &str, archived: bool) -> i64 {
    let opp = OpportunityRepo::create(pool, &new_opportunity(name), &[], archived)
        .await
        .unwrap();
    assert!(OpportunityRepo::soft_delete(pool, opp.id).await.unwrap());
    opp.id
}

async fn trash_ids(pool: &PgPool) -> Vec<i64> {
    let response = get(build_test_app(pool.clone()), "/api/v1/trash").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/trash lists trashed records, newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_trash(pool: PgPool) {
    assert!(trash_ids(&pool).await.is_empty());

    let first = trashed(&pool, "Primera", false).await;
    let second = trashed(&pool, "Segunda", true).await;

    assert_eq!(trash_ids(&pool).await, vec![second, first]);

    let response = get(build_test_app(pool), "/api/v1/trash?q=prim").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["partition"], "trashed");
}

// ---------------------------------------------------------------------------
// Test: restore always lands in Active, even for records trashed from History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_lands_in_active(pool: PgPool) {
    let id = trashed(&pool, "Desde historial", true).await;

    let response = post(
        build_test_app(pool.clone()),
        &format!("/api/v1/trash/{id}/restore?confirm=true"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], true);
    assert_eq!(json["data"]["partition"], "active");

    let opp = OpportunityRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(opp.partition(), Partition::Active);
    assert!(trash_ids(&pool).await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_requires_confirmation(pool: PgPool) {
    let id = trashed(&pool, "Sin confirmar", false).await;

    let response = post(
        build_test_app(pool.clone()),
        &format!("/api/v1/trash/{id}/restore"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(trash_ids(&pool).await, vec![id]);
}

// ---------------------------------------------------------------------------
// Test: purge only applies to trashed records
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_one_removes_permanently(pool: PgPool) {
    let id = trashed(&pool, "Purgar", false).await;

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/trash/{id}?confirm=true"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], true);
    assert!(json["data"]["partition"].is_null());

    assert!(OpportunityRepo::find_by_id_include_deleted(&pool, id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purge_of_active_record_is_refused_softly(pool: PgPool) {
    let opp = OpportunityRepo::create(&pool, &new_opportunity("Activa"), &[], false)
        .await
        .unwrap();

    let response = delete(
        build_test_app(pool.clone()),
        &format!("/api/v1/trash/{}?confirm=true", opp.id),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["changed"], false);
    assert_eq!(json["data"]["partition"], "active");

    assert!(OpportunityRepo::find_by_id(&pool, opp.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Test: DELETE /api/v1/trash empties the trash only
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_trash(pool: PgPool) {
    trashed(&pool, "Uno", false).await;
    trashed(&pool, "Dos", true).await;
    let kept = OpportunityRepo::create(&pool, &new_opportunity("Se queda"), &[], false)
        .await
        .unwrap();

    let refused = delete(build_test_app(pool.clone()), "/api/v1/trash").await;
    assert_eq!(refused.status(), StatusCode::BAD_REQUEST);
    assert_eq!(trash_ids(&pool).await.len(), 2);

    let response = delete(build_test_app(pool.clone()), "/api/v1/trash?confirm=true").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["purged"], 2);

    assert!(trash_ids(&pool).await.is_empty());
    assert!(OpportunityRepo::find_by_id(&pool, kept.id).await.unwrap().is_some());
}
