//! Integration tests for observation history persistence.

use chrono::NaiveDate;
use oppboard_core::observations::{self, ObservationEntry};
use oppboard_core::semaphore::CellColor;
use oppboard_db::models::opportunity::CreateOpportunity;
use oppboard_db::repositories::OpportunityRepo;
use sqlx::PgPool;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
}

fn new_opportunity() -> CreateOpportunity {
    CreateOpportunity {
        name: Some("Capacitación en RPA".to_string()),
        account_id: Some(3),
        status_id: Some(1),
        color: CellColor::None,
        percentage: 20,
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_initial_history_sets_latest_observation(pool: PgPool) {
    let history = vec![ObservationEntry {
        date: day(1),
        text: "Contacto inicial con el cliente.".to_string(),
    }];
    let opp = OpportunityRepo::create(&pool, &new_opportunity(), &history, false)
        .await
        .unwrap();

    assert_eq!(opp.history(), history.as_slice());
    assert_eq!(opp.observations.as_deref(), Some("Contacto inicial con el cliente."));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replace_observations_keeps_mirror_in_sync(pool: PgPool) {
    let opp = OpportunityRepo::create(&pool, &new_opportunity(), &[], false)
        .await
        .unwrap();

    let mut history = opp.history().to_vec();
    observations::record(&mut history, day(1), "Contacto inicial");
    observations::record(&mut history, day(5), "Cliente solicitó capacitación");
    let opp = OpportunityRepo::replace_observations(&pool, opp.id, &history)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(opp.history().len(), 2);
    assert_eq!(opp.observations.as_deref(), Some("Cliente solicitó capacitación"));

    let mut history = opp.history().to_vec();
    observations::remove(&mut history, 0).unwrap();
    observations::remove(&mut history, 0).unwrap();
    let opp = OpportunityRepo::replace_observations(&pool, opp.id, &history)
        .await
        .unwrap()
        .unwrap();
    assert!(opp.history().is_empty());
    assert!(opp.observations.is_none());
}
