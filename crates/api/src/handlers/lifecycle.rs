//! Shared execution of lifecycle actions.
//!
//! The state machine in `oppboard_core::lifecycle` decides what an action
//! does to the record's current partition; this module performs the move.
//! Actions that no longer apply (record gone, already moved, double click)
//! are reported as unchanged with a notice instead of failing.

use oppboard_core::lifecycle::{transition, LifecycleAction, Partition, SkipReason, Transition};
use oppboard_core::types::DbId;
use oppboard_db::repositories::OpportunityRepo;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;

/// Result of a single lifecycle request.
#[derive(Debug, Serialize)]
pub struct LifecycleOutcome {
    pub id: DbId,
    pub action: LifecycleAction,
    pub changed: bool,
    /// Partition after the request; `None` once purged or if the record
    /// does not exist.
    pub partition: Option<Partition>,
    pub notice: Option<String>,
}

impl LifecycleOutcome {
    fn unchanged(
        id: DbId,
        action: LifecycleAction,
        partition: Option<Partition>,
        notice: String,
    ) -> Self {
        Self {
            id,
            action,
            changed: false,
            partition,
            notice: Some(notice),
        }
    }
}

/// Apply `action` to opportunity `id`.
pub async fn apply(
    pool: &PgPool,
    id: DbId,
    action: LifecycleAction,
) -> AppResult<LifecycleOutcome> {
    let Some(current) = OpportunityRepo::find_by_id_include_deleted(pool, id).await? else {
        tracing::debug!(id, %action, "Lifecycle action on missing opportunity");
        return Ok(LifecycleOutcome::unchanged(
            id,
            action,
            None,
            format!("Opportunity {id} no longer exists"),
        ));
    };

    let target = match transition(current.partition(), action) {
        Transition::Skip { current, reason } => {
            tracing::debug!(
                id,
                %action,
                partition = %current,
                ?reason,
                "Lifecycle action skipped"
            );
            let notice = match reason {
                SkipReason::AlreadyThere => format!("Opportunity {id} is already {current}"),
                SkipReason::NotInExpectedPartition => {
                    format!("Opportunity {id} is {current}; {action} does not apply")
                }
            };
            return Ok(LifecycleOutcome::unchanged(id, action, Some(current), notice));
        }
        Transition::Move { to, .. } => Some(to),
        Transition::Remove => None,
    };

    if !execute(pool, id, action).await? {
        // Lost a race with a concurrent move; report the fresh state.
        let now = OpportunityRepo::find_by_id_include_deleted(pool, id)
            .await?
            .map(|o| o.partition());
        tracing::debug!(id, %action, "Lifecycle action lost a concurrent update");
        return Ok(LifecycleOutcome::unchanged(
            id,
            action,
            now,
            format!("Opportunity {id} changed before {action} could apply"),
        ));
    }

    match target {
        Some(partition) => tracing::info!(id, %action, %partition, "Opportunity moved"),
        None => tracing::info!(id, "Opportunity permanently deleted"),
    }
    Ok(LifecycleOutcome {
        id,
        action,
        changed: true,
        partition: target,
        notice: None,
    })
}

/// Run the guarded store operation for `action`. Returns whether a row changed.
async fn execute(pool: &PgPool, id: DbId, action: LifecycleAction) -> Result<bool, sqlx::Error> {
    match action {
        LifecycleAction::Archive => OpportunityRepo::set_archived(pool, id, true).await,
        LifecycleAction::Unarchive => OpportunityRepo::set_archived(pool, id, false).await,
        LifecycleAction::Trash => OpportunityRepo::soft_delete(pool, id).await,
        LifecycleAction::RestoreFromTrash => OpportunityRepo::restore(pool, id).await,
        LifecycleAction::Purge => OpportunityRepo::hard_delete(pool, id).await,
    }
}
