//! Handlers for the trash bin: listing, restore and permanent deletion.

use axum::extract::{Path, Query, State};
use axum::Json;
use oppboard_core::lifecycle::{LifecycleAction, ListView, Partition};
use oppboard_core::ordering::{arrange, OpportunityFilter};
use oppboard_core::types::DbId;
use oppboard_db::repositories::OpportunityRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::lifecycle::{self, LifecycleOutcome};
use crate::handlers::opportunity::OpportunityView;
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PurgeReport {
    pub purged: u64,
}

/// GET /api/v1/trash
///
/// Most recently trashed first.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<OpportunityFilter>,
) -> AppResult<Json<DataResponse<Vec<OpportunityView>>>> {
    let records = OpportunityRepo::list(&state.pool, Partition::Trashed).await?;
    let data = arrange(records, ListView::Trash, &filter)
        .into_iter()
        .map(OpportunityView::from)
        .collect();
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/trash/{id}/restore?confirm=true
///
/// A restored record always lands in the active list.
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    let action = LifecycleAction::RestoreFromTrash;
    confirm.require(action.confirmation_prompt())?;
    let data = lifecycle::apply(&state.pool, id, action).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/trash/{id}?confirm=true
pub async fn purge_one(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    let action = LifecycleAction::Purge;
    confirm.require(action.confirmation_prompt())?;
    let data = lifecycle::apply(&state.pool, id, action).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /api/v1/trash?confirm=true
///
/// Permanently deletes everything in the trash.
pub async fn empty(
    State(state): State<AppState>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<PurgeReport>>> {
    confirm.require("Permanently delete every opportunity in the trash?")?;
    let purged = OpportunityRepo::purge_trash(&state.pool).await?;
    tracing::info!(purged, "Trash emptied");
    Ok(Json(DataResponse {
        data: PurgeReport { purged },
    }))
}
