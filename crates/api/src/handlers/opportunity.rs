//! Handlers for the `/opportunities` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use oppboard_core::catalog::{reference_label, CatalogKind};
use oppboard_core::dates::{days_diff, proposal_generation_time};
use oppboard_core::error::CoreError;
use oppboard_core::lifecycle::{
    is_closed_status, plan_sweep, LifecycleAction, ListView, Partition, SweepReport,
};
use oppboard_core::observations;
use oppboard_core::ordering::{arrange, OpportunityFilter};
use oppboard_core::semaphore::{validate_color_vs_percentage, CellColor};
use oppboard_core::submission::{
    check_assignments, check_delivery_date, validate_percentage, validate_submission,
};
use oppboard_core::types::{CalendarDate, DbId};
use oppboard_db::models::opportunity::{CreateOpportunity, Opportunity, UpdateOpportunity};
use oppboard_db::repositories::{CatalogSnapshotRepo, OpportunityRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::handlers::lifecycle::{self, LifecycleOutcome};
use crate::query::ConfirmParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Display labels for every catalog reference. A reference whose entry was
/// removed renders as a stale marker rather than disappearing.
#[derive(Debug, Serialize)]
pub struct ReferenceLabels {
    pub account: Option<String>,
    pub status: Option<String>,
    pub opportunity_type: Option<String>,
    pub document_type: Option<String>,
    pub manager: Option<String>,
    pub dc: Option<String>,
    pub business: Option<String>,
    pub tech: Option<String>,
}

/// An opportunity as returned by the API: the stored row plus its
/// partition, resolved labels and derived KPIs.
#[derive(Debug, Serialize)]
pub struct OpportunityView {
    #[serde(flatten)]
    pub record: Opportunity,
    pub color: CellColor,
    pub partition: Partition,
    pub labels: ReferenceLabels,
    /// Days from start to committed delivery.
    pub days_to_delivery: Option<i64>,
    /// Days from scope to actual delivery.
    pub proposal_generation_days: Option<i64>,
}

impl From<Opportunity> for OpportunityView {
    fn from(record: Opportunity) -> Self {
        let labels = ReferenceLabels {
            account: reference_label(record.account_id, record.account_name.as_deref()),
            status: reference_label(record.status_id, record.status_name.as_deref()),
            opportunity_type: reference_label(
                record.opportunity_type_id,
                record.opportunity_type_name.as_deref(),
            ),
            document_type: reference_label(
                record.document_type_id,
                record.document_type_name.as_deref(),
            ),
            manager: reference_label(record.manager_id, record.manager_name.as_deref()),
            dc: reference_label(record.dc_id, record.dc_name.as_deref()),
            business: reference_label(record.business_id, record.business_name.as_deref()),
            tech: reference_label(record.tech_id, record.tech_name.as_deref()),
        };
        Self {
            color: record.cell_color(),
            partition: record.partition(),
            labels,
            days_to_delivery: days_diff(record.start_date, record.delivery_date),
            proposal_generation_days: proposal_generation_time(
                record.scope_date,
                record.real_delivery_date,
            ),
            record,
        }
    }
}

/// Immediate feedback for a color / percentage pair.
#[derive(Debug, Serialize)]
pub struct ColorFeedback {
    pub is_valid: bool,
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    #[serde(default)]
    pub view: ListView,
}

#[derive(Debug, Deserialize)]
pub struct ColorCheckRequest {
    #[serde(default, alias = "color_code")]
    pub color: CellColor,
    pub percentage: i32,
}

#[derive(Debug, Deserialize)]
pub struct AddObservation {
    pub text: String,
    /// Defaults to today.
    pub date: Option<CalendarDate>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Opportunity",
        id,
    })
}

fn today() -> CalendarDate {
    Utc::now().date_naive()
}

/// Load an opportunity that must be Active to be edited.
async fn load_editable(state: &AppState, id: DbId) -> AppResult<Opportunity> {
    let current = OpportunityRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    match current.partition() {
        Partition::Active => Ok(current),
        other => Err(AppError::Core(CoreError::Conflict(format!(
            "Opportunity {id} is {other} and cannot be edited"
        )))),
    }
}

// ---------------------------------------------------------------------------
// Listing and reads
// ---------------------------------------------------------------------------

/// GET /api/v1/opportunities?view=on|on-out|trash
///
/// Filters apply to every view; only the active view is ranked.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ViewParams>,
    Query(filter): Query<OpportunityFilter>,
) -> AppResult<Json<DataResponse<Vec<OpportunityView>>>> {
    let records = OpportunityRepo::list(&state.pool, params.view.partition()).await?;
    let data = arrange(records, params.view, &filter)
        .into_iter()
        .map(OpportunityView::from)
        .collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/opportunities/{id}
///
/// Returns the record from any partition, trash included.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OpportunityView>>> {
    let record = OpportunityRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: record.into(),
    }))
}

/// POST /api/v1/opportunities/validate
///
/// Field-level color / percentage check without persisting anything.
pub async fn validate_color(
    Json(input): Json<ColorCheckRequest>,
) -> Json<DataResponse<ColorFeedback>> {
    let data = match validate_percentage(input.percentage) {
        Err(err) => ColorFeedback {
            is_valid: false,
            message: Some(err.to_string()),
        },
        Ok(()) => {
            let check = validate_color_vs_percentage(input.color, input.percentage);
            ColorFeedback {
                is_valid: check.is_valid,
                message: check.message.map(str::to_string),
            }
        }
    };
    Json(DataResponse { data })
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/opportunities
///
/// A record created with a won / lost status goes straight to History.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateOpportunity>,
) -> AppResult<(StatusCode, Json<DataResponse<OpportunityView>>)> {
    input.validate()?;
    validate_submission(&input.submission())?;

    let catalogs = CatalogSnapshotRepo::load(&state.pool).await?;
    check_assignments(&catalogs, &input.assignments(), None)?;
    check_delivery_date(
        state.config.delivery_date_policy,
        None,
        input.delivery_date,
        today(),
    )?;

    let archive_on_create = input
        .status_id
        .and_then(|id| catalogs.entry(CatalogKind::Statuses, id))
        .is_some_and(|status| is_closed_status(&status.name));

    let mut history = Vec::new();
    if let Some(text) = input.observations.as_deref() {
        observations::record(&mut history, today(), text);
    }

    let record = OpportunityRepo::create(&state.pool, &input, &history, archive_on_create).await?;
    tracing::info!(
        id = record.id,
        partition = %record.partition(),
        "Opportunity created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: record.into(),
        }),
    ))
}

/// PUT /api/v1/opportunities/{id}
///
/// Partial update of an active record. The merged record must pass the
/// same submit-time rules as a create.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOpportunity>,
) -> AppResult<Json<DataResponse<OpportunityView>>> {
    input.validate()?;
    let current = load_editable(&state, id).await?;
    validate_submission(&input.submission_over(&current))?;

    let catalogs = CatalogSnapshotRepo::load(&state.pool).await?;
    check_assignments(
        &catalogs,
        &input.assignments_over(&current),
        Some(&current.assignments()),
    )?;
    check_delivery_date(
        state.config.delivery_date_policy,
        current.delivery_date,
        input.delivery_date.flatten(),
        today(),
    )?;

    let record = OpportunityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Opportunity {id} left the active list before the update applied"
            )))
        })?;
    tracing::debug!(id, "Opportunity updated");
    Ok(Json(DataResponse {
        data: record.into(),
    }))
}

// ---------------------------------------------------------------------------
// Observation history
// ---------------------------------------------------------------------------

/// POST /api/v1/opportunities/{id}/observations
///
/// Prepends a note. Blank text is ignored and the record returned as is.
pub async fn add_observation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AddObservation>,
) -> AppResult<Json<DataResponse<OpportunityView>>> {
    let current = load_editable(&state, id).await?;

    let mut history = current.history().to_vec();
    let date = input.date.unwrap_or_else(today);
    if !observations::record(&mut history, date, &input.text) {
        tracing::debug!(id, "Blank observation ignored");
        return Ok(Json(DataResponse {
            data: current.into(),
        }));
    }

    let record = OpportunityRepo::replace_observations(&state.pool, id, &history)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: record.into(),
    }))
}

/// DELETE /api/v1/opportunities/{id}/observations/{index}
///
/// Index 0 is the newest entry.
pub async fn remove_observation(
    State(state): State<AppState>,
    Path((id, index)): Path<(DbId, usize)>,
) -> AppResult<Json<DataResponse<OpportunityView>>> {
    let current = load_editable(&state, id).await?;

    let mut history = current.history().to_vec();
    observations::remove(&mut history, index)?;

    let record = OpportunityRepo::replace_observations(&state.pool, id, &history)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: record.into(),
    }))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

async fn confirmed(
    state: &AppState,
    id: DbId,
    action: LifecycleAction,
    confirm: &ConfirmParams,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    confirm.require(action.confirmation_prompt())?;
    let data = lifecycle::apply(&state.pool, id, action).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/opportunities/{id}/archive?confirm=true
pub async fn archive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    confirmed(&state, id, LifecycleAction::Archive, &confirm).await
}

/// POST /api/v1/opportunities/{id}/unarchive?confirm=true
pub async fn unarchive(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    confirmed(&state, id, LifecycleAction::Unarchive, &confirm).await
}

/// DELETE /api/v1/opportunities/{id}?confirm=true
///
/// Moves the record to the trash from Active or History.
pub async fn trash(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<LifecycleOutcome>>> {
    confirmed(&state, id, LifecycleAction::Trash, &confirm).await
}

/// POST /api/v1/opportunities/archive-sweep?confirm=true
///
/// Moves every active record matching the auto-archive predicate to
/// History in a single statement.
pub async fn archive_sweep(
    State(state): State<AppState>,
    Query(confirm): Query<ConfirmParams>,
) -> AppResult<Json<DataResponse<SweepReport>>> {
    confirm.require("Archive every closed or high-urgency red opportunity?")?;

    let active = OpportunityRepo::list(&state.pool, Partition::Active).await?;
    let plan = plan_sweep(active);
    let candidates = plan.archive_ids();
    if candidates.is_empty() {
        tracing::debug!(kept = plan.to_keep.len(), "Archive sweep found nothing to archive");
        return Ok(Json(DataResponse {
            data: SweepReport::nothing(),
        }));
    }

    let moved = OpportunityRepo::archive_many(&state.pool, &candidates).await?;
    let report = if moved.is_empty() {
        SweepReport::nothing()
    } else {
        SweepReport::archived(moved)
    };
    tracing::info!(
        moved = report.moved,
        ids = ?report.ids,
        kept = plan.to_keep.len(),
        "Archive sweep completed"
    );
    Ok(Json(DataResponse { data: report }))
}
