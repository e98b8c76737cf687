//! Handlers for the `/accounts` resource.
//!
//! Accounts are never deleted. Deactivation hides them from new
//! assignments but is refused while active opportunities still use them.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oppboard_core::error::CoreError;
use oppboard_core::types::DbId;
use oppboard_db::models::account::{CreateAccount, UpdateAccount};
use oppboard_db::repositories::{AccountRepo, OpportunityRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Account",
        id,
    })
}

/// GET /api/v1/accounts?include_inactive=true
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let accounts = AccountRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: accounts }))
}

/// POST /api/v1/accounts
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAccount>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let account = AccountRepo::create(&state.pool, &input).await?;

    tracing::info!(account_id = account.id, name = %account.name, "Account created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: account })))
}

/// GET /api/v1/accounts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let account = AccountRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: account }))
}

/// PUT /api/v1/accounts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    if input.is_active == Some(false) {
        let in_use = OpportunityRepo::count_active_for_account(&state.pool, id).await?;
        if in_use > 0 {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Account {id} has {in_use} active opportunities and cannot be deactivated"
            ))));
        }
    }

    let account = AccountRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(account_id = id, is_active = account.is_active, "Account updated");

    Ok(Json(DataResponse { data: account }))
}
