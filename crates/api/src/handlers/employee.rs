//! Handlers for the `/employees` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oppboard_core::error::CoreError;
use oppboard_core::types::DbId;
use oppboard_db::models::employee::{CreateEmployee, UpdateEmployee};
use oppboard_db::repositories::EmployeeRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/employees?include_inactive=true
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    let employees = EmployeeRepo::list(&state.pool, params.include_inactive).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// POST /api/v1/employees
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let employee = EmployeeRepo::create(&state.pool, &input).await?;

    tracing::info!(
        employee_id = employee.id,
        name = %employee.full_name,
        "Employee created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: employee })))
}

/// GET /api/v1/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let employee = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;
    Ok(Json(DataResponse { data: employee }))
}

/// PUT /api/v1/employees/{id}
///
/// Deactivating an employee leaves existing assignments in place.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let employee = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Employee",
            id,
        }))?;

    tracing::info!(employee_id = id, is_active = employee.is_active, "Employee updated");

    Ok(Json(DataResponse { data: employee }))
}
