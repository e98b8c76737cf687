//! Employee entity model and DTOs.

use oppboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `employees` table, with the job role name joined in.
///
/// `role_name` is `None` when the employee has no role or the role was
/// removed from the catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub full_name: String,
    pub role_id: Option<DbId>,
    pub role_name: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Employee name is required"))]
    pub full_name: String,
    pub role_id: Option<DbId>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing employee. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, message = "Employee name cannot be empty"))]
    pub full_name: Option<String>,
    pub role_id: Option<DbId>,
    pub is_active: Option<bool>,
}
