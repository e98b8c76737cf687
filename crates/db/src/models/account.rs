//! Account entity model and DTOs.

use oppboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `accounts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub name: String,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAccount {
    #[validate(length(min = 1, message = "Account name is required"))]
    pub name: String,
    pub contact_name: Option<String>,
    #[validate(email(message = "Contact email is not a valid address"))]
    pub contact_email: Option<String>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating an existing account. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAccount {
    #[validate(length(min = 1, message = "Account name cannot be empty"))]
    pub name: Option<String>,
    pub contact_name: Option<String>,
    #[validate(email(message = "Contact email is not a valid address"))]
    pub contact_email: Option<String>,
    pub is_active: Option<bool>,
}
