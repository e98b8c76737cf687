//! Flat `{id, name}` catalogs: statuses, document types, opportunity
//! types, job roles and motives.
//!
//! All five tables share one shape, so a single row struct and DTO pair
//! serves every [`CatalogKind`](oppboard_core::catalog::CatalogKind).

use oppboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from any named catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NamedEntry {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or renaming a catalog entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveNamedEntry {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}
