//! Repository for the `accounts` table.

use oppboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::account::{Account, CreateAccount, UpdateAccount};

const COLUMNS: &str = "id, name, contact_name, contact_email, is_active, created_at, updated_at";

/// Provides CRUD operations for accounts. Accounts are deactivated, never
/// deleted, so opportunities referencing them keep resolving.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account. `is_active` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (name, contact_name, contact_email, is_active)
             VALUES ($1, $2, $3, COALESCE($4, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(input.name.trim())
            .bind(&input.contact_name)
            .bind(&input.contact_email)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List accounts by name, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Account>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM accounts ORDER BY name")
        } else {
            format!("SELECT {COLUMNS} FROM accounts WHERE is_active = true ORDER BY name")
        };
        sqlx::query_as::<_, Account>(&query).fetch_all(pool).await
    }

    /// Update an account. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccount,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!(
            "UPDATE accounts SET
                name = COALESCE($2, name),
                contact_name = COALESCE($3, contact_name),
                contact_email = COALESCE($4, contact_email),
                is_active = COALESCE($5, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.contact_name)
            .bind(&input.contact_email)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
