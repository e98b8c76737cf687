//! Repositories for the flat named catalogs and the combined snapshot.
//!
//! Table names come from [`CatalogKind::table`], a closed set of static
//! strings, so formatting them into queries cannot inject SQL.

use chrono::Utc;
use oppboard_core::catalog::{CatalogEntry, CatalogKind, CatalogSnapshot};
use oppboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{NamedEntry, SaveNamedEntry};

const COLUMNS: &str = "id, name, created_at, updated_at";

/// CRUD over any [`CatalogKind`] table.
pub struct NamedCatalogRepo;

impl NamedCatalogRepo {
    pub async fn create(
        pool: &PgPool,
        kind: CatalogKind,
        input: &SaveNamedEntry,
    ) -> Result<NamedEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} (name) VALUES ($1) RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, NamedEntry>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    /// List entries in id order (seed order for the built-in catalogs).
    pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<NamedEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {table} ORDER BY id", table = kind.table());
        sqlx::query_as::<_, NamedEntry>(&query).fetch_all(pool).await
    }

    /// Rename an entry. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        kind: CatalogKind,
        id: DbId,
        input: &SaveNamedEntry,
    ) -> Result<Option<NamedEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE {table} SET name = $2 WHERE id = $1 RETURNING {COLUMNS}",
            table = kind.table()
        );
        sqlx::query_as::<_, NamedEntry>(&query)
            .bind(id)
            .bind(input.name.trim())
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry. Returns `true` if a row was removed.
    ///
    /// Opportunities referencing a removed entry keep the dangling id,
    /// except for statuses, whose foreign key refuses the delete while any
    /// opportunity still uses them.
    pub async fn delete(pool: &PgPool, kind: CatalogKind, id: DbId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {table} WHERE id = $1", table = kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Loads every catalog at once for reference resolution.
pub struct CatalogSnapshotRepo;

impl CatalogSnapshotRepo {
    pub async fn load(pool: &PgPool) -> Result<CatalogSnapshot, sqlx::Error> {
        let accounts =
            Self::entries(pool, "SELECT id, name, is_active FROM accounts ORDER BY id").await?;
        let employees = Self::entries(
            pool,
            "SELECT id, full_name, is_active FROM employees ORDER BY id",
        )
        .await?;
        Ok(CatalogSnapshot {
            accounts,
            employees,
            statuses: Self::named(pool, CatalogKind::Statuses).await?,
            document_types: Self::named(pool, CatalogKind::DocumentTypes).await?,
            opportunity_types: Self::named(pool, CatalogKind::OpportunityTypes).await?,
            job_roles: Self::named(pool, CatalogKind::JobRoles).await?,
            motives: Self::named(pool, CatalogKind::Motives).await?,
            loaded_at: Utc::now(),
        })
    }

    async fn named(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let query = format!("SELECT id, name, TRUE FROM {table} ORDER BY id", table = kind.table());
        Self::entries(pool, &query).await
    }

    async fn entries(pool: &PgPool, query: &str) -> Result<Vec<CatalogEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (DbId, String, bool)>(query)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(id, name, is_active)| CatalogEntry {
                id,
                name,
                is_active,
            })
            .collect())
    }
}
