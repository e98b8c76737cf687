//! Repository for the `employees` table.

use oppboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::employee::{CreateEmployee, Employee, UpdateEmployee};

/// Column list over the `e` alias, with the job role name joined in.
const COLUMNS: &str =
    "e.id, e.full_name, e.role_id, r.name AS role_name, e.is_active, e.created_at, e.updated_at";

const JOINS: &str = "LEFT JOIN job_roles r ON r.id = e.role_id";

/// Provides CRUD operations for employees.
pub struct EmployeeRepo;

impl EmployeeRepo {
    /// Insert a new employee. `is_active` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateEmployee) -> Result<Employee, sqlx::Error> {
        let query = format!(
            "WITH e AS (
                INSERT INTO employees (full_name, role_id, is_active)
                VALUES ($1, $2, COALESCE($3, true))
                RETURNING *
             )
             SELECT {COLUMNS} FROM e {JOINS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(input.full_name.trim())
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM employees e {JOINS} WHERE e.id = $1");
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List employees by name, optionally including inactive ones.
    pub async fn list(pool: &PgPool, include_inactive: bool) -> Result<Vec<Employee>, sqlx::Error> {
        let query = if include_inactive {
            format!("SELECT {COLUMNS} FROM employees e {JOINS} ORDER BY e.full_name")
        } else {
            format!(
                "SELECT {COLUMNS} FROM employees e {JOINS} \
                 WHERE e.is_active = true \
                 ORDER BY e.full_name"
            )
        };
        sqlx::query_as::<_, Employee>(&query).fetch_all(pool).await
    }

    /// Update an employee. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEmployee,
    ) -> Result<Option<Employee>, sqlx::Error> {
        let query = format!(
            "WITH e AS (
                UPDATE employees SET
                    full_name = COALESCE($2, full_name),
                    role_id = COALESCE($3, role_id),
                    is_active = COALESCE($4, is_active)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM e {JOINS}"
        );
        sqlx::query_as::<_, Employee>(&query)
            .bind(id)
            .bind(input.full_name.as_deref().map(str::trim))
            .bind(input.role_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }
}
