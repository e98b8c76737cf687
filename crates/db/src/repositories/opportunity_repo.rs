//! Repository for the `opportunities` table.
//!
//! Partition moves are guarded in SQL on the source partition, so a move
//! that lost a race (or was repeated) affects no rows and reports `false`
//! instead of duplicating or resurrecting a record.

use oppboard_core::lifecycle::Partition;
use oppboard_core::observations::{self, ObservationEntry};
use oppboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::opportunity::{CreateOpportunity, Opportunity, UpdateOpportunity};

/// Column list over the `o` alias, with catalog names resolved.
const COLUMNS: &str = "o.id, o.name, \
    o.account_id, a.name AS account_name, \
    o.status_id, s.name AS status_name, \
    o.opportunity_type_id, ot.name AS opportunity_type_name, \
    o.document_type_id, dt.name AS document_type_name, \
    o.manager_id, m.full_name AS manager_name, \
    o.dc_id, dc.full_name AS dc_name, \
    o.business_id, b.full_name AS business_name, \
    o.tech_id, t.full_name AS tech_name, \
    o.percentage, o.color_code, o.reason, \
    o.start_date, o.engagement_date, o.scope_date, o.coe_date, \
    o.delivery_date, o.real_delivery_date, \
    o.k_red_index, o.order_index, \
    o.hours, o.term, o.work_plan_link, o.has_ai_proposal, o.has_prototype, \
    o.observations, o.observation_history, \
    o.is_archived, o.deleted_at, o.created_at, o.updated_at";

/// Soft-reference joins. Missing catalog entries yield NULL names.
const JOINS: &str = "LEFT JOIN accounts a ON a.id = o.account_id \
    LEFT JOIN opportunity_statuses s ON s.id = o.status_id \
    LEFT JOIN opportunity_types ot ON ot.id = o.opportunity_type_id \
    LEFT JOIN document_types dt ON dt.id = o.document_type_id \
    LEFT JOIN employees m ON m.id = o.manager_id \
    LEFT JOIN employees dc ON dc.id = o.dc_id \
    LEFT JOIN employees b ON b.id = o.business_id \
    LEFT JOIN employees t ON t.id = o.tech_id";

/// Provides persistence and partition moves for opportunities.
pub struct OpportunityRepo;

impl OpportunityRepo {
    /// Insert a new opportunity, returning the created row.
    ///
    /// `is_archived` places the record directly in History (closed status
    /// at creation). `history` seeds the observation log; `observations`
    /// is derived from its newest entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOpportunity,
        history: &[ObservationEntry],
        is_archived: bool,
    ) -> Result<Opportunity, sqlx::Error> {
        let query = format!(
            "WITH o AS (
                INSERT INTO opportunities (
                    name, account_id, status_id, opportunity_type_id, document_type_id,
                    manager_id, dc_id, business_id, tech_id,
                    percentage, color_code, reason,
                    start_date, engagement_date, scope_date, coe_date,
                    delivery_date, real_delivery_date,
                    k_red_index, order_index,
                    hours, term, work_plan_link, has_ai_proposal, has_prototype,
                    observations, observation_history, is_archived
                ) VALUES (
                    $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                    $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26, $27, $28
                )
                RETURNING *
             )
             SELECT {COLUMNS} FROM o {JOINS}"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.account_id)
            .bind(input.status_id)
            .bind(input.opportunity_type_id)
            .bind(input.document_type_id)
            .bind(input.manager_id)
            .bind(input.dc_id)
            .bind(input.business_id)
            .bind(input.tech_id)
            .bind(input.percentage)
            .bind(input.color.as_str())
            .bind(&input.reason)
            .bind(input.start_date)
            .bind(input.engagement_date)
            .bind(input.scope_date)
            .bind(input.coe_date)
            .bind(input.delivery_date)
            .bind(input.real_delivery_date)
            .bind(input.k_red_index)
            .bind(input.order_index)
            .bind(input.hours)
            .bind(input.term)
            .bind(&input.work_plan_link)
            .bind(input.has_ai_proposal)
            .bind(input.has_prototype)
            .bind(observations::latest_text(history))
            .bind(Json(history))
            .bind(is_archived)
            .fetch_one(pool)
            .await
    }

    /// Find an opportunity by ID. Excludes trashed rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM opportunities o {JOINS} \
             WHERE o.id = $1 AND o.deleted_at IS NULL"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an opportunity by ID in any partition, trash included.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM opportunities o {JOINS} WHERE o.id = $1");
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every opportunity in one partition.
    ///
    /// History is returned most recently moved first and trash most
    /// recently deleted first. Active rows come back by id; ranking them
    /// is left to the ordering engine.
    pub async fn list(
        pool: &PgPool,
        partition: Partition,
    ) -> Result<Vec<Opportunity>, sqlx::Error> {
        let filter = match partition {
            Partition::Active => "o.deleted_at IS NULL AND o.is_archived = FALSE ORDER BY o.id",
            Partition::Archived => {
                "o.deleted_at IS NULL AND o.is_archived = TRUE \
                 ORDER BY o.updated_at DESC, o.id DESC"
            }
            Partition::Trashed => "o.deleted_at IS NOT NULL ORDER BY o.deleted_at DESC, o.id DESC",
        };
        let query = format!("SELECT {COLUMNS} FROM opportunities o {JOINS} WHERE {filter}");
        sqlx::query_as::<_, Opportunity>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update an active opportunity. Only supplied fields are applied.
    ///
    /// Clearable columns take a `provided` flag and a value, so that an
    /// explicit `null` writes `NULL` while an omitted field keeps the column.
    ///
    /// Returns `None` if no active row with the given `id` exists; archived
    /// and trashed rows are read-only.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOpportunity,
    ) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!(
            "WITH o AS (
                UPDATE opportunities SET
                    name = COALESCE($2, name),
                    account_id = COALESCE($3, account_id),
                    status_id = COALESCE($4, status_id),
                    opportunity_type_id =
                        CASE WHEN $5 THEN $6 ELSE opportunity_type_id END,
                    document_type_id = CASE WHEN $7 THEN $8 ELSE document_type_id END,
                    manager_id = CASE WHEN $9 THEN $10 ELSE manager_id END,
                    dc_id = CASE WHEN $11 THEN $12 ELSE dc_id END,
                    business_id = CASE WHEN $13 THEN $14 ELSE business_id END,
                    tech_id = CASE WHEN $15 THEN $16 ELSE tech_id END,
                    percentage = COALESCE($17, percentage),
                    color_code = COALESCE($18, color_code),
                    reason = CASE WHEN $19 THEN $20 ELSE reason END,
                    start_date = CASE WHEN $21 THEN $22 ELSE start_date END,
                    engagement_date = CASE WHEN $23 THEN $24 ELSE engagement_date END,
                    scope_date = CASE WHEN $25 THEN $26 ELSE scope_date END,
                    coe_date = CASE WHEN $27 THEN $28 ELSE coe_date END,
                    delivery_date = CASE WHEN $29 THEN $30 ELSE delivery_date END,
                    real_delivery_date =
                        CASE WHEN $31 THEN $32 ELSE real_delivery_date END,
                    k_red_index = COALESCE($33, k_red_index),
                    order_index = COALESCE($34, order_index),
                    hours = CASE WHEN $35 THEN $36 ELSE hours END,
                    term = CASE WHEN $37 THEN $38 ELSE term END,
                    work_plan_link = CASE WHEN $39 THEN $40 ELSE work_plan_link END,
                    has_ai_proposal = COALESCE($41, has_ai_proposal),
                    has_prototype = COALESCE($42, has_prototype)
                WHERE id = $1 AND deleted_at IS NULL AND is_archived = FALSE
                RETURNING *
             )
             SELECT {COLUMNS} FROM o {JOINS}"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.account_id)
            .bind(input.status_id)
            .bind(input.opportunity_type_id.is_some())
            .bind(input.opportunity_type_id.flatten())
            .bind(input.document_type_id.is_some())
            .bind(input.document_type_id.flatten())
            .bind(input.manager_id.is_some())
            .bind(input.manager_id.flatten())
            .bind(input.dc_id.is_some())
            .bind(input.dc_id.flatten())
            .bind(input.business_id.is_some())
            .bind(input.business_id.flatten())
            .bind(input.tech_id.is_some())
            .bind(input.tech_id.flatten())
            .bind(input.percentage)
            .bind(input.color.map(|c| c.as_str()))
            .bind(input.reason.is_some())
            .bind(input.reason.as_ref().and_then(|v| v.as_deref()))
            .bind(input.start_date.is_some())
            .bind(input.start_date.flatten())
            .bind(input.engagement_date.is_some())
            .bind(input.engagement_date.flatten())
            .bind(input.scope_date.is_some())
            .bind(input.scope_date.flatten())
            .bind(input.coe_date.is_some())
            .bind(input.coe_date.flatten())
            .bind(input.delivery_date.is_some())
            .bind(input.delivery_date.flatten())
            .bind(input.real_delivery_date.is_some())
            .bind(input.real_delivery_date.flatten())
            .bind(input.k_red_index)
            .bind(input.order_index)
            .bind(input.hours.is_some())
            .bind(input.hours.flatten())
            .bind(input.term.is_some())
            .bind(input.term.flatten())
            .bind(input.work_plan_link.is_some())
            .bind(input.work_plan_link.as_ref().and_then(|v| v.as_deref()))
            .bind(input.has_ai_proposal)
            .bind(input.has_prototype)
            .fetch_optional(pool)
            .await
    }

    /// Replace the observation history of an active opportunity and
    /// recompute `observations` from its newest entry.
    pub async fn replace_observations(
        pool: &PgPool,
        id: DbId,
        history: &[ObservationEntry],
    ) -> Result<Option<Opportunity>, sqlx::Error> {
        let query = format!(
            "WITH o AS (
                UPDATE opportunities SET observation_history = $2, observations = $3
                WHERE id = $1 AND deleted_at IS NULL AND is_archived = FALSE
                RETURNING *
             )
             SELECT {COLUMNS} FROM o {JOINS}"
        );
        sqlx::query_as::<_, Opportunity>(&query)
            .bind(id)
            .bind(Json(history))
            .bind(observations::latest_text(history))
            .fetch_optional(pool)
            .await
    }

    /// Move between Active and History. Returns `true` if the row moved.
    ///
    /// Only rows currently on the opposite side and not trashed qualify,
    /// so archiving an archived row is a no-op.
    pub async fn set_archived(
        pool: &PgPool,
        id: DbId,
        archived: bool,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE opportunities SET is_archived = $2 \
             WHERE id = $1 AND deleted_at IS NULL AND is_archived = NOT $2",
        )
        .bind(id)
        .bind(archived)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Archive a batch of active opportunities in one statement.
    ///
    /// Returns the ids that actually moved; ids no longer active are
    /// skipped.
    pub async fn archive_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar::<_, DbId>(
            "UPDATE opportunities SET is_archived = TRUE \
             WHERE id = ANY($1) AND deleted_at IS NULL AND is_archived = FALSE \
             RETURNING id",
        )
        .bind(ids)
        .fetch_all(pool)
        .await
    }

    /// Soft-delete (trash) an opportunity from Active or History.
    /// Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE opportunities SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a trashed opportunity. It always lands in Active, whatever
    /// partition it was trashed from. Returns `true` if a row was restored.
    pub async fn restore(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE opportunities SET deleted_at = NULL, is_archived = FALSE \
             WHERE id = $1 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete a trashed opportunity. Rows outside the trash are
    /// never removed. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM opportunities WHERE id = $1 AND deleted_at IS NOT NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently delete every trashed opportunity. Returns the count removed.
    pub async fn purge_trash(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM opportunities WHERE deleted_at IS NOT NULL")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Number of Active opportunities referencing an account.
    pub async fn count_active_for_account(
        pool: &PgPool,
        account_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM opportunities \
             WHERE account_id = $1 AND is_archived = FALSE AND deleted_at IS NULL",
        )
        .bind(account_id)
        .fetch_one(pool)
        .await
    }
}
