//! Opportunity entity model and DTOs.

use oppboard_core::lifecycle::Partition;
use oppboard_core::observations::ObservationEntry;
use oppboard_core::record::{PipelineRecord, ResponsibleIds};
use oppboard_core::semaphore::CellColor;
use oppboard_core::submission::{Assignments, Submission};
use oppboard_core::types::{CalendarDate, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use super::nullable;

/// A row from the `opportunities` table with catalog names joined in.
///
/// The `*_name` columns come from `LEFT JOIN`s and are `None` when the
/// reference is unset or points at a catalog entry that no longer exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Opportunity {
    pub id: DbId,
    pub name: Option<String>,

    pub account_id: Option<DbId>,
    pub account_name: Option<String>,
    pub status_id: Option<DbId>,
    pub status_name: Option<String>,
    pub opportunity_type_id: Option<DbId>,
    pub opportunity_type_name: Option<String>,
    pub document_type_id: Option<DbId>,
    pub document_type_name: Option<String>,

    pub manager_id: Option<DbId>,
    pub manager_name: Option<String>,
    pub dc_id: Option<DbId>,
    pub dc_name: Option<String>,
    pub business_id: Option<DbId>,
    pub business_name: Option<String>,
    pub tech_id: Option<DbId>,
    pub tech_name: Option<String>,

    pub percentage: i32,
    pub color_code: String,
    pub reason: Option<String>,

    pub start_date: Option<CalendarDate>,
    pub engagement_date: Option<CalendarDate>,
    pub scope_date: Option<CalendarDate>,
    pub coe_date: Option<CalendarDate>,
    pub delivery_date: Option<CalendarDate>,
    pub real_delivery_date: Option<CalendarDate>,

    pub k_red_index: i32,
    pub order_index: i32,

    pub hours: Option<i32>,
    pub term: Option<i32>,
    pub work_plan_link: Option<String>,
    pub has_ai_proposal: bool,
    pub has_prototype: bool,

    pub observations: Option<String>,
    pub observation_history: Json<Vec<ObservationEntry>>,

    pub is_archived: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Opportunity {
    /// Lifecycle partition derived from the archive flag and `deleted_at`.
    pub fn partition(&self) -> Partition {
        Partition::from_flags(self.is_archived, self.deleted_at.is_some())
    }

    /// Parsed semaphore color. The column is CHECK-constrained, so the
    /// fallback only applies to rows written outside the application.
    pub fn cell_color(&self) -> CellColor {
        self.color_code.parse().unwrap_or_default()
    }

    pub fn history(&self) -> &[ObservationEntry] {
        &self.observation_history.0
    }

    pub fn assignments(&self) -> Assignments {
        Assignments {
            account_id: self.account_id,
            status_id: self.status_id,
            opportunity_type_id: self.opportunity_type_id,
            document_type_id: self.document_type_id,
            responsible: PipelineRecord::responsible(self),
        }
    }
}

impl PipelineRecord for Opportunity {
    fn id(&self) -> DbId {
        self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn account_id(&self) -> Option<DbId> {
        self.account_id
    }

    fn status_id(&self) -> Option<DbId> {
        self.status_id
    }

    fn status_name(&self) -> Option<&str> {
        self.status_name.as_deref()
    }

    fn color(&self) -> CellColor {
        self.cell_color()
    }

    fn k_red_index(&self) -> i32 {
        self.k_red_index
    }

    fn responsible(&self) -> ResponsibleIds {
        ResponsibleIds {
            manager: self.manager_id,
            dc: self.dc_id,
            business: self.business_id,
            tech: self.tech_id,
        }
    }

    fn searchable_names(&self) -> Vec<&str> {
        [
            &self.account_name,
            &self.manager_name,
            &self.dc_name,
            &self.business_name,
            &self.tech_name,
        ]
        .into_iter()
        .filter_map(|n| n.as_deref())
        .collect()
    }
}

/// DTO for creating a new opportunity.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateOpportunity {
    #[validate(length(max = 255, message = "Opportunity name is too long"))]
    pub name: Option<String>,
    pub account_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub opportunity_type_id: Option<DbId>,
    pub document_type_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub dc_id: Option<DbId>,
    pub business_id: Option<DbId>,
    pub tech_id: Option<DbId>,

    #[serde(default)]
    pub percentage: i32,
    #[serde(default, alias = "color_code")]
    pub color: CellColor,
    pub reason: Option<String>,

    pub start_date: Option<CalendarDate>,
    pub engagement_date: Option<CalendarDate>,
    pub scope_date: Option<CalendarDate>,
    pub coe_date: Option<CalendarDate>,
    pub delivery_date: Option<CalendarDate>,
    pub real_delivery_date: Option<CalendarDate>,

    #[serde(default)]
    pub k_red_index: i32,
    #[serde(default)]
    pub order_index: i32,

    #[validate(range(min = 0, message = "Hours cannot be negative"))]
    pub hours: Option<i32>,
    #[validate(range(min = 0, message = "Term cannot be negative"))]
    pub term: Option<i32>,
    #[validate(length(max = 2048, message = "Work plan link is too long"))]
    pub work_plan_link: Option<String>,
    #[serde(default)]
    pub has_ai_proposal: bool,
    #[serde(default)]
    pub has_prototype: bool,

    /// Initial note; recorded as the first history entry.
    pub observations: Option<String>,
}

impl CreateOpportunity {
    pub fn submission(&self) -> Submission<'_> {
        Submission {
            name: self.name.as_deref(),
            account_id: self.account_id,
            status_id: self.status_id,
            color: self.color,
            percentage: self.percentage,
        }
    }

    pub fn assignments(&self) -> Assignments {
        Assignments {
            account_id: self.account_id,
            status_id: self.status_id,
            opportunity_type_id: self.opportunity_type_id,
            document_type_id: self.document_type_id,
            responsible: ResponsibleIds {
                manager: self.manager_id,
                dc: self.dc_id,
                business: self.business_id,
                tech: self.tech_id,
            },
        }
    }
}

/// DTO for updating an existing opportunity. All fields are optional.
///
/// Fields the record may leave blank are doubly optional: omitted keeps the
/// stored value, `null` clears it. Name, account and status are required on
/// every record, so `null` is treated as omitted for them.
///
/// Observation history is edited through its own operations, not here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOpportunity {
    #[validate(length(max = 255, message = "Opportunity name is too long"))]
    pub name: Option<String>,
    pub account_id: Option<DbId>,
    pub status_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub opportunity_type_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub document_type_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub manager_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub dc_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub business_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tech_id: Option<Option<DbId>>,

    pub percentage: Option<i32>,
    #[serde(alias = "color_code")]
    pub color: Option<CellColor>,
    #[serde(default, deserialize_with = "nullable")]
    pub reason: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub start_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub engagement_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub scope_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub coe_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub delivery_date: Option<Option<CalendarDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub real_delivery_date: Option<Option<CalendarDate>>,

    pub k_red_index: Option<i32>,
    pub order_index: Option<i32>,

    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0, message = "Hours cannot be negative"))]
    pub hours: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0, message = "Term cannot be negative"))]
    pub term: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2048, message = "Work plan link is too long"))]
    pub work_plan_link: Option<Option<String>>,
    pub has_ai_proposal: Option<bool>,
    pub has_prototype: Option<bool>,
}

/// Apply a clearable patch field over the stored value.
fn patched<T: Copy>(field: Option<Option<T>>, current: Option<T>) -> Option<T> {
    field.unwrap_or(current)
}

impl UpdateOpportunity {
    /// The submission that results from applying this patch to `current`.
    pub fn submission_over<'a>(&'a self, current: &'a Opportunity) -> Submission<'a> {
        Submission {
            name: self.name.as_deref().or(current.name.as_deref()),
            account_id: self.account_id.or(current.account_id),
            status_id: self.status_id.or(current.status_id),
            color: self.color.unwrap_or_else(|| current.cell_color()),
            percentage: self.percentage.unwrap_or(current.percentage),
        }
    }

    /// Catalog references after applying this patch to `current`.
    pub fn assignments_over(&self, current: &Opportunity) -> Assignments {
        let before = current.assignments();
        Assignments {
            account_id: self.account_id.or(before.account_id),
            status_id: self.status_id.or(before.status_id),
            opportunity_type_id: patched(self.opportunity_type_id, before.opportunity_type_id),
            document_type_id: patched(self.document_type_id, before.document_type_id),
            responsible: ResponsibleIds {
                manager: patched(self.manager_id, before.responsible.manager),
                dc: patched(self.dc_id, before.responsible.dc),
                business: patched(self.business_id, before.responsible.business),
                tech: patched(self.tech_id, before.responsible.tech),
            },
        }
    }
}
