//! Submit-time gate for opportunity writes.
//!
//! Every create and update is validated against the merged record (stored
//! fields overlaid with the submitted ones) so that a partial update cannot
//! leave the color/percentage pair inconsistent.

use crate::catalog::{CatalogKind, CatalogSnapshot};
use crate::error::CoreError;
use crate::record::ResponsibleIds;
use crate::semaphore::{validate_color_vs_percentage, CellColor};
use crate::types::{CalendarDate, DbId};

pub const MIN_PERCENTAGE: i32 = 0;
pub const MAX_PERCENTAGE: i32 = 100;

/// Minimum length of an opportunity name after trimming.
pub const MIN_NAME_LENGTH: usize = 3;

pub const DELIVERY_IN_PAST_MESSAGE: &str = "Committed delivery date cannot be in the past";

/// Reject percentages outside `0..=100`.
///
/// The color rule itself does not bound the domain; this does.
pub fn validate_percentage(percentage: i32) -> Result<(), CoreError> {
    if (MIN_PERCENTAGE..=MAX_PERCENTAGE).contains(&percentage) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Percentage must be between {MIN_PERCENTAGE} and {MAX_PERCENTAGE}, got {percentage}"
        )))
    }
}

/// Fields checked at submit time.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub name: Option<&'a str>,
    pub account_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub color: CellColor,
    pub percentage: i32,
}

pub fn validate_submission(submission: &Submission<'_>) -> Result<(), CoreError> {
    let name = submission.name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(CoreError::Validation("Opportunity name is required".into()));
    }
    if name.chars().count() < MIN_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Opportunity name must be at least {MIN_NAME_LENGTH} characters"
        )));
    }
    if submission.account_id.is_none() {
        return Err(CoreError::Validation("Account is required".into()));
    }
    if submission.status_id.is_none() {
        return Err(CoreError::Validation("Status is required".into()));
    }
    validate_percentage(submission.percentage)?;
    validate_color_vs_percentage(submission.color, submission.percentage)
        .into_result()
        .map_err(|message| CoreError::Validation(message.to_string()))
}

/// Whether a committed delivery date may be set in the past.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeliveryDatePolicy {
    #[default]
    Unrestricted,
    NotPast,
}

impl DeliveryDatePolicy {
    pub fn from_flag(enforce: bool) -> Self {
        if enforce {
            DeliveryDatePolicy::NotPast
        } else {
            DeliveryDatePolicy::Unrestricted
        }
    }
}

/// Apply the delivery-date policy.
///
/// Only a newly supplied or changed date is checked, so records whose
/// committed date has since passed remain editable.
pub fn check_delivery_date(
    policy: DeliveryDatePolicy,
    previous: Option<CalendarDate>,
    submitted: Option<CalendarDate>,
    today: CalendarDate,
) -> Result<(), CoreError> {
    if policy == DeliveryDatePolicy::Unrestricted {
        return Ok(());
    }
    match submitted {
        Some(date) if Some(date) != previous && date < today => {
            Err(CoreError::Validation(DELIVERY_IN_PAST_MESSAGE.into()))
        }
        _ => Ok(()),
    }
}

/// Catalog references carried by an opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Assignments {
    pub account_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub opportunity_type_id: Option<DbId>,
    pub document_type_id: Option<DbId>,
    pub responsible: ResponsibleIds,
}

fn changed(previous: Option<DbId>, submitted: Option<DbId>) -> Option<DbId> {
    submitted.filter(|id| Some(*id) != previous)
}

/// Check newly assigned references against the catalogs.
///
/// A reference that is unchanged from `previous` is accepted even if the
/// entry was since deactivated or removed. New assignments must resolve,
/// and accounts and employees must be active.
pub fn check_assignments(
    catalogs: &CatalogSnapshot,
    submitted: &Assignments,
    previous: Option<&Assignments>,
) -> Result<(), CoreError> {
    let prev = previous.copied().unwrap_or_default();

    if let Some(id) = changed(prev.account_id, submitted.account_id) {
        match catalogs.account(id) {
            None => return Err(CoreError::Validation(format!("Unknown account #{id}"))),
            Some(a) if !a.is_active => {
                return Err(CoreError::Validation(format!("Account '{}' is inactive", a.name)))
            }
            Some(_) => {}
        }
    }

    let named = [
        (CatalogKind::Statuses, "status", prev.status_id, submitted.status_id),
        (
            CatalogKind::OpportunityTypes,
            "opportunity type",
            prev.opportunity_type_id,
            submitted.opportunity_type_id,
        ),
        (
            CatalogKind::DocumentTypes,
            "document type",
            prev.document_type_id,
            submitted.document_type_id,
        ),
    ];
    for (kind, label, before, after) in named {
        if let Some(id) = changed(before, after) {
            if catalogs.entry(kind, id).is_none() {
                return Err(CoreError::Validation(format!("Unknown {label} #{id}")));
            }
        }
    }

    let people = [
        ("manager", prev.responsible.manager, submitted.responsible.manager),
        ("DC", prev.responsible.dc, submitted.responsible.dc),
        ("business analyst", prev.responsible.business, submitted.responsible.business),
        ("technical lead", prev.responsible.tech, submitted.responsible.tech),
    ];
    for (role, before, after) in people {
        if let Some(id) = changed(before, after) {
            match catalogs.employee(id) {
                None => return Err(CoreError::Validation(format!("Unknown {role} #{id}"))),
                Some(e) if !e.is_active => {
                    return Err(CoreError::Validation(format!(
                        "Employee '{}' is inactive and cannot be assigned as {role}",
                        e.name
                    )))
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
