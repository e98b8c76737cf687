//! Calendar-date arithmetic for the pipeline timeline.

use crate::types::CalendarDate;

/// Signed number of days from `start` to `end`.
///
/// `None` if either date is missing. Negative when `end` precedes `start`,
/// which is how overdue milestones are detected.
pub fn days_diff(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Proposal generation time: days from scope date to actual delivery.
pub fn proposal_generation_time(
    scope_date: Option<CalendarDate>,
    real_delivery_date: Option<CalendarDate>,
) -> Option<i64> {
    days_diff(scope_date, real_delivery_date)
}
