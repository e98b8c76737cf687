//! Ordering and filtering of opportunity lists.
//!
//! The active view is ranked by a fixed ladder, evaluated purely from the
//! record's fields:
//!
//! 1. records with neither a name nor an account (blank drafts) first;
//! 2. then records with a name and a manager but no status;
//! 3. then by status rank ascending ([`STATUS_ORDER`], substring match,
//!    unmatched statuses after every matched one);
//! 4. then `kRedIndex` descending;
//! 5. then id descending.
//!
//! Ids are unique, so the ladder is a total order and the result does not
//! depend on input order.

use std::cmp::Reverse;

use serde::Deserialize;

use crate::lifecycle::ListView;
use crate::record::PipelineRecord;
use crate::types::DbId;

/// Status names in pipeline order, lower-cased. Matched as substrings.
pub const STATUS_ORDER: &[&str] = &[
    "evaluación",
    "elaboración",
    "esperando respuesta",
    "reasignado a capacity",
    "desestimada",
    "ganada",
    "perdida",
];

/// Position of a status name in [`STATUS_ORDER`], if any entry matches.
pub fn status_rank(status_name: Option<&str>) -> Option<usize> {
    let lowered = status_name?.to_lowercase();
    STATUS_ORDER.iter().position(|s| lowered.contains(s))
}

fn ladder_bucket<R: PipelineRecord>(record: &R) -> u8 {
    if !record.has_name() && record.account_id().is_none() {
        0
    } else if record.has_name()
        && record.responsible().manager.is_some()
        && record.status_id().is_none()
    {
        1
    } else {
        2
    }
}

type LadderKey = (u8, usize, Reverse<i32>, Reverse<DbId>);

fn ladder_key<R: PipelineRecord>(record: &R) -> LadderKey {
    (
        ladder_bucket(record),
        status_rank(record.status_name()).unwrap_or(usize::MAX),
        Reverse(record.k_red_index()),
        Reverse(record.id()),
    )
}

/// Sort records in place by the active-view ladder.
pub fn sort_opportunities<R: PipelineRecord>(records: &mut [R]) {
    records.sort_by_cached_key(ladder_key);
}

/// Query-string filters for list views. Every `None` field matches all.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpportunityFilter {
    /// Free-text search, case-insensitive substring.
    pub q: Option<String>,
    pub account_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub manager_id: Option<DbId>,
    pub dc_id: Option<DbId>,
    pub business_id: Option<DbId>,
    pub tech_id: Option<DbId>,
    pub k_red_index: Option<i32>,
}

fn id_matches(wanted: Option<DbId>, actual: Option<DbId>) -> bool {
    wanted.is_none() || wanted == actual
}

impl OpportunityFilter {
    pub fn matches<R: PipelineRecord>(&self, record: &R) -> bool {
        let people = record.responsible();
        id_matches(self.account_id, record.account_id())
            && id_matches(self.status_id, record.status_id())
            && id_matches(self.manager_id, people.manager)
            && id_matches(self.dc_id, people.dc)
            && id_matches(self.business_id, people.business)
            && id_matches(self.tech_id, people.tech)
            && self.k_red_index.is_none_or(|k| k == record.k_red_index())
            && self.matches_search(record)
    }

    fn matches_search<R: PipelineRecord>(&self, record: &R) -> bool {
        let needle = match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return true,
        };
        record
            .name()
            .into_iter()
            .chain(record.searchable_names())
            .any(|hay| hay.to_lowercase().contains(&needle))
    }
}

/// Filter a list view, then rank it if the view is ranked.
///
/// History and trash keep the order the store returned them in.
pub fn arrange<R: PipelineRecord>(
    records: Vec<R>,
    view: ListView,
    filter: &OpportunityFilter,
) -> Vec<R> {
    let mut kept: Vec<R> = records.into_iter().filter(|r| filter.matches(r)).collect();
    if view.is_ranked() {
        sort_opportunities(&mut kept);
    }
    kept
}
