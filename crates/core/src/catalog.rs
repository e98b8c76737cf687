//! Reference catalogs and soft references into them.
//!
//! Opportunities point at catalog entries by id without cascading: an
//! entry may be deactivated or removed while records still reference it.
//! [`reference_label`] renders such dangling references instead of failing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Flat `{id, name}` catalogs managed through the generic catalog endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogKind {
    Statuses,
    DocumentTypes,
    OpportunityTypes,
    JobRoles,
    Motives,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 5] = [
        CatalogKind::Statuses,
        CatalogKind::DocumentTypes,
        CatalogKind::OpportunityTypes,
        CatalogKind::JobRoles,
        CatalogKind::Motives,
    ];

    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            CatalogKind::Statuses => "opportunity_statuses",
            CatalogKind::DocumentTypes => "document_types",
            CatalogKind::OpportunityTypes => "opportunity_types",
            CatalogKind::JobRoles => "job_roles",
            CatalogKind::Motives => "motives",
        }
    }

    /// URL path segment.
    pub fn slug(self) -> &'static str {
        match self {
            CatalogKind::Statuses => "statuses",
            CatalogKind::DocumentTypes => "document-types",
            CatalogKind::OpportunityTypes => "opportunity-types",
            CatalogKind::JobRoles => "job-roles",
            CatalogKind::Motives => "motives",
        }
    }

    /// Entity label used in not-found errors.
    pub fn entity(self) -> &'static str {
        match self {
            CatalogKind::Statuses => "OpportunityStatus",
            CatalogKind::DocumentTypes => "DocumentType",
            CatalogKind::OpportunityTypes => "OpportunityType",
            CatalogKind::JobRoles => "JobRole",
            CatalogKind::Motives => "Motive",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogKind::ALL
            .into_iter()
            .find(|k| k.slug() == s)
            .ok_or_else(|| format!("Unknown catalog: {s}"))
    }
}

/// Minimal projection of any catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: DbId,
    pub name: String,
    pub is_active: bool,
}

/// Every catalog, loaded together. Refreshed by reloading from the store.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub accounts: Vec<CatalogEntry>,
    pub employees: Vec<CatalogEntry>,
    pub statuses: Vec<CatalogEntry>,
    pub document_types: Vec<CatalogEntry>,
    pub opportunity_types: Vec<CatalogEntry>,
    pub job_roles: Vec<CatalogEntry>,
    pub motives: Vec<CatalogEntry>,
    pub loaded_at: Timestamp,
}

fn find(entries: &[CatalogEntry], id: DbId) -> Option<&CatalogEntry> {
    entries.iter().find(|e| e.id == id)
}

impl CatalogSnapshot {
    pub fn account(&self, id: DbId) -> Option<&CatalogEntry> {
        find(&self.accounts, id)
    }

    pub fn employee(&self, id: DbId) -> Option<&CatalogEntry> {
        find(&self.employees, id)
    }

    pub fn entry(&self, kind: CatalogKind, id: DbId) -> Option<&CatalogEntry> {
        let entries = match kind {
            CatalogKind::Statuses => &self.statuses,
            CatalogKind::DocumentTypes => &self.document_types,
            CatalogKind::OpportunityTypes => &self.opportunity_types,
            CatalogKind::JobRoles => &self.job_roles,
            CatalogKind::Motives => &self.motives,
        };
        find(entries, id)
    }
}

/// Display label for a soft reference.
///
/// Uses the resolved name when present (even for inactive entries) and
/// falls back to a stale marker for ids that no longer resolve.
pub fn reference_label(id: Option<DbId>, resolved_name: Option<&str>) -> Option<String> {
    match (id, resolved_name) {
        (_, Some(name)) => Some(name.to_string()),
        (Some(id), None) => Some(format!("#{id} (removed)")),
        (None, None) => None,
    }
}
