//! Read-only view of an opportunity as seen by the ordering and lifecycle
//! engines.
//!
//! The persistence layer implements [`PipelineRecord`] for its row type so
//! the engines never depend on how a record is stored.

use crate::semaphore::CellColor;
use crate::types::DbId;

/// Ids of the employees responsible for an opportunity, by job role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponsibleIds {
    pub manager: Option<DbId>,
    pub dc: Option<DbId>,
    pub business: Option<DbId>,
    pub tech: Option<DbId>,
}

pub trait PipelineRecord {
    fn id(&self) -> DbId;

    /// Opportunity name; `None` or blank means not filled in yet.
    fn name(&self) -> Option<&str>;

    fn account_id(&self) -> Option<DbId>;

    fn status_id(&self) -> Option<DbId>;

    /// Catalog name of the current status, if resolvable.
    fn status_name(&self) -> Option<&str>;

    fn color(&self) -> CellColor;

    fn k_red_index(&self) -> i32;

    fn responsible(&self) -> ResponsibleIds;

    /// Display names matched by free-text search (account, people, ...).
    fn searchable_names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn has_name(&self) -> bool {
        self.name().is_some_and(|n| !n.trim().is_empty())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// In-memory record used by the engine unit tests.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct TestRecord {
        pub id: DbId,
        pub name: Option<String>,
        pub account_id: Option<DbId>,
        pub account_name: Option<String>,
        pub status_id: Option<DbId>,
        pub status_name: Option<String>,
        pub color: CellColor,
        pub k_red_index: i32,
        pub responsible: ResponsibleIds,
    }

    impl TestRecord {
        /// A fully filled-in record with the given id and status.
        pub fn filled(id: DbId, status: &str) -> Self {
            Self {
                id,
                name: Some(format!("Opportunity {id}")),
                account_id: Some(1),
                account_name: Some("GCABA".into()),
                status_id: Some(1),
                status_name: Some(status.into()),
                responsible: ResponsibleIds {
                    manager: Some(6),
                    ..Default::default()
                },
                ..Default::default()
            }
        }

        pub fn with_k_red(mut self, k: i32) -> Self {
            self.k_red_index = k;
            self
        }

        pub fn with_color(mut self, color: CellColor) -> Self {
            self.color = color;
            self
        }
    }

    impl PipelineRecord for TestRecord {
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
            self.color
        }
        fn k_red_index(&self) -> i32 {
            self.k_red_index
        }
        fn responsible(&self) -> ResponsibleIds {
            self.responsible
        }
        fn searchable_names(&self) -> Vec<&str> {
            self.account_name.as_deref().into_iter().collect()
        }
    }
}
