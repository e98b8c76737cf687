//! Opportunity lifecycle: the Active / Archived / Trashed partitions, the
//! transitions between them, and the auto-archive predicate.
//!
//! ```text
//!            archive                trash
//!   Active ----------> Archived ----------> Trashed --purge--> (gone)
//!     ^  <----------      |                    |
//!     |    unarchive      +------ trash -------+
//!     |                                        |
//!     +------------- restore from trash -------+
//! ```
//!
//! Every id lives in exactly one partition. A transition whose target is the
//! partition the record already occupies is a no-op, and so is one whose
//! source partition no longer matches (e.g. a double-submitted request).
//! Neither case is an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::PipelineRecord;
use crate::semaphore::CellColor;
use crate::types::DbId;

/// `kRedIndex` at or above which a RED opportunity is swept into History.
pub const ARCHIVE_K_RED_THRESHOLD: i32 = 3;

/// Lower-cased status-name fragments marking a closed (won / lost) deal.
pub const CLOSED_STATUS_MARKERS: &[&str] = &["ganada", "perdida"];

// ---------------------------------------------------------------------------
// Partitions and views
// ---------------------------------------------------------------------------

/// The three disjoint containers an opportunity can live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    Active,
    Archived,
    Trashed,
}

impl Partition {
    /// Derive the partition from the persisted flags.
    ///
    /// A trashed record is `Trashed` regardless of its archive flag.
    pub fn from_flags(is_archived: bool, is_deleted: bool) -> Self {
        match (is_deleted, is_archived) {
            (true, _) => Partition::Trashed,
            (false, true) => Partition::Archived,
            (false, false) => Partition::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Partition::Active => "active",
            Partition::Archived => "archived",
            Partition::Trashed => "trashed",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List views exposed to the presentation layer (`ON`, `ON-OUT`, `TRASH`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListView {
    #[default]
    #[serde(rename = "on", alias = "ON", alias = "active")]
    On,
    #[serde(rename = "on-out", alias = "ON-OUT", alias = "history")]
    OnOut,
    #[serde(rename = "trash", alias = "TRASH")]
    Trash,
}

impl ListView {
    pub fn partition(self) -> Partition {
        match self {
            ListView::On => Partition::Active,
            ListView::OnOut => Partition::Archived,
            ListView::Trash => Partition::Trashed,
        }
    }

    /// Only the active view is ranked by the ordering engine.
    pub fn is_ranked(self) -> bool {
        matches!(self, ListView::On)
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// User-initiated lifecycle actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Archive,
    Unarchive,
    Trash,
    RestoreFromTrash,
    Purge,
}

impl LifecycleAction {
    /// Partition(s) the record must be in for the action to apply.
    fn sources(self) -> &'static [Partition] {
        match self {
            LifecycleAction::Archive => &[Partition::Active],
            LifecycleAction::Unarchive => &[Partition::Archived],
            LifecycleAction::Trash => &[Partition::Active, Partition::Archived],
            LifecycleAction::RestoreFromTrash | LifecycleAction::Purge => &[Partition::Trashed],
        }
    }

    /// Destination partition; `None` for purge (the record ceases to exist).
    pub fn target(self) -> Option<Partition> {
        match self {
            LifecycleAction::Archive => Some(Partition::Archived),
            LifecycleAction::Unarchive | LifecycleAction::RestoreFromTrash => {
                Some(Partition::Active)
            }
            LifecycleAction::Trash => Some(Partition::Trashed),
            LifecycleAction::Purge => None,
        }
    }

    /// Prompt the interface must confirm before invoking the action.
    pub fn confirmation_prompt(self) -> &'static str {
        match self {
            LifecycleAction::Archive => "Move this opportunity to history?",
            LifecycleAction::Unarchive => "Move this opportunity back to the active list?",
            LifecycleAction::Trash => "Move this opportunity to the trash?",
            LifecycleAction::RestoreFromTrash => "Restore this opportunity to the active list?",
            LifecycleAction::Purge => "Delete this opportunity permanently?",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleAction::Archive => "archive",
            LifecycleAction::Unarchive => "unarchive",
            LifecycleAction::Trash => "trash",
            LifecycleAction::RestoreFromTrash => "restore_from_trash",
            LifecycleAction::Purge => "purge",
        };
        f.write_str(s)
    }
}

/// Why a transition was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The record already sits in the destination partition.
    AlreadyThere,
    /// The record is no longer in a partition the action applies to.
    NotInExpectedPartition,
}

/// Result of applying an action to a record's current partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Move { from: Partition, to: Partition },
    Remove,
    Skip { current: Partition, reason: SkipReason },
}

/// Decide what `action` does to a record currently in `current`.
pub fn transition(current: Partition, action: LifecycleAction) -> Transition {
    if action.sources().contains(&current) {
        return match action.target() {
            Some(to) => Transition::Move { from: current, to },
            None => Transition::Remove,
        };
    }
    let reason = if action.target() == Some(current) {
        SkipReason::AlreadyThere
    } else {
        SkipReason::NotInExpectedPartition
    };
    Transition::Skip { current, reason }
}

// ---------------------------------------------------------------------------
// Auto-archive
// ---------------------------------------------------------------------------

/// Case-insensitive check for a won / lost status name.
pub fn is_closed_status(status_name: &str) -> bool {
    let lowered = status_name.to_lowercase();
    CLOSED_STATUS_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// Auto-archive predicate.
///
/// True when the record is RED with `kRedIndex >= 3`, or when its status
/// name marks it as won or lost.
pub fn should_archive<R: PipelineRecord + ?Sized>(record: &R) -> bool {
    if record.color() == CellColor::Red && record.k_red_index() >= ARCHIVE_K_RED_THRESHOLD {
        return true;
    }
    record.status_name().is_some_and(is_closed_status)
}

/// Active records split by [`should_archive`].
#[derive(Debug, Clone)]
pub struct SweepPlan<R> {
    pub to_archive: Vec<R>,
    pub to_keep: Vec<R>,
}

impl<R: PipelineRecord> SweepPlan<R> {
    pub fn archive_ids(&self) -> Vec<DbId> {
        self.to_archive.iter().map(PipelineRecord::id).collect()
    }
}

/// Partition the active set into records to archive and records to keep,
/// in one pass and preserving input order.
pub fn plan_sweep<R: PipelineRecord>(active: impl IntoIterator<Item = R>) -> SweepPlan<R> {
    let (to_archive, to_keep): (Vec<R>, Vec<R>) =
        active.into_iter().partition(|r| should_archive(r));
    SweepPlan {
        to_archive,
        to_keep,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepOutcome {
    NothingToArchive,
    Archived,
}

/// What an auto-archive sweep did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    pub outcome: SweepOutcome,
    pub moved: u64,
    pub ids: Vec<DbId>,
}

impl SweepReport {
    pub fn nothing() -> Self {
        Self {
            outcome: SweepOutcome::NothingToArchive,
            moved: 0,
            ids: Vec::new(),
        }
    }

    pub fn archived(ids: Vec<DbId>) -> Self {
        Self {
            outcome: SweepOutcome::Archived,
            moved: ids.len() as u64,
            ids,
        }
    }
}
