//! Observation history: dated notes kept newest first.
//!
//! The `observations` field of an opportunity mirrors the text of the
//! newest entry; both are absent when the history is empty.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::CalendarDate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationEntry {
    pub date: CalendarDate,
    pub text: String,
}

/// Text the `observations` field must hold for `history`.
pub fn latest_text(history: &[ObservationEntry]) -> Option<&str> {
    history.first().map(|e| e.text.as_str())
}

/// Prepend a note. Whitespace is trimmed; blank text is ignored.
///
/// Returns `true` when an entry was added.
pub fn record(history: &mut Vec<ObservationEntry>, date: CalendarDate, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    history.insert(
        0,
        ObservationEntry {
            date,
            text: text.to_string(),
        },
    );
    true
}

/// Remove the entry at `index` (0 = newest).
pub fn remove(
    history: &mut Vec<ObservationEntry>,
    index: usize,
) -> Result<ObservationEntry, CoreError> {
    if index >= history.len() {
        return Err(CoreError::Validation(format!(
            "Observation index {index} out of range (history has {} entries)",
            history.len()
        )));
    }
    Ok(history.remove(index))
}
