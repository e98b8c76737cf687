//! Semaphore rule: the color tag of an opportunity must agree with its
//! completion percentage.
//!
//! | color  | accepted percentage |
//! |--------|---------------------|
//! | RED    | exactly 0           |
//! | YELLOW | 50 ..= 69           |
//! | GREEN  | 70 ..= 100          |
//! | NONE   | 0 ..= 49            |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RED_MESSAGE: &str = "Red requires 0%";
pub const YELLOW_MESSAGE: &str = "Yellow requires 50–69%";
pub const GREEN_MESSAGE: &str = "Green requires ≥70%";
pub const NONE_MESSAGE: &str = "Uncolored requires 0–49%";

/// Health indicator attached to every opportunity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CellColor {
    Red,
    Yellow,
    Green,
    #[default]
    None,
}

impl CellColor {
    /// Database / wire representation (`RED`, `YELLOW`, `GREEN`, `NONE`).
    pub fn as_str(self) -> &'static str {
        match self {
            CellColor::Red => "RED",
            CellColor::Yellow => "YELLOW",
            CellColor::Green => "GREEN",
            CellColor::None => "NONE",
        }
    }

    fn accepts(self, percentage: i32) -> bool {
        match self {
            CellColor::Red => percentage == 0,
            CellColor::Yellow => (50..70).contains(&percentage),
            CellColor::Green => (70..=100).contains(&percentage),
            CellColor::None => (0..50).contains(&percentage),
        }
    }

    fn failure_message(self) -> &'static str {
        match self {
            CellColor::Red => RED_MESSAGE,
            CellColor::Yellow => YELLOW_MESSAGE,
            CellColor::Green => GREEN_MESSAGE,
            CellColor::None => NONE_MESSAGE,
        }
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CellColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(CellColor::Red),
            "YELLOW" => Ok(CellColor::Yellow),
            "GREEN" => Ok(CellColor::Green),
            "NONE" | "" => Ok(CellColor::None),
            other => Err(format!(
                "Invalid color '{other}'. Must be one of: RED, YELLOW, GREEN, NONE"
            )),
        }
    }
}

/// Outcome of [`validate_color_vs_percentage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl ColorCheck {
    /// Convert into a `Result`, carrying the failure message.
    pub fn into_result(self) -> Result<(), &'static str> {
        match self.message {
            Some(msg) if !self.is_valid => Err(msg),
            _ => Ok(()),
        }
    }
}

/// Check a color tag against a percentage.
///
/// The percentage domain (0..=100) is not enforced here; callers that need
/// it use [`crate::submission::validate_percentage`].
pub fn validate_color_vs_percentage(color: CellColor, percentage: i32) -> ColorCheck {
    if color.accepts(percentage) {
        ColorCheck {
            is_valid: true,
            message: None,
        }
    } else {
        ColorCheck {
            is_valid: false,
            message: Some(color.failure_message()),
        }
    }
}
