//! Process-wide settings persisted independently of boards.

use serde::{Deserialize, Serialize};

/// Point label used when none is stored or the stored value is empty.
pub const DEFAULT_POINT_LABEL: &str = "points";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub dark_mode: bool,
    pub point_label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            point_label: DEFAULT_POINT_LABEL.to_string(),
        }
    }
}

/// Maps empty or whitespace-only labels to `DEFAULT_POINT_LABEL`.
pub fn normalize_point_label(raw: &str) -> String {
    if raw.trim().is_empty() {
        DEFAULT_POINT_LABEL.to_string()
    } else {
        raw.to_string()
    }
}
