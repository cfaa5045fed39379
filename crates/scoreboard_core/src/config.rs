//! Core behavior configuration.
//!
//! # Invariants
//! - `CoreConfig::default()` matches the shipped application behavior.

use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::model::board::DEFAULT_BOARD_NAME;

/// How quick adjustments treat results below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClampPolicy {
    /// Results below zero become zero.
    #[default]
    FloorAtZero,
    /// Results may go negative.
    Unbounded,
}

impl ClampPolicy {
    /// Parses `floor` / `unbounded` (case-insensitive).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "floor" | "floor_at_zero" | "clamp" => Some(Self::FloorAtZero),
            "unbounded" | "none" => Some(Self::Unbounded),
            _ => None,
        }
    }

    pub fn apply(self, points: i64) -> i64 {
        match self {
            Self::FloorAtZero => points.max(0),
            Self::Unbounded => points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub clamp_policy: ClampPolicy,
    /// Maximum undo snapshots kept for the active board.
    pub history_limit: usize,
    /// Name of the board created when the store holds none.
    pub default_board_name: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            clamp_policy: ClampPolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_board_name: DEFAULT_BOARD_NAME.to_string(),
        }
    }
}
