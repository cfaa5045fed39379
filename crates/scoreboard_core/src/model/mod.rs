//! Scoreboard domain model.
//!
//! # Responsibility
//! - Define the board/person records owned by the repository.
//! - Define process-wide settings persisted next to boards.
//!
//! # Invariants
//! - Every person is identified by a stable `PersonId`, never by position.
//! - Timestamps are Unix epoch milliseconds.

pub mod board;
pub mod person;
pub mod settings;
mod timestamp;

use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current wall clock as Unix epoch milliseconds.
///
/// Falls back to `0` when the system clock is before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
