//! Linear undo/redo history for the active board.
//!
//! # Responsibility
//! - Keep value snapshots of the active board's person list.
//! - Move a cursor backward/forward through those snapshots.
//!
//! # Invariants
//! - `cursor` is `None` exactly when no snapshot is stored, otherwise it
//!   indexes an existing snapshot (`-1 <= cursor < len` in signed terms).
//! - Snapshots are owned copies; later mutation of the live list never
//!   alters stored entries.
//! - Pushing after an undo discards the stale redo branch.

use crate::model::person::Person;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default number of snapshots kept before the oldest ones are dropped.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Snapshot of one board's person list.
pub type Snapshot = Vec<Person>;

/// Undo/redo requested at a history boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpError {
    NothingToUndo,
    NothingToRedo,
}

impl Display for NoOpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "nothing to undo"),
            Self::NothingToRedo => write!(f, "nothing to redo"),
        }
    }
}

impl Error for NoOpError {}

#[derive(Debug, Clone)]
pub struct HistoryManager {
    snapshots: Vec<Snapshot>,
    cursor: Option<usize>,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history that keeps at most `limit` snapshots.
    ///
    /// Limits below 2 are raised to 2 so one step can always be undone.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: None,
            limit: limit.max(2),
        }
    }

    /// Appends `snapshot` after the cursor and moves the cursor onto it.
    pub fn push(&mut self, snapshot: Snapshot) {
        let keep = self.cursor.map_or(0, |cursor| cursor + 1);
        self.snapshots.truncate(keep);
        self.snapshots.push(snapshot);
        if self.snapshots.len() > self.limit {
            let overflow = self.snapshots.len() - self.limit;
            self.snapshots.drain(..overflow);
        }
        self.cursor = Some(self.snapshots.len() - 1);
    }

    /// Records one mutation as a `before -> after` transition.
    ///
    /// An empty history is first seeded with `before`, so the first change
    /// after a reset can be undone back to the state it started from.
    pub fn record(&mut self, before: &[Person], after: &[Person]) {
        if self.snapshots.is_empty() {
            self.push(before.to_vec());
        }
        self.push(after.to_vec());
    }

    pub fn undo(&mut self) -> Result<&[Person], NoOpError> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                Ok(&self.snapshots[cursor - 1])
            }
            _ => Err(NoOpError::NothingToUndo),
        }
    }

    pub fn redo(&mut self) -> Result<&[Person], NoOpError> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.snapshots.len() => {
                self.cursor = Some(cursor + 1);
                Ok(&self.snapshots[cursor + 1])
            }
            _ => Err(NoOpError::NothingToRedo),
        }
    }

    /// Drops every snapshot. Called whenever the active board changes.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = None;
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.snapshots.len())
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Signed cursor position, `-1` when the history is empty.
    pub fn cursor(&self) -> isize {
        self.cursor
            .map_or(-1, |cursor| isize::try_from(cursor).unwrap_or(isize::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::{HistoryManager, NoOpError};
    use crate::model::person::Person;

    fn snapshot(points: &[i64]) -> Vec<Person> {
        points
            .iter()
            .enumerate()
            .map(|(idx, points)| Person::new(format!("p{idx}"), *points, 0))
            .collect()
    }

    #[test]
    fn empty_history_has_cursor_minus_one_and_no_moves() {
        let mut history = HistoryManager::new();
        assert_eq!(history.cursor(), -1);
        assert_eq!(history.undo().unwrap_err(), NoOpError::NothingToUndo);
        assert_eq!(history.redo().unwrap_err(), NoOpError::NothingToRedo);
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut history = HistoryManager::new();
        history.push(snapshot(&[1]));
        history.push(snapshot(&[2]));
        history.push(snapshot(&[3]));
        history.undo().unwrap();
        history.undo().unwrap();
        assert!(history.can_redo());

        history.push(snapshot(&[9]));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap()[0].points, 1);
    }

    #[test]
    fn record_seeds_baseline_once() {
        let mut history = HistoryManager::new();
        history.record(&[], &snapshot(&[10]));
        assert_eq!(history.len(), 2);
        history.record(&snapshot(&[10]), &snapshot(&[11]));
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn stored_snapshots_are_independent_copies() {
        let mut history = HistoryManager::new();
        let mut live = snapshot(&[5]);
        history.record(&[], &live);
        live[0].points = 500;

        history.undo().unwrap();
        let restored = history.redo().unwrap();
        assert_eq!(restored[0].points, 5);
    }

    #[test]
    fn limit_drops_oldest_snapshots() {
        let mut history = HistoryManager::with_limit(3);
        for points in 0..5 {
            history.push(snapshot(&[points]));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        history.undo().unwrap();
        assert_eq!(history.undo().unwrap()[0].points, 2);
        assert!(!history.can_undo());
    }

    #[test]
    fn reset_clears_everything() {
        let mut history = HistoryManager::new();
        history.record(&[], &snapshot(&[1]));
        history.reset();
        assert!(history.is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.cursor(), -1);
    }
}
