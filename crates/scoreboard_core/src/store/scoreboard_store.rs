//! Board and settings mapping on top of a `KeyValueStore`.
//!
//! # Invariants
//! - Boards are stored as one JSON array under `BOARDS_KEY`.
//! - Dark mode is stored as the literal text `true` or `false`.
//! - An absent or empty point label reads back as `DEFAULT_POINT_LABEL`.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::model::board::Board;
use crate::model::settings::{normalize_point_label, DEFAULT_POINT_LABEL};
use log::debug;

pub const BOARDS_KEY: &str = "scoreboard-boards";
pub const DARK_MODE_KEY: &str = "scoreboard-darkmode";
pub const POINT_LABEL_KEY: &str = "scoreboard-pointlabel";

/// Typed persistence adapter used by the service write-through path.
pub struct ScoreboardStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ScoreboardStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Reads the saved board collection.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    pub fn load_boards(&self) -> StoreResult<Option<Vec<Board>>> {
        let Some(raw) = self.backend.get(BOARDS_KEY)? else {
            return Ok(None);
        };
        let boards: Vec<Board> = serde_json::from_str(&raw)?;
        debug!(
            "event=store_load module=store status=ok key={BOARDS_KEY} boards={}",
            boards.len()
        );
        Ok(Some(boards))
    }

    pub fn save_boards(&mut self, boards: &[Board]) -> StoreResult<()> {
        let payload = serde_json::to_string(boards)?;
        self.backend.set(BOARDS_KEY, &payload)
    }

    /// Reads the dark-mode flag, defaulting to `false` when absent.
    pub fn load_dark_mode(&self) -> StoreResult<bool> {
        match self.backend.get(DARK_MODE_KEY)?.as_deref().map(str::trim) {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(StoreError::InvalidData(format!(
                "dark mode flag must be `true` or `false`, got `{other}`"
            ))),
        }
    }

    pub fn save_dark_mode(&mut self, enabled: bool) -> StoreResult<()> {
        self.backend
            .set(DARK_MODE_KEY, if enabled { "true" } else { "false" })
    }

    pub fn load_point_label(&self) -> StoreResult<String> {
        Ok(self
            .backend
            .get(POINT_LABEL_KEY)?
            .map(|raw| normalize_point_label(&raw))
            .unwrap_or_else(|| DEFAULT_POINT_LABEL.to_string()))
    }

    pub fn save_point_label(&mut self, label: &str) -> StoreResult<()> {
        self.backend.set(POINT_LABEL_KEY, label)
    }
}
