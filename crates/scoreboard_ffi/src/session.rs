//! Shell-side session: core service plus ephemeral UI state.
//!
//! # Responsibility
//! - Hold the one `ScoreboardService` the shell talks to.
//! - Own form/edit state that is never persisted.
//!
//! # Invariants
//! - The edit target always refers to a person on the active board.
//! - Deleting or clearing the edit target cancels the edit.

use log::warn;
use scoreboard_core::{
    BoardId, ClampPolicy, CoreConfig, KeyValueStore, MemoryKvStore, PersonId, ScoreboardService,
    ServiceResult, SqliteKvStore,
};
use std::path::Path;

pub(crate) type SessionBackend = Box<dyn KeyValueStore + Send>;

/// Ephemeral presentation state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct ShellState {
    pub editing: Option<PersonId>,
}

pub(crate) struct ShellSession {
    pub service: ScoreboardService<SessionBackend>,
    pub shell: ShellState,
}

impl ShellSession {
    pub fn new(backend: SessionBackend, config: CoreConfig) -> Result<Self, String> {
        let service = ScoreboardService::open(backend, config).map_err(|err| err.to_string())?;
        Ok(Self {
            service,
            shell: ShellState::default(),
        })
    }

    /// Opens the SQLite store at `db_path`, degrading to memory on failure.
    pub fn open(db_path: &Path, config: CoreConfig) -> Result<Self, String> {
        let backend: SessionBackend = match SqliteKvStore::open(db_path) {
            Ok(store) => Box::new(store),
            Err(err) => {
                warn!("event=session_open module=ffi status=degraded error={err}");
                Box::new(MemoryKvStore::new())
            }
        };
        Self::new(backend, config)
    }

    pub fn active_board(&self) -> BoardId {
        self.service.active_board_id()
    }

    /// Marks a person as the form's edit target.
    pub fn begin_edit(&mut self, person_id: PersonId) -> bool {
        let exists = self.service.active_board().person(person_id).is_some();
        if exists {
            self.shell.editing = Some(person_id);
        }
        exists
    }

    pub fn cancel_edit(&mut self) {
        self.shell.editing = None;
    }

    /// Adds a person, or updates the edit target when one is set.
    pub fn save_person(&mut self, name: &str, points: &str) -> ServiceResult<PersonId> {
        let board = self.active_board();
        let person = match self.shell.editing {
            Some(person_id) => self.service.update_person(board, person_id, name, points)?,
            None => self.service.add_person(board, name, points)?,
        };
        self.shell.editing = None;
        Ok(person.id)
    }

    pub fn delete_person(&mut self, person_id: PersonId) -> ServiceResult<()> {
        let board = self.active_board();
        self.service.delete_person(board, person_id)?;
        if self.shell.editing == Some(person_id) {
            self.shell.editing = None;
        }
        Ok(())
    }

    pub fn clear_people(&mut self) -> ServiceResult<()> {
        let board = self.active_board();
        self.service.clear_people(board)?;
        self.shell.editing = None;
        Ok(())
    }

    /// Switches boards; an edit on the previous board cannot survive it.
    pub fn set_active_board(&mut self, board_id: BoardId) {
        self.service.set_active_board(board_id);
        self.drop_stale_edit();
    }

    pub fn create_board(&mut self, name: &str) -> ServiceResult<BoardId> {
        let board = self.service.create_board(name)?;
        self.shell.editing = None;
        Ok(board.id)
    }

    pub fn delete_board(&mut self, board_id: BoardId) -> ServiceResult<()> {
        self.service.delete_board(board_id)?;
        self.drop_stale_edit();
        Ok(())
    }

    pub fn undo(&mut self) -> ServiceResult<()> {
        self.service.undo()?;
        self.drop_stale_edit();
        Ok(())
    }

    pub fn redo(&mut self) -> ServiceResult<()> {
        self.service.redo()?;
        self.drop_stale_edit();
        Ok(())
    }

    fn drop_stale_edit(&mut self) {
        if let Some(person_id) = self.shell.editing {
            if self.service.active_board().person(person_id).is_none() {
                self.shell.editing = None;
            }
        }
    }
}

/// Reads `SCOREBOARD_CLAMP_POLICY`, keeping the default when unset or unknown.
pub(crate) fn config_from_env() -> CoreConfig {
    let mut config = CoreConfig::default();
    if let Ok(raw) = std::env::var("SCOREBOARD_CLAMP_POLICY") {
        match ClampPolicy::parse(&raw) {
            Some(policy) => config.clamp_policy = policy,
            None => warn!("event=config_load module=ffi status=ignored key=SCOREBOARD_CLAMP_POLICY"),
        }
    }
    config
}
