//! Core state management for the scoreboard editor.
//! This crate is the single source of truth for board and person invariants.

pub mod achievement;
pub mod config;
pub mod db;
pub mod event;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use achievement::{
    check_achievements, Achievement, ACHIEVEMENT_DISPLAY_MS, CELEBRATION_DISPLAY_MS,
};
pub use config::{ClampPolicy, CoreConfig};
pub use event::{CoreEvent, Notification, NotificationKind, NOTIFICATION_DISMISS_MS};
pub use history::{HistoryManager, NoOpError, Snapshot};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::board::{Board, BoardId, DEFAULT_BOARD_NAME};
pub use model::person::{Person, PersonId, ValidationError, MAX_PERSON_NAME_UNITS};
pub use model::settings::{Settings, DEFAULT_POINT_LABEL};
pub use repo::board_repo::{BoardRepository, RepoError, RepoResult};
pub use service::scoreboard_service::{
    RenderState, ScoreboardService, ServiceError, ServiceResult,
};
pub use store::{
    KeyValueStore, MemoryKvStore, ScoreboardStore, SqliteKvStore, StoreError, StoreResult,
};
pub use view::{
    derive_view, BoardSummary, EmptyState, Medal, RankedPerson, SortKey, ViewCache,
};

/// Minimal health-check API for shell integration probes.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
