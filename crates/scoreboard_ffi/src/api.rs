//! FFI intent API for the Flutter presentation shell.
//!
//! # Responsibility
//! - Forward each user intent to the single core session.
//! - Return flat, UTF-8 envelopes the shell renders directly.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Intents run one at a time under the session lock.
//! - Ids cross the boundary as `i64` (boards) and UUID strings (people).

use crate::session::{config_from_env, ShellSession};
use scoreboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CoreEvent, EmptyState, Medal, PersonId, RankedPerson, ServiceError, SortKey,
    ACHIEVEMENT_DISPLAY_MS, CELEBRATION_DISPLAY_MS, NOTIFICATION_DISMISS_MS,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use uuid::Uuid;

const DB_FILE_NAME: &str = "scoreboard.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: OnceLock<Result<Mutex<ShellSession>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Sets the store file path before the first intent.
///
/// Returns an empty string on success. Once a path is in use it cannot be
/// changed for the rest of the process.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!("db path already set to `{}`", active.display())
    }
}

/// Result envelope for one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Created or edited id, when the intent produced one.
    pub id: Option<String>,
    pub message: String,
}

impl ActionResponse {
    fn success(id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    pub board_id: i64,
    pub name: String,
    pub person_count: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    pub person_id: String,
    pub name: String,
    pub points: i64,
    pub created: i64,
    pub rank: u32,
    /// `gold|silver|bronze`, or empty below the podium.
    pub medal: String,
    pub avatar_initial: String,
    pub avatar_palette_index: u32,
}

/// Full render snapshot for the active board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResponse {
    pub boards: Vec<BoardItem>,
    pub active_board_id: i64,
    pub active_board_name: String,
    pub rows: Vec<PersonRow>,
    /// Placeholder text when `rows` is empty.
    pub empty_message: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub search_term: String,
    pub sort_key: String,
    pub dark_mode: bool,
    pub point_label: String,
    pub editing_person_id: Option<String>,
    pub persistence_degraded: bool,
}

/// One outbound core event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    /// `notification|achievement|celebrate`.
    pub kind: String,
    /// Notification severity (`success|error|info`), empty otherwise.
    pub level: String,
    pub icon: String,
    pub title: String,
    pub message: String,
    pub dismiss_after_ms: u64,
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_render() -> Option<RenderResponse> {
    with_session(|session| {
        let editing = session.shell.editing;
        let degraded = session.service.persistence_degraded();
        let state = session.service.render();
        RenderResponse {
            boards: state
                .boards
                .into_iter()
                .map(|board| BoardItem {
                    board_id: board.id,
                    name: board.name,
                    person_count: u32::try_from(board.person_count).unwrap_or(u32::MAX),
                    is_active: board.is_active,
                })
                .collect(),
            active_board_id: state.active_board_id,
            active_board_name: state.active_board_name,
            rows: state.rows.into_iter().map(to_person_row).collect(),
            empty_message: state.empty_state.map(|empty| match empty {
                EmptyState::NoPeople => {
                    "No people yet. Click + Add Person to get started!".to_string()
                }
                EmptyState::NoMatches(term) => format!("No results found for \"{term}\""),
            }),
            can_undo: state.can_undo,
            can_redo: state.can_redo,
            search_term: state.search_term,
            sort_key: state.sort_key.as_str().to_string(),
            dark_mode: state.settings.dark_mode,
            point_label: state.settings.point_label,
            editing_person_id: editing.map(|id| id.to_string()),
            persistence_degraded: degraded,
        }
    })
    .ok()
}

/// Takes every queued event for display.
#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_drain_events() -> Vec<EventItem> {
    with_session(|session| {
        session
            .service
            .drain_events()
            .into_iter()
            .map(to_event_item)
            .collect()
    })
    .unwrap_or_default()
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_create_board(name: String) -> ActionResponse {
    run_intent(|session| {
        session
            .create_board(&name)
            .map(|id| Some(id.to_string()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_delete_board(board_id: i64) -> ActionResponse {
    run_intent(|session| session.delete_board(board_id).map(|()| None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_set_active_board(board_id: i64) -> ActionResponse {
    run_intent(|session| {
        session.set_active_board(board_id);
        Ok(None)
    })
}

/// Starts editing a person; the next save updates them.
#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_begin_edit(person_id: String) -> ActionResponse {
    let Some(person_id) = parse_person_id(&person_id) else {
        return ActionResponse::failure("invalid person id");
    };
    match with_session(|session| session.begin_edit(person_id)) {
        Ok(true) => ActionResponse::success(Some(person_id.to_string())),
        Ok(false) => ActionResponse::failure("That person no longer exists"),
        Err(err) => ActionResponse::failure(err),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_cancel_edit() -> ActionResponse {
    run_intent(|session| {
        session.cancel_edit();
        Ok(None)
    })
}

/// Submits the person form: add, or update the current edit target.
#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_save_person(name: String, points: String) -> ActionResponse {
    run_intent(|session| {
        session
            .save_person(&name, &points)
            .map(|id| Some(id.to_string()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_delete_person(person_id: String) -> ActionResponse {
    let Some(person_id) = parse_person_id(&person_id) else {
        return ActionResponse::failure("invalid person id");
    };
    run_intent(|session| session.delete_person(person_id).map(|()| None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_adjust_points(person_id: String, delta: i64) -> ActionResponse {
    let Some(person_id) = parse_person_id(&person_id) else {
        return ActionResponse::failure("invalid person id");
    };
    run_intent(|session| {
        let board = session.active_board();
        session
            .service
            .adjust_points(board, person_id, delta)
            .map(|person| Some(person.id.to_string()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_reset_all_points() -> ActionResponse {
    run_intent(|session| {
        let board = session.active_board();
        session.service.reset_all_points(board).map(|()| None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_clear_people() -> ActionResponse {
    run_intent(|session| session.clear_people().map(|()| None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_undo() -> ActionResponse {
    run_intent(|session| session.undo().map(|()| None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_redo() -> ActionResponse {
    run_intent(|session| session.redo().map(|()| None))
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_set_search_term(term: String) -> ActionResponse {
    run_intent(|session| {
        session.service.set_search_term(&term);
        Ok(None)
    })
}

/// Unknown sort keys fall back to list order.
#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_set_sort_key(sort_key: String) -> ActionResponse {
    run_intent(|session| {
        session.service.set_sort_key(SortKey::parse(&sort_key));
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_set_point_label(label: String) -> ActionResponse {
    run_intent(|session| {
        session.service.set_point_label(&label);
        Ok(None)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scoreboard_set_dark_mode(enabled: bool) -> ActionResponse {
    run_intent(|session| {
        session.service.set_dark_mode(enabled);
        Ok(None)
    })
}

fn run_intent(
    f: impl FnOnce(&mut ShellSession) -> Result<Option<String>, ServiceError>,
) -> ActionResponse {
    match with_session(f) {
        Ok(Ok(id)) => ActionResponse::success(id),
        // Boundary undo/redo is a silent no-op for the shell.
        Ok(Err(ServiceError::NoOp(_))) => ActionResponse::success(None),
        Ok(Err(ServiceError::Repo(err))) => ActionResponse::failure(err.user_message()),
        Err(err) => ActionResponse::failure(err),
    }
}

fn with_session<T>(f: impl FnOnce(&mut ShellSession) -> T) -> Result<T, String> {
    let session = SESSION.get_or_init(|| {
        ShellSession::open(&resolve_db_path(), config_from_env()).map(Mutex::new)
    });
    match session {
        Ok(mutex) => {
            let mut guard: MutexGuard<'_, ShellSession> =
                mutex.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(f(&mut *guard))
        }
        Err(err) => Err(format!("scoreboard session unavailable: {err}")),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("SCOREBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn parse_person_id(raw: &str) -> Option<PersonId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn to_person_row(row: RankedPerson) -> PersonRow {
    PersonRow {
        person_id: row.person.id.to_string(),
        name: row.person.name,
        points: row.person.points,
        created: row.person.created,
        rank: u32::try_from(row.rank).unwrap_or(u32::MAX),
        medal: match row.medal {
            Some(Medal::Gold) => "gold",
            Some(Medal::Silver) => "silver",
            Some(Medal::Bronze) => "bronze",
            None => "",
        }
        .to_string(),
        avatar_initial: row.avatar_initial.map(String::from).unwrap_or_default(),
        avatar_palette_index: u32::try_from(row.avatar_palette_index).unwrap_or(0),
    }
}

fn to_event_item(event: CoreEvent) -> EventItem {
    match event {
        CoreEvent::Notification(note) => EventItem {
            kind: "notification".to_string(),
            level: note.kind.as_str().to_string(),
            icon: String::new(),
            title: String::new(),
            message: note.message,
            dismiss_after_ms: NOTIFICATION_DISMISS_MS,
        },
        CoreEvent::AchievementUnlocked(achievement) => EventItem {
            kind: "achievement".to_string(),
            level: String::new(),
            icon: achievement.icon().to_string(),
            title: achievement.title().to_string(),
            message: achievement.description().to_string(),
            dismiss_after_ms: ACHIEVEMENT_DISPLAY_MS,
        },
        CoreEvent::Celebrate => EventItem {
            kind: "celebrate".to_string(),
            level: String::new(),
            icon: String::new(),
            title: String::new(),
            message: String::new(),
            dismiss_after_ms: CELEBRATION_DISPLAY_MS,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{
        configure_db_path, core_version, init_logging, parse_person_id, ping, to_event_item,
    };
    use scoreboard_core::{Achievement, CoreEvent, NotificationKind};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn configure_db_path_rejects_empty_path() {
        assert!(!configure_db_path("  ".to_string()).is_empty());
    }

    #[test]
    fn person_ids_must_be_uuids() {
        assert!(parse_person_id("not-a-uuid").is_none());
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_person_id(&format!(" {id} ")), Some(id));
    }

    #[test]
    fn events_map_to_flat_items() {
        let item = to_event_item(CoreEvent::notification(NotificationKind::Error, "bad"));
        assert_eq!(item.kind, "notification");
        assert_eq!(item.level, "error");
        assert_eq!(item.dismiss_after_ms, 3_000);

        let item = to_event_item(CoreEvent::AchievementUnlocked(Achievement::CenturyClub));
        assert_eq!(item.title, "Century Club");
        assert_eq!(item.dismiss_after_ms, 4_000);
    }
}
