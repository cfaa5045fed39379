//! Scoreboard use-case service.
//!
//! # Responsibility
//! - Expose every shell intent as one synchronous method.
//! - Sequence repository writes, history snapshots and store write-through.
//! - Own view state (search term, sort key), settings and the event queue.
//!
//! # Invariants
//! - Board switches change the active pointer first, then reset history.
//! - History only ever holds snapshots of the active board.
//! - Store failures are logged and flag degraded mode; they never roll back
//!   or reject an in-memory mutation.
//! - A stored boards payload that cannot be read is never overwritten.
//! - Rejected intents leave state untouched and queue one error notification.

use crate::achievement::check_achievements;
use crate::config::{ClampPolicy, CoreConfig};
use crate::event::{CoreEvent, NotificationKind};
use crate::history::{HistoryManager, NoOpError};
use crate::model::board::{Board, BoardId, DEFAULT_BOARD_NAME};
use crate::model::person::{parse_points, Person, PersonId};
use crate::model::settings::{normalize_point_label, Settings};
use crate::repo::board_repo::{BoardRepository, RepoError, RepoResult};
use crate::store::{KeyValueStore, ScoreboardStore, StoreError};
use crate::view::{
    empty_state, summarize_boards, BoardSummary, EmptyState, RankedPerson, SortKey, ViewCache,
};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for scoreboard intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Rejected by the repository; a notification has been queued.
    Repo(RepoError),
    /// Undo/redo at a history boundary; nothing is queued.
    NoOp(NoOpError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::NoOp(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoOp(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<NoOpError> for ServiceError {
    fn from(value: NoOpError) -> Self {
        Self::NoOp(value)
    }
}

/// Everything the shell needs for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub boards: Vec<BoardSummary>,
    pub active_board_id: BoardId,
    pub active_board_name: String,
    pub rows: Vec<RankedPerson>,
    pub empty_state: Option<EmptyState>,
    pub can_undo: bool,
    pub can_redo: bool,
    pub search_term: String,
    pub sort_key: SortKey,
    pub settings: Settings,
}

/// Single-session state container behind every shell intent.
pub struct ScoreboardService<S: KeyValueStore> {
    repo: BoardRepository,
    history: HistoryManager,
    store: ScoreboardStore<S>,
    settings: Settings,
    search_term: String,
    sort_key: SortKey,
    view_cache: ViewCache,
    events: Vec<CoreEvent>,
    persistence_degraded: bool,
    /// Set when the stored boards could not be read; board writes are held back.
    preserve_stored_boards: bool,
}

impl<S: KeyValueStore> ScoreboardService<S> {
    /// Loads boards and settings from `backend` and starts a session.
    ///
    /// A missing or empty boards entry is replaced by one default board,
    /// written back immediately. An unreadable entry also yields a default
    /// board, but the stored value is left as it is and the session runs
    /// degraded. Unreadable settings fall back to defaults.
    pub fn open(backend: S, config: CoreConfig) -> RepoResult<Self> {
        let store = ScoreboardStore::new(backend);
        let mut persistence_degraded = false;
        let mut preserve_stored_boards = false;

        let settings = load_settings(&store, &mut persistence_degraded);
        let loaded = match store.load_boards() {
            Ok(boards) => boards.filter(|boards| !boards.is_empty()),
            Err(err) => {
                warn!(
                    "event=store_load module=service status=error key=boards action=preserve error={err}"
                );
                persistence_degraded = true;
                preserve_stored_boards = true;
                None
            }
        };

        let from_store = loaded.is_some();
        let repo = match loaded {
            Some(boards) => BoardRepository::new(boards, config.clamp_policy)?,
            None => {
                BoardRepository::with_default_board(&config.default_board_name, config.clamp_policy)
                    .or_else(|_| {
                        BoardRepository::with_default_board(DEFAULT_BOARD_NAME, config.clamp_policy)
                    })?
            }
        };

        let mut service = Self {
            repo,
            history: HistoryManager::with_limit(config.history_limit),
            store,
            settings,
            search_term: String::new(),
            sort_key: SortKey::default(),
            view_cache: ViewCache::new(),
            events: Vec::new(),
            persistence_degraded,
            preserve_stored_boards,
        };
        if !from_store {
            service.persist_boards();
        }

        info!(
            "event=session_open module=service status=ok boards={} from_store={} degraded={}",
            service.repo.list_boards().len(),
            from_store,
            service.persistence_degraded
        );
        Ok(service)
    }

    // ---- reads ----

    pub fn list_boards(&self) -> &[Board] {
        self.repo.list_boards()
    }

    pub fn board_summaries(&self) -> Vec<BoardSummary> {
        summarize_boards(self.repo.list_boards(), Some(self.repo.active_board_id()))
    }

    pub fn active_board(&self) -> &Board {
        self.repo.active_board()
    }

    pub fn active_board_id(&self) -> BoardId {
        self.repo.active_board_id()
    }

    /// Stable id of the person at `index` in the active board's list order.
    pub fn person_id_at(&self, index: usize) -> Option<PersonId> {
        self.repo.person_id_at(self.repo.active_board_id(), index)
    }

    /// Filtered, sorted and ranked rows for the active board.
    pub fn view(&mut self) -> &[RankedPerson] {
        self.view_cache.get_or_derive(
            &self.repo.active_board().people,
            &self.search_term,
            self.sort_key,
        )
    }

    pub fn render(&mut self) -> RenderState {
        let rows = self.view().to_vec();
        let board = self.repo.active_board();
        RenderState {
            boards: self.board_summaries(),
            active_board_id: board.id,
            active_board_name: board.name.clone(),
            empty_state: empty_state(&board.people, &rows, &self.search_term),
            rows,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            search_term: self.search_term.clone(),
            sort_key: self.sort_key,
            settings: self.settings.clone(),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.repo.clamp_policy()
    }

    /// Whether any store read or write has failed during this session.
    pub fn persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    pub fn store(&self) -> &ScoreboardStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ScoreboardStore<S> {
        &mut self.store
    }

    /// Takes every queued event in emission order.
    pub fn drain_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- board intents ----

    pub fn create_board(&mut self, name: &str) -> ServiceResult<Board> {
        let board = self.repo.create_board(name).map_err(|err| self.reject("board_create", err))?;
        self.history.reset();
        self.persist_boards();
        info!(
            "event=board_create module=service status=ok boards={}",
            self.repo.list_boards().len()
        );
        self.notify(NotificationKind::Success, "Board created!");
        Ok(board)
    }

    pub fn delete_board(&mut self, id: BoardId) -> ServiceResult<()> {
        let previous_active = self.repo.active_board_id();
        let active = self.repo.delete_board(id).map_err(|err| self.reject("board_delete", err))?;
        if active != previous_active {
            self.history.reset();
        }
        self.persist_boards();
        info!(
            "event=board_delete module=service status=ok boards={} active_changed={}",
            self.repo.list_boards().len(),
            active != previous_active
        );
        self.notify(NotificationKind::Info, "Board deleted");
        Ok(())
    }

    /// Switches the active board. Unknown ids are ignored.
    pub fn set_active_board(&mut self, id: BoardId) {
        if self.repo.set_active_board(id) {
            self.history.reset();
            info!("event=board_switch module=service status=ok");
        } else {
            debug!("event=board_switch module=service status=skipped");
        }
    }

    // ---- person intents ----

    /// Adds a person from raw form input.
    pub fn add_person(&mut self, board_id: BoardId, name: &str, points: &str) -> ServiceResult<Person> {
        let person = self.mutate_people("person_add", board_id, |repo| {
            let points = parse_points(points)?;
            repo.add_person(board_id, name, points)
        })?;
        self.notify(NotificationKind::Success, "Person added successfully!");
        Ok(person)
    }

    /// Replaces a person's name and points from raw form input.
    pub fn update_person(
        &mut self,
        board_id: BoardId,
        person_id: PersonId,
        name: &str,
        points: &str,
    ) -> ServiceResult<Person> {
        let old_points = self.current_points(board_id, person_id);
        let person = self.mutate_people("person_update", board_id, |repo| {
            let points = parse_points(points)?;
            repo.update_person(board_id, person_id, name, points)
        })?;
        self.notify(NotificationKind::Success, "Person updated successfully!");
        if let Some(old_points) = old_points {
            self.raise_achievements(old_points, person.points);
        }
        Ok(person)
    }

    pub fn delete_person(&mut self, board_id: BoardId, person_id: PersonId) -> ServiceResult<Person> {
        let removed = self.mutate_people("person_delete", board_id, |repo| {
            repo.delete_person(board_id, person_id)
        })?;
        self.notify(NotificationKind::Success, "Person deleted successfully!");
        Ok(removed)
    }

    /// Applies a quick adjustment under the configured clamp policy.
    pub fn adjust_points(
        &mut self,
        board_id: BoardId,
        person_id: PersonId,
        delta: i64,
    ) -> ServiceResult<Person> {
        let old_points = self.current_points(board_id, person_id);
        let person = self.mutate_people("points_adjust", board_id, |repo| {
            repo.adjust_points(board_id, person_id, delta)
        })?;
        let sign = if delta > 0 { "+" } else { "" };
        let message = format!("{sign}{delta} {}", self.settings.point_label);
        self.notify(NotificationKind::Info, message);
        if let Some(old_points) = old_points {
            self.raise_achievements(old_points, person.points);
        }
        Ok(person)
    }

    /// Zeroes every person's points. Empty boards are left alone silently.
    pub fn reset_all_points(&mut self, board_id: BoardId) -> ServiceResult<()> {
        if self.mutate_people("points_reset", board_id, |repo| repo.reset_all_points(board_id))? {
            self.notify(NotificationKind::Info, "All points reset!");
        }
        Ok(())
    }

    /// Removes everyone from a board. Empty boards are left alone silently.
    pub fn clear_people(&mut self, board_id: BoardId) -> ServiceResult<()> {
        if self.mutate_people("people_clear", board_id, |repo| repo.clear_people(board_id))? {
            self.notify(NotificationKind::Info, "All data cleared!");
        }
        Ok(())
    }

    // ---- history intents ----

    pub fn undo(&mut self) -> ServiceResult<()> {
        let snapshot = self.history.undo()?.to_vec();
        self.apply_snapshot(snapshot)?;
        self.notify(NotificationKind::Info, "Undone");
        Ok(())
    }

    pub fn redo(&mut self) -> ServiceResult<()> {
        let snapshot = self.history.redo()?.to_vec();
        self.apply_snapshot(snapshot)?;
        self.notify(NotificationKind::Info, "Redone");
        Ok(())
    }

    // ---- view and settings intents ----

    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn set_sort_key(&mut self, sort_key: SortKey) {
        self.sort_key = sort_key;
    }

    /// Stores the point label; empty input restores the default label.
    pub fn set_point_label(&mut self, label: &str) {
        self.settings.point_label = normalize_point_label(label);
        if let Err(err) = self.store.save_point_label(&self.settings.point_label) {
            self.degrade("point_label", &err);
        }
    }

    pub fn set_dark_mode(&mut self, enabled: bool) {
        self.settings.dark_mode = enabled;
        if let Err(err) = self.store.save_dark_mode(enabled) {
            self.degrade("dark_mode", &err);
        }
    }

    pub fn set_clamp_policy(&mut self, policy: ClampPolicy) {
        self.repo.set_clamp_policy(policy);
    }

    // ---- internals ----

    /// Runs one person-list write, then snapshots and persists on change.
    fn mutate_people<T>(
        &mut self,
        operation: &'static str,
        board_id: BoardId,
        write: impl FnOnce(&mut BoardRepository) -> RepoResult<T>,
    ) -> ServiceResult<T> {
        let before = self
            .repo
            .people(board_id)
            .map(<[Person]>::to_vec)
            .map_err(|err| self.reject(operation, err))?;
        let output = write(&mut self.repo).map_err(|err| self.reject(operation, err))?;

        let after = self.repo.people(board_id)?;
        if after == before.as_slice() {
            debug!("event={operation} module=service status=unchanged");
            return Ok(output);
        }
        if board_id == self.repo.active_board_id() {
            self.history.record(&before, after);
        }
        debug!(
            "event={operation} module=service status=ok people={} history_len={}",
            after.len(),
            self.history.len()
        );
        self.persist_boards();
        Ok(output)
    }

    fn apply_snapshot(&mut self, snapshot: Vec<Person>) -> ServiceResult<()> {
        self.repo
            .replace_people(self.repo.active_board_id(), snapshot)?;
        self.persist_boards();
        debug!(
            "event=history_apply module=service status=ok cursor={} history_len={}",
            self.history.cursor(),
            self.history.len()
        );
        Ok(())
    }

    fn current_points(&self, board_id: BoardId, person_id: PersonId) -> Option<i64> {
        self.repo
            .board(board_id)
            .and_then(|board| board.person(person_id))
            .map(|person| person.points)
    }

    fn raise_achievements(&mut self, old_points: i64, new_points: i64) {
        for achievement in check_achievements(old_points, new_points) {
            info!(
                "event=achievement_unlocked module=service status=ok achievement={}",
                achievement.title()
            );
            self.events.push(CoreEvent::AchievementUnlocked(achievement));
            if achievement.celebrates() {
                self.events.push(CoreEvent::Celebrate);
            }
        }
    }

    fn persist_boards(&mut self) {
        if self.preserve_stored_boards {
            debug!("event=store_write module=service status=skipped key=boards reason=unreadable_payload");
            return;
        }
        if let Err(err) = self.store.save_boards(self.repo.list_boards()) {
            self.degrade("boards", &err);
        }
    }

    fn degrade(&mut self, key: &'static str, err: &StoreError) {
        warn!("event=store_write module=service status=error key={key} error={err}");
        self.persistence_degraded = true;
    }

    fn reject(&mut self, operation: &'static str, err: RepoError) -> RepoError {
        debug!("event={operation} module=service status=rejected error={err}");
        self.notify(NotificationKind::Error, err.user_message());
        err
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.events.push(CoreEvent::notification(kind, message));
    }
}

fn load_settings<S: KeyValueStore>(store: &ScoreboardStore<S>, degraded: &mut bool) -> Settings {
    let mut settings = Settings::default();
    match store.load_dark_mode() {
        Ok(enabled) => settings.dark_mode = enabled,
        Err(err) => {
            warn!("event=store_load module=service status=error key=dark_mode error={err}");
            *degraded = true;
        }
    }
    match store.load_point_label() {
        Ok(label) => settings.point_label = label,
        Err(err) => {
            warn!("event=store_load module=service status=error key=point_label error={err}");
            *degraded = true;
        }
    }
    settings
}
