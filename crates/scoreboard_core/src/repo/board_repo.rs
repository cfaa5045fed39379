//! In-memory board/person repository.
//!
//! # Responsibility
//! - Own the board collection and every board's ordered person list.
//! - Enforce naming and board-count invariants on every write.
//! - Track which board is active.
//!
//! # Invariants
//! - At least one board exists; the last board cannot be deleted.
//! - Person names are unique per board, compared case-insensitively.
//! - `active` always points at an existing board.
//! - Board ids are strictly increasing in creation order.
//! - Rejected writes leave state untouched.

use crate::config::ClampPolicy;
use crate::model::board::{normalize_board_name, Board, BoardId};
use crate::model::now_epoch_ms;
use crate::model::person::{
    clamp_entered_points, normalize_person_name, Person, PersonId, ValidationError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for board/person operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Rejected user input.
    Validation(ValidationError),
    /// Operation would break a collection invariant.
    InvariantViolation(&'static str),
    BoardNotFound(BoardId),
    PersonNotFound(PersonId),
}

impl RepoError {
    /// Returns the user-facing notification text for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.user_message(),
            Self::InvariantViolation(message) => *message,
            Self::BoardNotFound(_) => "That board no longer exists",
            Self::PersonNotFound(_) => "That person no longer exists",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvariantViolation(message) => write!(f, "invariant violation: {message}"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

const LAST_BOARD_MESSAGE: &str = "Cannot delete the last board";

/// Board collection with an active-board pointer.
#[derive(Debug, Clone)]
pub struct BoardRepository {
    boards: Vec<Board>,
    active: BoardId,
    clamp_policy: ClampPolicy,
}

impl BoardRepository {
    /// Builds a repository from loaded boards; the first one becomes active.
    ///
    /// # Errors
    /// - `InvariantViolation` when `boards` is empty.
    pub fn new(boards: Vec<Board>, clamp_policy: ClampPolicy) -> RepoResult<Self> {
        let active = boards
            .first()
            .map(|board| board.id)
            .ok_or(RepoError::InvariantViolation(
                "a repository needs at least one board",
            ))?;
        Ok(Self {
            boards,
            active,
            clamp_policy,
        })
    }

    /// Builds a repository holding one fresh empty board.
    pub fn with_default_board(name: &str, clamp_policy: ClampPolicy) -> RepoResult<Self> {
        let name = normalize_board_name(name)?;
        let now = now_epoch_ms();
        Self::new(vec![Board::new(now, name, now)], clamp_policy)
    }

    pub fn list_boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|board| board.id == id)
    }

    pub fn active_board_id(&self) -> BoardId {
        self.active
    }

    pub fn active_board(&self) -> &Board {
        // `active` always names an existing board.
        self.board(self.active).unwrap_or(&self.boards[0])
    }

    pub fn clamp_policy(&self) -> ClampPolicy {
        self.clamp_policy
    }

    pub fn set_clamp_policy(&mut self, policy: ClampPolicy) {
        self.clamp_policy = policy;
    }

    /// Returns a board's people in list order.
    pub fn people(&self, board_id: BoardId) -> RepoResult<&[Person]> {
        Ok(&self.board_ref(board_id)?.people)
    }

    /// Returns the stable id of whoever sits at `index` on the board.
    pub fn person_id_at(&self, board_id: BoardId, index: usize) -> Option<PersonId> {
        self.board(board_id)
            .and_then(|board| board.people.get(index))
            .map(|person| person.id)
    }

    /// Creates an empty board and makes it active.
    pub fn create_board(&mut self, name: &str) -> RepoResult<Board> {
        let name = normalize_board_name(name)?;
        let now = now_epoch_ms();
        let id = self.next_board_id(now);
        let board = Board::new(id, name, now);
        self.boards.push(board.clone());
        self.active = id;
        Ok(board)
    }

    /// Deletes a board and returns the id of the board active afterwards.
    ///
    /// When the active board is deleted, the first remaining board takes over.
    pub fn delete_board(&mut self, id: BoardId) -> RepoResult<BoardId> {
        let position = self
            .boards
            .iter()
            .position(|board| board.id == id)
            .ok_or(RepoError::BoardNotFound(id))?;
        if self.boards.len() == 1 {
            return Err(RepoError::InvariantViolation(LAST_BOARD_MESSAGE));
        }

        self.boards.remove(position);
        if self.active == id {
            self.active = self.boards[0].id;
        }
        Ok(self.active)
    }

    /// Activates `id`. Returns whether the active board changed.
    ///
    /// Unknown ids are ignored.
    pub fn set_active_board(&mut self, id: BoardId) -> bool {
        if self.active == id || self.board(id).is_none() {
            return false;
        }
        self.active = id;
        true
    }

    /// Appends a validated person with `created = now`.
    pub fn add_person(&mut self, board_id: BoardId, name: &str, points: i64) -> RepoResult<Person> {
        let name = normalize_person_name(name)?;
        let board = self.board_mut(board_id)?;
        if board.has_name_conflict(&name, None) {
            return Err(ValidationError::DuplicateName.into());
        }

        let person = Person::new(name, clamp_entered_points(points), now_epoch_ms());
        board.people.push(person.clone());
        Ok(person)
    }

    /// Replaces a person's name and points, keeping `id` and `created`.
    pub fn update_person(
        &mut self,
        board_id: BoardId,
        person_id: PersonId,
        name: &str,
        points: i64,
    ) -> RepoResult<Person> {
        let name = normalize_person_name(name)?;
        let board = self.board_mut(board_id)?;
        let position = board
            .position_of(person_id)
            .ok_or(RepoError::PersonNotFound(person_id))?;
        if board.has_name_conflict(&name, Some(person_id)) {
            return Err(ValidationError::DuplicateName.into());
        }

        let person = &mut board.people[position];
        person.name = name;
        person.points = clamp_entered_points(points);
        Ok(person.clone())
    }

    /// Removes a person and returns the removed record.
    pub fn delete_person(&mut self, board_id: BoardId, person_id: PersonId) -> RepoResult<Person> {
        let board = self.board_mut(board_id)?;
        let position = board
            .position_of(person_id)
            .ok_or(RepoError::PersonNotFound(person_id))?;
        Ok(board.people.remove(position))
    }

    /// Adds `delta` to a person's points under the configured clamp policy.
    pub fn adjust_points(
        &mut self,
        board_id: BoardId,
        person_id: PersonId,
        delta: i64,
    ) -> RepoResult<Person> {
        let policy = self.clamp_policy;
        let board = self.board_mut(board_id)?;
        let position = board
            .position_of(person_id)
            .ok_or(RepoError::PersonNotFound(person_id))?;

        let person = &mut board.people[position];
        person.points = policy.apply(person.points.saturating_add(delta));
        Ok(person.clone())
    }

    /// Sets every person's points to zero. Returns `false` for an empty board.
    pub fn reset_all_points(&mut self, board_id: BoardId) -> RepoResult<bool> {
        let board = self.board_mut(board_id)?;
        if board.people.is_empty() {
            return Ok(false);
        }
        for person in &mut board.people {
            person.points = 0;
        }
        Ok(true)
    }

    /// Empties the person list. Returns `false` when it was already empty.
    pub fn clear_people(&mut self, board_id: BoardId) -> RepoResult<bool> {
        let board = self.board_mut(board_id)?;
        if board.people.is_empty() {
            return Ok(false);
        }
        board.people.clear();
        Ok(true)
    }

    /// Overwrites a board's people, e.g. with an undo snapshot.
    pub fn replace_people(&mut self, board_id: BoardId, people: Vec<Person>) -> RepoResult<()> {
        self.board_mut(board_id)?.people = people;
        Ok(())
    }

    fn board_ref(&self, board_id: BoardId) -> RepoResult<&Board> {
        self.board(board_id).ok_or(RepoError::BoardNotFound(board_id))
    }

    fn board_mut(&mut self, board_id: BoardId) -> RepoResult<&mut Board> {
        self.boards
            .iter_mut()
            .find(|board| board.id == board_id)
            .ok_or(RepoError::BoardNotFound(board_id))
    }

    fn next_board_id(&self, now: i64) -> BoardId {
        let newest = self.boards.iter().map(|board| board.id).max().unwrap_or(0);
        now.max(newest.saturating_add(1))
    }
}
