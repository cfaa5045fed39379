//! Board domain model.
//!
//! # Invariants
//! - `id` is unique within the board collection and never reused.
//! - `people` order is insertion order; views derive other orders.

use crate::model::person::{Person, PersonId, ValidationError};
use serde::{Deserialize, Serialize};

/// Time-based monotonic board identifier (epoch milliseconds at creation).
pub type BoardId = i64;

/// Name given to the board created when no saved boards exist.
pub const DEFAULT_BOARD_NAME: &str = "Main Scoreboard";

/// Named, independently scoped list of people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub people: Vec<Person>,
    /// Unix epoch milliseconds.
    #[serde(default, deserialize_with = "crate::model::timestamp::epoch_ms")]
    pub created: i64,
}

impl Board {
    /// Creates an empty board with a caller-provided id.
    pub fn new(id: BoardId, name: impl Into<String>, created: i64) -> Self {
        Self {
            id,
            name: name.into(),
            people: Vec::new(),
            created,
        }
    }

    /// Returns the list position of a person by stable id.
    pub fn position_of(&self, person_id: PersonId) -> Option<usize> {
        self.people.iter().position(|person| person.id == person_id)
    }

    /// Returns a person by stable id.
    pub fn person(&self, person_id: PersonId) -> Option<&Person> {
        self.people.iter().find(|person| person.id == person_id)
    }

    /// Returns whether `name` collides with anyone except `exclude`.
    pub fn has_name_conflict(&self, name: &str, exclude: Option<PersonId>) -> bool {
        self.people
            .iter()
            .any(|person| Some(person.id) != exclude && person.name_matches(name))
    }
}

/// Trims and validates a board name.
pub fn normalize_board_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankBoardName);
    }
    Ok(trimmed.to_string())
}
