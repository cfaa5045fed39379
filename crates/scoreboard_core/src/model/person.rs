//! Person domain model and input validation.
//!
//! # Responsibility
//! - Define the entrant record stored on a board.
//! - Normalize and validate user-entered names and points.
//!
//! # Invariants
//! - `id` is stable for the person lifetime and survives edits.
//! - `name` is trimmed, non-empty and at most `MAX_PERSON_NAME_UNITS` long.
//! - Points entered through create/update are never negative.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum person name length after trimming, in UTF-16 code units.
///
/// Shell text fields cap input in the same unit, so an emoji counts twice.
pub const MAX_PERSON_NAME_UNITS: usize = 20;

/// Stable identifier for a person on a board.
pub type PersonId = Uuid;

/// Named entrant on a board with an integer point total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Legacy records without an id receive a fresh one on load.
    #[serde(default = "Uuid::new_v4")]
    pub id: PersonId,
    pub name: String,
    pub points: i64,
    /// Unix epoch milliseconds.
    #[serde(default, deserialize_with = "crate::model::timestamp::epoch_ms")]
    pub created: i64,
}

impl Person {
    /// Creates a person with a generated stable ID.
    ///
    /// Callers are expected to pass already validated values.
    pub fn new(name: impl Into<String>, points: i64, created: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            points,
            created,
        }
    }

    /// Returns whether `other` collides with this person's name.
    ///
    /// Comparison is case-insensitive on the trimmed value.
    pub fn name_matches(&self, other: &str) -> bool {
        self.name.to_lowercase() == other.trim().to_lowercase()
    }
}

/// Rejected user input. State is never changed when one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    BlankName,
    NameTooLong { max_units: usize },
    InvalidPoints(String),
    DuplicateName,
    BlankBoardName,
}

impl ValidationError {
    /// Returns the user-facing notification text for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BlankName | Self::InvalidPoints(_) => "Please fill in all fields correctly",
            Self::NameTooLong { .. } => "Names can be at most 20 characters",
            Self::DuplicateName => "A person with this name already exists",
            Self::BlankBoardName => "Please enter a board name",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "person name cannot be blank"),
            Self::NameTooLong { max_units } => {
                write!(f, "person name exceeds {max_units} UTF-16 units")
            }
            Self::InvalidPoints(raw) => write!(f, "points value `{raw}` is not an integer"),
            Self::DuplicateName => write!(f, "person name already exists on this board"),
            Self::BlankBoardName => write!(f, "board name cannot be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Trims and validates a person name.
pub fn normalize_person_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName);
    }
    if trimmed.encode_utf16().count() > MAX_PERSON_NAME_UNITS {
        return Err(ValidationError::NameTooLong {
            max_units: MAX_PERSON_NAME_UNITS,
        });
    }
    Ok(trimmed.to_string())
}

/// Parses raw form input into a points value.
///
/// Accepts an optional sign and surrounding whitespace. Empty input and
/// anything that is not a whole number are rejected.
pub fn parse_points(raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidPoints(raw.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidPoints(raw.to_string()))
}

/// Floors create/update points at zero.
pub fn clamp_entered_points(points: i64) -> i64 {
    points.max(0)
}
