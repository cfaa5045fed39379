//! Derived view engine: filter, sort and rank a board's people.
//!
//! # Responsibility
//! - Produce the render-ready list for the active board.
//! - Keep ranks tied to the full board, independent of search filtering.
//!
//! # Invariants
//! - `derive_view` is pure and deterministic for the same inputs.
//! - Ranks are a permutation of `1..=people.len()` over the full list.
//! - Equal points are ordered by list position, never sharing a rank.

mod collation;

pub use collation::compare_names;

use crate::model::board::{Board, BoardId};
use crate::model::person::{Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const AVATAR_PALETTE_SIZE: usize = 6;

/// Ordering applied to the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    PointsDesc,
    PointsAsc,
    NameAsc,
    NameDesc,
    /// Keeps list order. Any unrecognized key text maps here.
    Unsorted,
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "points-desc" => Self::PointsDesc,
            "points-asc" => Self::PointsAsc,
            "name-asc" => Self::NameAsc,
            "name-desc" => Self::NameDesc,
            _ => Self::Unsorted,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PointsDesc => "points-desc",
            Self::PointsAsc => "points-asc",
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::Unsorted => "unsorted",
        }
    }
}

/// Podium decoration for the top three ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn for_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Self::Gold),
            2 => Some(Self::Silver),
            3 => Some(Self::Bronze),
            _ => None,
        }
    }
}

/// One row of the derived view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPerson {
    pub person: Person,
    /// 1-based position in the full points-descending ranking.
    pub rank: usize,
    pub medal: Option<Medal>,
    pub avatar_initial: Option<char>,
    /// Index into the shell's six-entry avatar palette.
    pub avatar_palette_index: usize,
}

/// Why the derived view has no rows, if it has none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoPeople,
    NoMatches(String),
}

/// Board manager row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSummary {
    pub id: BoardId,
    pub name: String,
    pub person_count: usize,
    pub is_active: bool,
}

/// Filters, sorts and ranks `people`.
pub fn derive_view(people: &[Person], search_term: &str, sort_key: SortKey) -> Vec<RankedPerson> {
    let ranks = rank_by_points(people);
    let needle = search_term.to_lowercase();

    let mut rows: Vec<&Person> = people
        .iter()
        .filter(|person| needle.is_empty() || person.name.to_lowercase().contains(&needle))
        .collect();

    match sort_key {
        SortKey::PointsDesc => rows.sort_by(|a, b| b.points.cmp(&a.points)),
        SortKey::PointsAsc => rows.sort_by(|a, b| a.points.cmp(&b.points)),
        SortKey::NameAsc => rows.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortKey::NameDesc => rows.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortKey::Unsorted => {}
    }

    rows.into_iter()
        .map(|person| {
            let rank = ranks.get(&person.id).copied().unwrap_or(people.len());
            RankedPerson {
                person: person.clone(),
                rank,
                medal: Medal::for_rank(rank),
                avatar_initial: person.name.chars().next().and_then(|ch| ch.to_uppercase().next()),
                avatar_palette_index: avatar_palette_index(&person.name),
            }
        })
        .collect()
}

/// Maps each person to their 1-based rank over the whole list.
pub fn rank_by_points(people: &[Person]) -> HashMap<PersonId, usize> {
    let mut ordered: Vec<&Person> = people.iter().collect();
    ordered.sort_by(|a, b| b.points.cmp(&a.points));
    ordered
        .into_iter()
        .enumerate()
        .map(|(position, person)| (person.id, position + 1))
        .collect()
}

pub fn empty_state(people: &[Person], view: &[RankedPerson], search_term: &str) -> Option<EmptyState> {
    if people.is_empty() {
        Some(EmptyState::NoPeople)
    } else if view.is_empty() {
        Some(EmptyState::NoMatches(search_term.to_string()))
    } else {
        None
    }
}

pub fn summarize_boards(boards: &[Board], active: Option<BoardId>) -> Vec<BoardSummary> {
    boards
        .iter()
        .map(|board| BoardSummary {
            id: board.id,
            name: board.name.clone(),
            person_count: board.people.len(),
            is_active: Some(board.id) == active,
        })
        .collect()
}

/// Stable palette slot derived from the name's UTF-16 code units.
///
/// Only the shift operates on the 32-bit truncation of the running hash;
/// the sum itself is carried at full width.
pub fn avatar_palette_index(name: &str) -> usize {
    let hash = name.encode_utf16().fold(0i64, |hash, unit| {
        let shifted = i64::from((hash as i32) << 5);
        i64::from(unit).wrapping_add(shifted.wrapping_sub(hash))
    });
    (hash.unsigned_abs() % AVATAR_PALETTE_SIZE as u64) as usize
}

/// Single-entry memo of the last derived view.
#[derive(Debug, Default)]
pub struct ViewCache {
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    people: Vec<Person>,
    search_term: String,
    sort_key: SortKey,
    rows: Vec<RankedPerson>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached rows when inputs are unchanged, recomputing otherwise.
    pub fn get_or_derive(
        &mut self,
        people: &[Person],
        search_term: &str,
        sort_key: SortKey,
    ) -> &[RankedPerson] {
        let fresh = self.entry.as_ref().is_some_and(|entry| {
            entry.sort_key == sort_key
                && entry.search_term == search_term
                && entry.people.as_slice() == people
        });
        if !fresh {
            self.entry = Some(CacheEntry {
                people: people.to_vec(),
                search_term: search_term.to_string(),
                sort_key,
                rows: derive_view(people, search_term, sort_key),
            });
        }
        self.entry
            .as_ref()
            .map(|entry| entry.rows.as_slice())
            .unwrap_or_default()
    }
}
