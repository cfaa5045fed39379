//! Threshold-crossing achievements raised after points mutations.
//!
//! Checks are stateless: the same crossing fires every time it happens.

/// Points total that unlocks `Achievement::CenturyClub`.
pub const CENTURY_THRESHOLD: i64 = 100;
/// How long the shell keeps an achievement badge on screen.
pub const ACHIEVEMENT_DISPLAY_MS: u64 = 4_000;
/// How long the shell keeps the celebration overlay running.
pub const CELEBRATION_DISPLAY_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    CenturyClub,
}

impl Achievement {
    pub fn icon(self) -> &'static str {
        match self {
            Self::CenturyClub => "🎯",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CenturyClub => "Century Club",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CenturyClub => "Reached 100 points!",
        }
    }

    /// Whether unlocking this achievement also starts the celebration overlay.
    pub fn celebrates(self) -> bool {
        matches!(self, Self::CenturyClub)
    }
}

/// Returns the achievements unlocked by moving from `old_points` to `new_points`.
pub fn check_achievements(old_points: i64, new_points: i64) -> Vec<Achievement> {
    let mut unlocked = Vec::new();
    if old_points < CENTURY_THRESHOLD && new_points >= CENTURY_THRESHOLD {
        unlocked.push(Achievement::CenturyClub);
    }
    unlocked
}

#[cfg(test)]
mod tests {
    use super::{check_achievements, Achievement};

    #[test]
    fn century_fires_only_on_upward_crossing() {
        assert_eq!(check_achievements(95, 105), vec![Achievement::CenturyClub]);
        assert_eq!(check_achievements(99, 100), vec![Achievement::CenturyClub]);
        assert!(check_achievements(100, 110).is_empty());
        assert!(check_achievements(120, 90).is_empty());
        assert!(check_achievements(10, 99).is_empty());
    }
}
