//! Locale-aware name ordering.
//!
//! Names compare on three levels: base letters (accents and case folded
//! away), then accents, then case with lowercase first.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Compares two display names the way a user-facing list should sort them.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    primary_key(left)
        .cmp(&primary_key(right))
        .then_with(|| left.to_lowercase().cmp(&right.to_lowercase()))
        .then_with(|| tertiary_key(left).cmp(&tertiary_key(right)))
}

fn primary_key(value: &str) -> String {
    value
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

fn tertiary_key(value: &str) -> Vec<(bool, char)> {
    value
        .chars()
        .map(|ch| (ch.is_uppercase(), ch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::compare_names;
    use std::cmp::Ordering;

    #[test]
    fn case_does_not_decide_primary_order() {
        assert_eq!(compare_names("alice", "Bob"), Ordering::Less);
        assert_eq!(compare_names("Zed", "amy"), Ordering::Greater);
    }

    #[test]
    fn accents_sort_next_to_base_letter() {
        assert_eq!(compare_names("Émile", "Frank"), Ordering::Less);
        assert_eq!(compare_names("Emile", "Émile"), Ordering::Less);
    }

    #[test]
    fn lowercase_wins_exact_ties() {
        assert_eq!(compare_names("anna", "Anna"), Ordering::Less);
        assert_eq!(compare_names("Anna", "Anna"), Ordering::Equal);
    }
}
