//! Locale-aware name ordering.
//!
//! Approximates root-locale collation: letters compare without regard to
//! accents or case first, then accents break ties, then case (lowercase
//! first), then raw code points so the order is total.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Accent- and case-insensitive key.
fn primary_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive key that keeps accents.
fn secondary_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

/// Case pattern with lowercase sorting before uppercase.
fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}

/// Compare two names the way a user-facing list should order them.
pub fn compare(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(compare("darth Vader", "Luke"), Ordering::Less);
        assert_eq!(compare("Luke", "darth Vader"), Ordering::Greater);
        assert_eq!(compare("R2-D2", "r5-D4"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare("yoda", "Yoda"), Ordering::Less);
        assert_eq!(compare("Yoda", "Yoda"), Ordering::Equal);
    }

    #[test]
    fn test_accents_are_secondary() {
        // Accent does not outrank a later letter difference
        assert_eq!(compare("Éadu", "Eb"), Ordering::Less);
        assert_eq!(compare("Eadu", "Éadu"), Ordering::Less);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
        }

        #[test]
        fn prop_equal_only_when_identical(a in "\\PC{0,12}", b in "\\PC{0,12}") {
            prop_assert_eq!(compare(&a, &b) == Ordering::Equal, a == b);
        }

        #[test]
        fn prop_sorted_adjacent_pairs(mut names in prop::collection::vec("[a-zA-Zé ]{0,8}", 0..20)) {
            names.sort_by(|a, b| compare(a, b));
            for pair in names.windows(2) {
                prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
            }
        }
    }
}
