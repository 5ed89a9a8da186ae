//! Bounded edit distance for typo-tolerant keyword matching.

/// Score multiplier applied to fuzzy keyword matches
pub const FUZZY_DISCOUNT: f64 = 0.8;

/// Levenshtein distance between `a` and `b`, giving up early once the result
/// is known to exceed `max_distance`.
///
/// Returns `max_distance + 1` as a sentinel when the distance is larger than
/// `max_distance`. Runs a single DP row over the shorter string.
pub fn levenshtein_distance(a: &str, b: &str, max_distance: usize) -> usize {
    let over = max_distance + 1;
    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if long.len() - short.len() > max_distance {
        return over;
    }
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &sc) in short.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(lc != sc);
            let value = (above + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = above;
            row[j + 1] = value;
            row_min = row_min.min(value);
        }

        if row_min > max_distance {
            return over;
        }
    }

    let distance = row[short.len()];
    if distance > max_distance {
        over
    } else {
        distance
    }
}

/// Maximum edit distance tolerated for a keyword of `len` characters.
///
/// Words of three characters or fewer never fuzzy-match.
pub fn fuzzy_threshold(len: usize) -> usize {
    match len {
        0..=3 => 0,
        4..=6 => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_strings() {
        assert_eq!(levenshtein_distance("xunit", "xunit", 0), 0);
        assert_eq!(levenshtein_distance("", "", 0), 0);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(levenshtein_distance("xunit", "xunis", 1), 1);
        assert_eq!(levenshtein_distance("deploy", "deploys", 2), 1);
        assert_eq!(levenshtein_distance("deploy", "deply", 2), 1);
    }

    #[test]
    fn test_classic_distance() {
        assert_eq!(levenshtein_distance("kitten", "sitting", 5), 3);
    }

    #[test]
    fn test_sentinel_when_over_bound() {
        assert_eq!(levenshtein_distance("kitten", "sitting", 2), 3);
        assert_eq!(levenshtein_distance("abc", "xyz", 1), 2);
    }

    #[test]
    fn test_length_gap_short_circuits() {
        assert_eq!(levenshtein_distance("ab", "abcdef", 2), 3);
        assert_eq!(levenshtein_distance("", "abcd", 1), 2);
    }

    #[test]
    fn test_empty_side_within_bound() {
        assert_eq!(levenshtein_distance("", "ab", 3), 2);
    }

    #[test]
    fn test_multibyte_chars_count_once() {
        assert_eq!(levenshtein_distance("café", "cafe", 1), 1);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(fuzzy_threshold(0), 0);
        assert_eq!(fuzzy_threshold(2), 0);
        assert_eq!(fuzzy_threshold(3), 0);
        assert_eq!(fuzzy_threshold(4), 1);
        assert_eq!(fuzzy_threshold(6), 1);
        assert_eq!(fuzzy_threshold(7), 2);
        assert_eq!(fuzzy_threshold(20), 2);
    }

    proptest! {
        #[test]
        fn proptest_distance_to_self_is_zero(a in "[a-z]{0,12}", d in 0usize..4) {
            prop_assert_eq!(levenshtein_distance(&a, &a, d), 0);
        }

        #[test]
        fn proptest_distance_is_symmetric(a in "[a-z]{0,10}", b in "[a-z]{0,10}", d in 0usize..5) {
            prop_assert_eq!(levenshtein_distance(&a, &b, d), levenshtein_distance(&b, &a, d));
        }
    }
}
