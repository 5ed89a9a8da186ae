//! Keyword matching with graduated quality: exact, then stem, then fuzzy.

use crate::fuzzy::{fuzzy_threshold, levenshtein_distance};
use crate::stem::stem;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// How confidently a keyword matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchQuality {
    Exact,
    Stem,
    Fuzzy,
}

impl MatchQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchQuality::Exact => "exact",
            MatchQuality::Stem => "stem",
            MatchQuality::Fuzzy => "fuzzy",
        }
    }
}

/// Prompt words plus their stems, computed once per event.
#[derive(Debug)]
pub struct WordIndex<'a> {
    words: &'a BTreeSet<String>,
    stems: HashMap<String, &'a str>,
}

impl<'a> WordIndex<'a> {
    pub fn new(words: &'a BTreeSet<String>) -> Self {
        let mut stems = HashMap::with_capacity(words.len());
        for word in words {
            stems.entry(stem(word)).or_insert(word.as_str());
        }
        Self { words, stems }
    }

    /// Match one (lowercased) keyword against the prompt words.
    ///
    /// Stages are tried in priority order and the first success wins.
    pub fn match_keyword(&self, keyword: &str) -> Option<MatchQuality> {
        if self.words.contains(keyword) {
            return Some(MatchQuality::Exact);
        }

        if self.stems.contains_key(&stem(keyword)) {
            return Some(MatchQuality::Stem);
        }

        let threshold = fuzzy_threshold(keyword.chars().count());
        if threshold > 0
            && self
                .words
                .iter()
                .any(|word| levenshtein_distance(keyword, word, threshold) <= threshold)
        {
            return Some(MatchQuality::Fuzzy);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn words(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match() {
        let w = words(&["deploy", "the", "app"]);
        assert_eq!(WordIndex::new(&w).match_keyword("deploy"), Some(MatchQuality::Exact));
    }

    #[test]
    fn test_stem_match() {
        let w = words(&["deploying", "now"]);
        assert_eq!(WordIndex::new(&w).match_keyword("deployment"), Some(MatchQuality::Stem));

        let w = words(&["testing"]);
        assert_eq!(WordIndex::new(&w).match_keyword("tests"), Some(MatchQuality::Stem));
    }

    #[test]
    fn test_fuzzy_match() {
        let w = words(&["xunis"]);
        assert_eq!(WordIndex::new(&w).match_keyword("xunit"), Some(MatchQuality::Fuzzy));
    }

    #[test]
    fn test_fuzzy_respects_threshold() {
        // 5 chars -> threshold 1; distance 2 is too far
        let w = words(&["xanis"]);
        assert_eq!(WordIndex::new(&w).match_keyword("xunit"), None);

        // 9 chars -> threshold 2
        let w = words(&["kubernets"]);
        assert_eq!(WordIndex::new(&w).match_keyword("kubernetes"), Some(MatchQuality::Fuzzy));
    }

    #[test]
    fn test_short_keyword_never_fuzzy() {
        let w = words(&["do"]);
        assert_eq!(WordIndex::new(&w).match_keyword("go"), None);
    }

    #[test]
    fn test_no_match() {
        let w = words(&["hello", "world"]);
        assert_eq!(WordIndex::new(&w).match_keyword("database"), None);
    }

    #[test]
    fn test_empty_words() {
        let w = BTreeSet::new();
        assert_eq!(WordIndex::new(&w).match_keyword("deploy"), None);
    }

    proptest! {
        #[test]
        fn proptest_present_keyword_is_exact(
            keyword in "[a-z]{1,12}",
            others in proptest::collection::btree_set("[a-z]{1,12}", 0..8),
        ) {
            let mut w = others;
            w.insert(keyword.clone());
            prop_assert_eq!(WordIndex::new(&w).match_keyword(&keyword), Some(MatchQuality::Exact));
        }
    }
}
