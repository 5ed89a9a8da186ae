//! Regex trigger matching with a proximity bound.
//!
//! Broad triggers like `create.*feature` should only fire when the pieces sit
//! close together, so a match counts only when its span is at most
//! `bound` characters long.

use regex_automata::meta::{BuildError, Regex};
use regex_automata::util::syntax;
use regex_automata::{Anchored, Input};
use std::ops::Range;

/// Default maximum span, in characters, of a counted pattern match
pub const DEFAULT_PROXIMITY_BOUND: usize = 60;

/// A trigger pattern that can report a bounded match.
pub trait PatternMatcher {
    /// Byte span of the first occurrence in `text` whose length is at most
    /// `bound` characters.
    fn find_within(&self, text: &str, bound: usize) -> Option<Range<usize>>;

    fn is_match_within(&self, text: &str, bound: usize) -> bool {
        self.find_within(text, bound).is_some()
    }
}

/// Case-insensitive regex trigger.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    regex: Regex,
}

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, BuildError> {
        let regex = Regex::builder()
            .syntax(syntax::Config::new().case_insensitive(true))
            .build(pattern)?;
        Ok(Self { regex })
    }
}

impl PatternMatcher for RegexPattern {
    /// Scans `text` in blocks of `bound` start positions. A block is only
    /// searched start by start when an unanchored search over the block plus
    /// `bound` trailing characters finds something, so the cost stays
    /// O(n * bound) even for greedy patterns.
    ///
    /// Searches are limited by span, not by slicing, so look-around such as
    /// `\b` or `$` still sees the characters outside the window.
    fn find_within(&self, text: &str, bound: usize) -> Option<Range<usize>> {
        let mut cache = self.regex.create_cache();
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let last = boundaries.len() - 1;
        let step = bound.max(1);

        let mut block = 0;
        while block <= last {
            let block_end = (block + step).min(last + 1);
            let reach = boundaries[(block + step + bound).min(last)];
            let coarse = Input::new(text).range(boundaries[block]..reach);

            if self.regex.search_with(&mut cache, &coarse).is_some() {
                for start in block..block_end {
                    let end = boundaries[(start + bound).min(last)];
                    let input = Input::new(text)
                        .range(boundaries[start]..end)
                        .anchored(Anchored::Yes);
                    if let Some(m) = self.regex.search_with(&mut cache, &input) {
                        return Some(m.range());
                    }
                }
            }
            block = block_end;
        }
        None
    }
}
