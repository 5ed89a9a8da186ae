//! Lightweight suffix-stripping stemmer.
//!
//! This is a heuristic, not a linguistic stemmer. The rule table is ordered
//! and the first rule whose suffix matches is the only one applied, so
//! "activation" stems to "activat" and "running" to "run".

/// Words shorter than this are returned unchanged
const MIN_STEM_LEN: usize = 4;

/// One suffix rewrite.
#[derive(Debug, Clone, Copy)]
pub struct SuffixRule {
    /// Suffix that must end the word
    pub suffix: &'static str,
    /// Text that replaces the suffix
    pub replacement: &'static str,
    /// Minimum length of the original word for the rule to apply
    pub min_len: usize,
    /// Rule does not apply when the word ends with this longer suffix
    pub unless: Option<&'static str>,
    /// Collapse a doubled final consonant left behind (`runn` -> `run`)
    pub undouble: bool,
}

const fn rule(suffix: &'static str, replacement: &'static str) -> SuffixRule {
    SuffixRule {
        suffix,
        replacement,
        min_len: MIN_STEM_LEN,
        unless: None,
        undouble: false,
    }
}

/// Ordered rule table; first match wins.
pub const SUFFIX_RULES: &[SuffixRule] = &[
    rule("tion", "t"),
    rule("ment", ""),
    rule("ness", ""),
    rule("able", ""),
    rule("ible", ""),
    SuffixRule {
        undouble: true,
        ..rule("ing", "")
    },
    SuffixRule {
        min_len: 5,
        ..rule("ly", "")
    },
    rule("ies", "y"),
    rule("ied", "y"),
    SuffixRule {
        undouble: true,
        ..rule("ed", "")
    },
    rule("ches", "ch"),
    rule("shes", "sh"),
    rule("ses", "s"),
    rule("xes", "x"),
    rule("zes", "z"),
    SuffixRule {
        unless: Some("ss"),
        ..rule("s", "")
    },
];

/// Reduce `word` to an approximate root using [`SUFFIX_RULES`].
pub fn stem(word: &str) -> String {
    let len = word.chars().count();
    if len < MIN_STEM_LEN {
        return word.to_string();
    }

    for rule in SUFFIX_RULES {
        if len < rule.min_len || !word.ends_with(rule.suffix) {
            continue;
        }
        if rule.unless.is_some_and(|longer| word.ends_with(longer)) {
            continue;
        }

        let mut root = String::with_capacity(word.len());
        root.push_str(&word[..word.len() - rule.suffix.len()]);
        if rule.undouble {
            undouble_final_consonant(&mut root);
        }
        root.push_str(rule.replacement);
        return root;
    }

    word.to_string()
}

fn undouble_final_consonant(root: &mut String) {
    let mut tail = root.chars().rev();
    if let (Some(last), Some(prev)) = (tail.next(), tail.next()) {
        if last == prev && last.is_alphabetic() && !is_vowel(last) {
            root.pop();
        }
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
