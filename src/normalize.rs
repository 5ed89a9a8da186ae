//! Prompt normalization.

/// Lowercase `text`, drop every character that is not a letter, digit,
/// whitespace, `.` or `/`, and collapse whitespace runs to single spaces.
///
/// Unicode letters pass through untouched. An empty result means the input
/// carried no signal and callers should short-circuit.
pub fn normalize(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '.' || *c == '/')
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Fix the Bug, please!"), "fix the bug please");
        assert_eq!(normalize("edit src/App.tsx?"), "edit src/app.tsx");
    }

    #[test]
    fn test_hyphen_and_underscore_are_removed() {
        assert_eq!(normalize("skill-rules my_file"), "skillrules myfile");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("  a \t\n  b   "), "a b");
    }

    #[test]
    fn test_unicode_letters_pass_through() {
        assert_eq!(normalize("Café ÜBER"), "café über");
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t "), "");
        assert_eq!(normalize("?!,;"), "");
    }

    proptest! {
        #[test]
        fn proptest_normalize_is_idempotent(text in "\\PC{0,80}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
