//! Signal extraction from prompt text and from tool-use file paths.
//!
//! Both entry points produce the same [`ExtractedSignals`] shape so the scorer
//! does not need to know which event the signals came from.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    /// A literal dot followed by 1-10 alphanumerics at a word boundary
    static ref RE_EXTENSION: Regex = Regex::new(r"\.[a-z0-9]{1,10}\b").unwrap();
    /// A `[a-z0-9._-]` run containing a slash, extended through trailing path characters
    static ref RE_PATH: Regex = Regex::new(r"[a-z0-9._-]+/[a-z0-9._/-]*").unwrap();
}

/// Minimum length for a sub-token to count as a word
const MIN_WORD_LEN: usize = 2;

/// Evidence extracted from one event.
///
/// `words` and `extensions` are sets; `paths` keeps every occurrence in
/// order since each path may independently satisfy a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSignals {
    pub words: BTreeSet<String>,
    pub extensions: BTreeSet<String>,
    pub paths: Vec<String>,
}

impl ExtractedSignals {
    /// True when no category carries anything
    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.extensions.is_empty() && self.paths.is_empty()
    }

    /// Extract signals from already-normalized prompt text.
    pub fn from_prompt(normalized: &str) -> Self {
        let mut signals = Self::default();
        if normalized.is_empty() {
            return signals;
        }

        for token in normalized.split_whitespace() {
            add_words(&mut signals.words, token.split(['.', '/']));
        }

        for m in RE_EXTENSION.find_iter(normalized) {
            signals.extensions.insert(m.as_str().to_lowercase());
        }

        for m in RE_PATH.find_iter(normalized) {
            signals.paths.push(m.as_str().to_string());
        }

        signals
    }

    /// Extract signals from the file path of a tool invocation.
    ///
    /// The path is made relative to `project_root` when it sits underneath it,
    /// then lowercased and used as the only path entry.
    pub fn from_file_path(file_path: &str, project_root: &str) -> Self {
        let mut signals = Self::default();
        if file_path.trim().is_empty() {
            return signals;
        }

        let relative = relative_to_root(file_path, project_root).to_lowercase();

        if let Some(ext) = extension_of(&relative) {
            signals.extensions.insert(ext.to_string());
        }

        for segment in relative.split('/') {
            add_words(&mut signals.words, segment.split('.'));
        }

        signals.paths.push(relative);
        signals
    }
}

fn add_words<'a>(words: &mut BTreeSet<String>, parts: impl Iterator<Item = &'a str>) {
    for part in parts {
        if part.chars().count() >= MIN_WORD_LEN {
            words.insert(part.to_string());
        }
    }
}

/// Strip `root + "/"` from the front of `path` when present.
pub fn relative_to_root<'a>(path: &'a str, root: &str) -> &'a str {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return path;
    }
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

/// Final path component (everything after the last `/`).
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the last path component, dot included.
///
/// `None` when the basename has no dot or ends in one.
pub fn extension_of(path: &str) -> Option<&str> {
    let name = basename(path);
    let dot = name.rfind('.')?;
    if dot + 1 == name.len() {
        return None;
    }
    Some(&name[dot..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use pretty_assertions::assert_eq;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_prompt_words_split_on_dots_and_slashes() {
        let signals =
            ExtractedSignals::from_prompt(&normalize("process the invoice in invoices/march.pdf"));
        assert_eq!(
            signals.words,
            set(&["process", "the", "invoice", "in", "invoices", "march", "pdf"])
        );
    }

    #[test]
    fn test_prompt_drops_single_char_tokens() {
        let signals = ExtractedSignals::from_prompt("a b cd e.f");
        assert_eq!(signals.words, set(&["cd"]));
    }

    #[test]
    fn test_prompt_extensions() {
        let signals = ExtractedSignals::from_prompt("update app.tsx and styles.css");
        assert_eq!(signals.extensions, set(&[".tsx", ".css"]));
    }

    #[test]
    fn test_prompt_extension_longer_than_ten_chars_ignored() {
        let signals = ExtractedSignals::from_prompt("see file.abcdefghijkl");
        assert!(signals.extensions.is_empty());
    }

    #[test]
    fn test_prompt_paths_keep_duplicates_in_order() {
        let signals = ExtractedSignals::from_prompt("compare src/a.rs with docs/b.md then src/a.rs");
        assert_eq!(signals.paths, vec!["src/a.rs", "docs/b.md", "src/a.rs"]);
    }

    #[test]
    fn test_prompt_without_slash_has_no_paths() {
        let signals = ExtractedSignals::from_prompt("fix main.rs");
        assert!(signals.paths.is_empty());
        assert_eq!(signals.extensions, set(&[".rs"]));
    }

    #[test]
    fn test_empty_prompt_is_empty() {
        assert!(ExtractedSignals::from_prompt("").is_empty());
    }

    #[test]
    fn test_file_path_relative_to_root() {
        let signals =
            ExtractedSignals::from_file_path("/home/me/proj/src/Components/Button.tsx", "/home/me/proj");
        assert_eq!(signals.paths, vec!["src/components/button.tsx"]);
        assert_eq!(signals.extensions, set(&[".tsx"]));
        assert_eq!(signals.words, set(&["src", "components", "button", "tsx"]));
    }

    #[test]
    fn test_file_path_outside_root_kept_whole() {
        let signals = ExtractedSignals::from_file_path("/etc/hosts", "/home/me/proj");
        assert_eq!(signals.paths, vec!["/etc/hosts"]);
        assert!(signals.extensions.is_empty());
    }

    #[test]
    fn test_root_prefix_needs_separator() {
        assert_eq!(relative_to_root("/proj2/x.rs", "/proj"), "/proj2/x.rs");
        assert_eq!(relative_to_root("/proj/x.rs", "/proj/"), "x.rs");
    }

    #[test]
    fn test_extension_rules() {
        assert_eq!(extension_of("a/b.test.ts"), Some(".ts"));
        assert_eq!(extension_of("a.d/Makefile"), None);
        assert_eq!(extension_of("notes."), None);
        assert_eq!(extension_of(".gitignore"), Some(".gitignore"));
    }

    #[test]
    fn test_blank_file_path_is_empty() {
        assert!(ExtractedSignals::from_file_path("  ", "/proj").is_empty());
    }
}
