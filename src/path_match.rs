//! Path trigger matching: plain prefixes and glob patterns.
//!
//! Triggers without glob metacharacters are prefixes (`invoices/`); anything
//! with `*`, `?`, `[` or `{` goes through the glob engine. Both are
//! case-insensitive, and `*` may cross `/`.

use crate::signals::basename;
use globset::{GlobBuilder, GlobMatcher as CompiledGlob};

const GLOB_METACHARS: &[char] = &['*', '?', '[', '{'];

/// A compiled path glob.
pub trait GlobMatcher {
    fn is_match(&self, candidate: &str) -> bool;
}

/// Glob with `{a,b}` alternation, matched case-insensitively.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    matcher: CompiledGlob,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self, globset::Error> {
        let matcher = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(false)
            .build()?
            .compile_matcher();
        Ok(Self { matcher })
    }
}

impl GlobMatcher for GlobPattern {
    fn is_match(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }
}

/// True when `pattern` needs glob semantics rather than prefix matching.
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_METACHARS)
}

/// A path trigger prepared for matching.
#[derive(Debug, Clone)]
pub enum PathTrigger {
    Prefix(String),
    Glob(GlobPattern),
}

impl PathTrigger {
    /// Compile a trigger; `Err` only for malformed globs.
    pub fn new(trigger: &str) -> Result<Self, globset::Error> {
        if is_glob(trigger) {
            GlobPattern::new(trigger).map(PathTrigger::Glob)
        } else {
            Ok(PathTrigger::Prefix(trigger.to_lowercase()))
        }
    }

    /// Match one extracted path (already lowercase). Globs are also tried
    /// against the basename.
    pub fn matches_path(&self, path: &str) -> bool {
        match self {
            PathTrigger::Prefix(prefix) => path.to_lowercase().starts_with(prefix.as_str()),
            PathTrigger::Glob(glob) => matches_any_form(glob, &[path, basename(path)]),
        }
    }

    /// True when any extracted path satisfies the trigger. A trigger is
    /// credited once no matter how many paths match.
    pub fn matches_any(&self, paths: &[String]) -> bool {
        paths.iter().any(|path| self.matches_path(path))
    }
}

/// The spellings of a target file tried against ownership globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathForms {
    pub absolute: String,
    pub basename: String,
    pub raw: String,
    pub relative: String,
}

impl PathForms {
    pub fn new(raw: &str, project_root: &str) -> Self {
        let root = project_root.trim_end_matches('/');
        let absolute = if raw.starts_with('/') || root.is_empty() {
            raw.to_string()
        } else {
            format!("{}/{}", root, raw.trim_start_matches("./"))
        };
        let relative = crate::signals::relative_to_root(&absolute, root).to_string();

        Self {
            basename: basename(raw).to_string(),
            absolute,
            raw: raw.to_string(),
            relative,
        }
    }

    pub fn as_slice(&self) -> [&str; 4] {
        [
            self.absolute.as_str(),
            self.basename.as_str(),
            self.raw.as_str(),
            self.relative.as_str(),
        ]
    }
}

/// True when `glob` matches at least one of `forms`.
pub fn matches_any_form<G: GlobMatcher + ?Sized>(glob: &G, forms: &[&str]) -> bool {
    forms.iter().any(|form| !form.is_empty() && glob.is_match(form))
}
