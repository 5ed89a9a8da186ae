//! Weighted per-skill scoring.
//!
//! Each trigger that matches contributes `weight[category] * quality` once,
//! and records one [`MatchedSignal`]. Scores are plain sums: no
//! normalization and no cap.

use crate::keyword::{MatchQuality, WordIndex};
use crate::manifest::{ScoringConfig, SkillDefinition, Weights};
use crate::path_match::PathTrigger;
use crate::pattern::{PatternMatcher, RegexPattern};
use crate::signals::ExtractedSignals;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Trigger category a signal matched on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Keyword,
    Extension,
    Pattern,
    Path,
}

impl SignalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::Keyword => "keyword",
            SignalType::Extension => "extension",
            SignalType::Pattern => "pattern",
            SignalType::Path => "path",
        }
    }
}

/// One trigger value that matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedSignal {
    #[serde(rename = "type")]
    pub signal_type: SignalType,

    pub value: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<MatchQuality>,
}

impl MatchedSignal {
    fn new(signal_type: SignalType, value: &str) -> Self {
        Self {
            signal_type,
            value: value.to_string(),
            quality: None,
        }
    }

    /// Short evidence label, e.g. `keyword:deploy (stem)`
    pub fn label(&self) -> String {
        match self.quality {
            Some(MatchQuality::Exact) | None => {
                format!("{}:{}", self.signal_type.as_str(), self.value)
            }
            Some(quality) => format!(
                "{}:{} ({})",
                self.signal_type.as_str(),
                self.value,
                quality.as_str()
            ),
        }
    }
}

/// Identity and display name of a scored skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRef {
    pub path: String,
    pub name: String,
}

/// Score of one skill for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillScoreResult {
    pub skill: SkillRef,
    pub score: f64,
    pub matched_signals: Vec<MatchedSignal>,
}

/// Which trigger categories take part in scoring.
///
/// Tool-use events carry no prose, so keywords and patterns are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreScope {
    Prompt,
    ToolUse,
}

impl ScoreScope {
    fn uses_prose(self) -> bool {
        matches!(self, ScoreScope::Prompt)
    }
}

/// Per-event scoring context shared across all skills.
pub struct Scorer<'a> {
    signals: &'a ExtractedSignals,
    words: WordIndex<'a>,
    normalized_prompt: &'a str,
    weights: Weights,
    config: ScoringConfig,
    scope: ScoreScope,
}

impl<'a> Scorer<'a> {
    pub fn new(
        signals: &'a ExtractedSignals,
        normalized_prompt: &'a str,
        weights: Weights,
        config: ScoringConfig,
        scope: ScoreScope,
    ) -> Self {
        Self {
            signals,
            words: WordIndex::new(&signals.words),
            normalized_prompt,
            weights,
            config,
            scope,
        }
    }

    /// Score one skill against the event's signals.
    ///
    /// Trigger values that only differ by case (or, for extensions, by the
    /// leading dot) are credited once, under the first spelling.
    pub fn score(&self, skill: &SkillDefinition) -> SkillScoreResult {
        let triggers = &skill.triggers;
        if triggers.is_empty() {
            return Self::result(skill, 0.0, Vec::new());
        }

        let mut score = 0.0;
        let mut matched = Vec::new();

        if self.scope.uses_prose() {
            let mut seen = HashSet::new();
            for keyword in &triggers.keywords {
                let keyword = keyword.to_lowercase();
                if !seen.insert(keyword.clone()) {
                    continue;
                }
                if let Some(quality) = self.words.match_keyword(&keyword) {
                    let factor = match quality {
                        MatchQuality::Fuzzy => self.config.fuzzy_discount,
                        MatchQuality::Exact | MatchQuality::Stem => 1.0,
                    };
                    score += self.weights.keywords * factor;
                    matched.push(MatchedSignal {
                        quality: Some(quality),
                        ..MatchedSignal::new(SignalType::Keyword, &keyword)
                    });
                }
            }
        }

        let mut seen = HashSet::new();
        for ext in &triggers.file_extensions {
            let dotted = dotted_extension(ext);
            if !seen.insert(dotted.clone()) {
                continue;
            }
            if self.signals.extensions.contains(&dotted) {
                score += self.weights.file_extensions;
                matched.push(MatchedSignal::new(SignalType::Extension, ext));
            }
        }

        if self.scope.uses_prose() && !self.normalized_prompt.is_empty() {
            let mut seen = HashSet::new();
            for pattern in &triggers.patterns {
                if !seen.insert(pattern.as_str()) {
                    continue;
                }
                match RegexPattern::new(pattern) {
                    Ok(re) => {
                        if re.is_match_within(self.normalized_prompt, self.config.proximity_bound)
                        {
                            score += self.weights.patterns;
                            matched.push(MatchedSignal::new(SignalType::Pattern, pattern));
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Invalid regex pattern in skill '{}': {} ({})",
                            skill.name, pattern, e
                        );
                    }
                }
            }
        }

        if !self.signals.paths.is_empty() {
            let mut seen = HashSet::new();
            for path in &triggers.file_paths {
                if !seen.insert(path.to_lowercase()) {
                    continue;
                }
                match PathTrigger::new(path) {
                    Ok(trigger) => {
                        if trigger.matches_any(&self.signals.paths) {
                            score += self.weights.file_paths;
                            matched.push(MatchedSignal::new(SignalType::Path, path));
                        }
                    }
                    Err(e) => {
                        warn!(
                            "Invalid path glob in skill '{}': {} ({})",
                            skill.name, path, e
                        );
                    }
                }
            }
        }

        Self::result(skill, score, matched)
    }

    fn result(
        skill: &SkillDefinition,
        score: f64,
        matched_signals: Vec<MatchedSignal>,
    ) -> SkillScoreResult {
        SkillScoreResult {
            skill: SkillRef {
                path: skill.path.clone(),
                name: skill.name.clone(),
            },
            score,
            matched_signals,
        }
    }
}

/// Lowercase an extension trigger and make sure it starts with a dot.
fn dotted_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Score a single skill against prompt signals.
pub fn score_skill(
    skill: &SkillDefinition,
    signals: &ExtractedSignals,
    normalized_prompt: &str,
    weights: &Weights,
) -> SkillScoreResult {
    Scorer::new(
        signals,
        normalized_prompt,
        *weights,
        ScoringConfig::default(),
        ScoreScope::Prompt,
    )
    .score(skill)
}
