//! Hook responses written to stdout.

use crate::enforce::EnforceDecision;
use crate::manifest::Manifest;
use crate::scorer::SkillScoreResult;
use serde::Serialize;
use std::fmt::Write;

// ============================================================================
// Output Types (Claude Code hook response)
// ============================================================================

/// Output payload for a Claude Code hook. Serializes to `{}` when there is
/// nothing to say.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,

    /// Text injected into the model's context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,

    /// "deny" for blocked edits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
}

impl HookOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Inject `context` for `event_name`, or say nothing if it is empty.
    pub fn context(event_name: &str, context: String) -> Self {
        if context.is_empty() {
            return Self::empty();
        }
        Self {
            hook_specific_output: Some(HookSpecificOutput {
                hook_event_name: event_name.to_string(),
                additional_context: Some(context),
                permission_decision: None,
                permission_decision_reason: None,
            }),
        }
    }

    /// Deny a PreToolUse call. Allow decisions produce no output.
    pub fn from_decision(decision: &EnforceDecision) -> Self {
        match decision.reason() {
            Some(reason) => Self {
                hook_specific_output: Some(HookSpecificOutput {
                    hook_event_name: "PreToolUse".to_string(),
                    additional_context: None,
                    permission_decision: Some("deny".to_string()),
                    permission_decision_reason: Some(reason),
                }),
            },
            None => Self::empty(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

// ============================================================================
// Context Formatting
// ============================================================================

/// Render ranked skills as the context block injected for the model.
///
/// Descriptions are looked up in `manifest` by skill path. Empty results
/// render as an empty string.
pub fn format_context(heading: &str, results: &[SkillScoreResult], manifest: &Manifest) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{heading}");
    for result in results {
        let _ = write!(out, "- {} (score {:.2})", result.skill.name, result.score);
        let description = manifest
            .skills
            .iter()
            .find(|s| s.path == result.skill.path)
            .and_then(|s| s.description.as_deref())
            .filter(|d| !d.is_empty());
        if let Some(description) = description {
            let _ = write!(out, ": {description}");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "  path: {}", result.skill.path);

        if !result.matched_signals.is_empty() {
            let labels: Vec<String> = result.matched_signals.iter().map(|m| m.label()).collect();
            let _ = writeln!(out, "  matched: {}", labels.join(", "));
        }
    }
    out.trim_end().to_string()
}
