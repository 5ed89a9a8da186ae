//! Entry points that tie loading, extraction, scoring and ranking together.
//!
//! These functions encode the failure policy: a manifest that cannot be
//! loaded means "nothing activates" for scoring and "allow" for enforcement.
//! Causes are logged, never returned.

use crate::enforce::{self, EnforceDecision, EnforceRequest};
use crate::error::RegistryError;
use crate::manifest::Manifest;
use crate::normalize::normalize;
use crate::rank::rank;
use crate::registry::{self, FileRegistry, RegistryStore};
use crate::scorer::{ScoreScope, Scorer, SkillScoreResult};
use crate::signals::ExtractedSignals;
use std::path::Path;
use tracing::{debug, warn};

fn load_manifest(manifest_path: &Path) -> Option<Manifest> {
    match Manifest::load(manifest_path) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            warn!("Manifest unavailable: {}", e);
            None
        }
    }
}

/// Rank the manifest's skills for a user prompt.
pub fn score_prompt(prompt: &str, manifest_path: &Path) -> Vec<SkillScoreResult> {
    let normalized = normalize(prompt);
    if normalized.is_empty() {
        debug!("Empty prompt after normalization, skipping");
        return Vec::new();
    }

    match load_manifest(manifest_path) {
        Some(manifest) => score_prompt_with(&normalized, &manifest),
        None => Vec::new(),
    }
}

/// Rank skills for an already normalized prompt against a loaded manifest.
pub fn score_prompt_with(normalized: &str, manifest: &Manifest) -> Vec<SkillScoreResult> {
    let signals = ExtractedSignals::from_prompt(normalized);
    let scorer = Scorer::new(
        &signals,
        normalized,
        manifest.weights,
        manifest.scoring,
        ScoreScope::Prompt,
    );
    let results: Vec<SkillScoreResult> = manifest.skills.iter().map(|s| scorer.score(s)).collect();
    rank(&results, manifest.activation_threshold, manifest.max_suggestions)
}

/// Rank skills for a file touched by a tool, using only extension and path
/// triggers and the tool-use threshold.
pub fn score_tool_use(
    file_path: &str,
    manifest_path: &Path,
    project_root: &str,
) -> Vec<SkillScoreResult> {
    if file_path.trim().is_empty() {
        return Vec::new();
    }

    match load_manifest(manifest_path) {
        Some(manifest) => score_tool_use_with(file_path, project_root, &manifest),
        None => Vec::new(),
    }
}

/// Tool-use ranking against a loaded manifest.
pub fn score_tool_use_with(
    file_path: &str,
    project_root: &str,
    manifest: &Manifest,
) -> Vec<SkillScoreResult> {
    let signals = ExtractedSignals::from_file_path(file_path, project_root);
    if signals.is_empty() {
        return Vec::new();
    }

    let scorer = Scorer::new(
        &signals,
        "",
        manifest.weights,
        manifest.scoring,
        ScoreScope::ToolUse,
    );
    let results: Vec<SkillScoreResult> = manifest.skills.iter().map(|s| scorer.score(s)).collect();
    rank(&results, manifest.tool_use_threshold(), manifest.max_suggestions)
}

/// Decide whether an edit is blocked by agent file ownership, using the
/// file registry at `registry_path`.
pub fn evaluate_enforce(
    session_id: &str,
    tool_name: &str,
    file_path: &str,
    manifest_path: &Path,
    registry_path: &Path,
    project_root: &str,
) -> EnforceDecision {
    evaluate_enforce_with(
        &EnforceRequest {
            session_id,
            tool_name,
            file_path,
            project_root,
        },
        manifest_path,
        &FileRegistry::new(registry_path),
    )
}

/// [`evaluate_enforce`] with an injected registry store.
pub fn evaluate_enforce_with<R: RegistryStore + ?Sized>(
    request: &EnforceRequest<'_>,
    manifest_path: &Path,
    registry: &R,
) -> EnforceDecision {
    enforce::evaluate(request, registry, || load_manifest(manifest_path))
}

/// Record that `session_id` belongs to a running subagent.
pub fn register_subagent_start(session_id: &str, registry_path: &Path) -> Result<bool, RegistryError> {
    registry::register_start(&FileRegistry::new(registry_path), session_id)
}

/// Forget `session_id` once its subagent has finished.
pub fn register_subagent_stop(session_id: &str, registry_path: &Path) -> Result<bool, RegistryError> {
    registry::register_stop(&FileRegistry::new(registry_path), session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manifest(json: &str) -> Manifest {
        let manifest: Manifest = serde_json::from_str(json).unwrap();
        manifest.validate().unwrap();
        manifest
    }

    fn two_skills() -> Manifest {
        manifest(
            r#"{
                "activation_threshold": 1.0,
                "pretooluse_threshold": 1.5,
                "skills": [
                    {"path": "skills/testing/SKILL.md", "name": "testing",
                     "triggers": {"keywords": ["test", "jest"], "file_extensions": [".test.ts"],
                                  "file_paths": ["tests/"]}},
                    {"path": "skills/frontend/SKILL.md", "name": "frontend",
                     "triggers": {"keywords": ["component", "react"], "file_extensions": [".tsx"],
                                  "file_paths": ["src/components/**"]}}
                ]
            }"#,
        )
    }

    fn names(results: &[SkillScoreResult]) -> Vec<&str> {
        results.iter().map(|r| r.skill.name.as_str()).collect()
    }

    #[test]
    fn test_prompt_ranking() {
        let results = score_prompt_with(
            &normalize("Write a jest test for the React component"),
            &two_skills(),
        );
        // testing: test + jest = 2.0, frontend: component + react = 2.0 -> name order
        assert_eq!(names(&results), vec!["frontend", "testing"]);
        assert_eq!(results[0].score, 2.0);
    }

    #[test]
    fn test_prompt_below_threshold() {
        let results = score_prompt_with(&normalize("hello there"), &two_skills());
        assert!(results.is_empty());
    }

    #[test]
    fn test_tool_use_ignores_keywords() {
        // "component" appears in the path words but keywords are not scored
        let results =
            score_tool_use_with("/repo/src/components/Card.tsx", "/repo", &two_skills());
        assert_eq!(names(&results), vec!["frontend"]);
        assert_eq!(results[0].score, 1.5 + 2.5);
    }

    #[test]
    fn test_tool_use_threshold_applies() {
        // Only the extension matches: 1.5 >= 1.5 threshold
        let results = score_tool_use_with("/repo/lib/Widget.tsx", "/repo", &two_skills());
        assert_eq!(names(&results), vec!["frontend"]);

        // Nothing matches
        let results = score_tool_use_with("/repo/README.md", "/repo", &two_skills());
        assert!(results.is_empty());
    }

    #[test]
    fn test_tool_use_brace_glob() {
        let manifest = manifest(
            r#"{
                "activation_threshold": 2.0,
                "skills": [
                    {"path": "skills/ts/SKILL.md", "name": "ts",
                     "triggers": {"file_paths": ["src/**/*.{ts,tsx}"]}}
                ]
            }"#,
        );
        let results = score_tool_use_with("/repo/src/a/x.ts", "/repo", &manifest);
        assert_eq!(names(&results), vec!["ts"]);
        assert!(score_tool_use_with("/repo/src/a/x.rs", "/repo", &manifest).is_empty());
    }

    #[test]
    fn test_max_suggestions_caps_results() {
        let mut manifest = two_skills();
        manifest.max_suggestions = Some(1);
        let results = score_prompt_with(
            &normalize("Write a jest test for the React component"),
            &manifest,
        );
        assert_eq!(names(&results), vec!["frontend"]);
    }

    #[test]
    fn test_missing_manifest_activates_nothing() {
        let path = Path::new("/nonexistent/skill-manifest.json");
        assert!(score_prompt("write a test", path).is_empty());
        assert!(score_tool_use("/repo/x.tsx", path, "/repo").is_empty());
    }

    #[test]
    fn test_blank_inputs_short_circuit() {
        let path = Path::new("/nonexistent/skill-manifest.json");
        assert!(score_prompt("  ?! ", path).is_empty());
        assert!(score_tool_use("", path, "/repo").is_empty());
    }
}
