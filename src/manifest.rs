//! Skill manifest: trigger definitions, weights, thresholds and agent
//! ownership rules.
//!
//! The manifest is read fresh for every event and never cached.

use crate::error::ManifestError;
use crate::fuzzy::FUZZY_DISCOUNT;
use crate::pattern::DEFAULT_PROXIMITY_BOUND;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// Manifest Types
// ============================================================================

/// Per-category score weights. Missing categories take their default.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub keywords: f64,
    pub file_extensions: f64,
    pub patterns: f64,
    pub file_paths: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            keywords: 1.0,
            file_extensions: 1.5,
            patterns: 2.0,
            file_paths: 2.5,
        }
    }
}

impl Weights {
    fn validate(&self) -> Result<(), ManifestError> {
        for (category, value) in [
            ("keywords", self.keywords),
            ("file_extensions", self.file_extensions),
            ("patterns", self.patterns),
            ("file_paths", self.file_paths),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ManifestError::InvalidWeight { category, value });
            }
        }
        Ok(())
    }
}

/// Trigger conditions of a skill. Every list may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TriggerSet {
    pub keywords: Vec<String>,
    pub file_extensions: Vec<String>,
    pub patterns: Vec<String>,
    pub file_paths: Vec<String>,
}

impl TriggerSet {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.file_extensions.is_empty()
            && self.patterns.is_empty()
            && self.file_paths.is_empty()
    }
}

/// A skill that can be activated. `path` is its identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillDefinition {
    /// Path to the skill's SKILL.md
    pub path: String,

    /// Display name
    pub name: String,

    /// One-line description of when to use it
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub triggers: TriggerSet,
}

/// File ownership declared by a specialist agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgentEnforceEntry {
    #[serde(default)]
    pub file_patterns: Vec<String>,

    #[serde(default)]
    pub enforce: bool,
}

impl AgentEnforceEntry {
    /// Enforced with at least one pattern; anything else never blocks
    pub fn is_active(&self) -> bool {
        self.enforce && !self.file_patterns.is_empty()
    }
}

/// Tunable scoring constants
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Maximum span, in characters, of a counted pattern match
    pub proximity_bound: usize,

    /// Multiplier for fuzzy keyword matches
    pub fuzzy_discount: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            proximity_bound: DEFAULT_PROXIMITY_BOUND,
            fuzzy_discount: FUZZY_DISCOUNT,
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> Result<(), ManifestError> {
        if self.proximity_bound == 0 {
            return Err(ManifestError::InvalidScoring {
                name: "proximity_bound",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.fuzzy_discount > 0.0 && self.fuzzy_discount <= 1.0) {
            return Err(ManifestError::InvalidScoring {
                name: "fuzzy_discount",
                reason: format!("{} is outside (0, 1]", self.fuzzy_discount),
            });
        }
        Ok(())
    }
}

/// The complete manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub weights: Weights,

    #[serde(default)]
    pub skills: Vec<SkillDefinition>,

    /// Minimum score for a prompt to activate a skill
    pub activation_threshold: f64,

    /// Minimum score for a tool-use suggestion; falls back to
    /// `activation_threshold`
    #[serde(default)]
    pub pretooluse_threshold: Option<f64>,

    /// Cap on the number of skills returned after ranking
    #[serde(default)]
    pub max_suggestions: Option<usize>,

    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Agent name to ownership rules, ordered by name
    #[serde(default)]
    pub agents: BTreeMap<String, AgentEnforceEntry>,
}

// ============================================================================
// Loading
// ============================================================================

impl Manifest {
    /// Read, parse and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;

        manifest.validate()?;
        debug!(
            "Loaded manifest {:?}: {} skills, {} agents",
            path,
            manifest.skills.len(),
            manifest.agents.len()
        );
        Ok(manifest)
    }

    /// Reject weights, thresholds and tuning values the scorer cannot use.
    pub fn validate(&self) -> Result<(), ManifestError> {
        self.weights.validate()?;
        check_threshold("activation_threshold", self.activation_threshold)?;
        if let Some(value) = self.pretooluse_threshold {
            check_threshold("pretooluse_threshold", value)?;
        }
        self.scoring.validate()
    }

    /// Threshold applied to tool-use suggestions
    pub fn tool_use_threshold(&self) -> f64 {
        self.pretooluse_threshold
            .unwrap_or(self.activation_threshold)
    }
}

fn check_threshold(name: &'static str, value: f64) -> Result<(), ManifestError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ManifestError::InvalidThreshold { name, value });
    }
    Ok(())
}
