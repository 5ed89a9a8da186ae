//! Skill Activator - trigger-based skill activation and file ownership
//! enforcement for Claude Code hooks
//!
//! Decides, for one incoming event, which configured skills are relevant
//! enough to inject into the model's context, and whether a file edit must be
//! blocked because an enforced specialist agent owns the file.
//!
//! # Pipeline
//! - prompt: normalize -> extract signals -> score every skill -> filter/sort
//! - tool use: extract signals from the file path -> score extension and path
//!   triggers only -> filter/sort against the tool-use threshold
//! - edit: enforcement check against agent file patterns, bypassed for
//!   registered subagent sessions
//!
//! # Performance
//! Each invocation is a single-threaded, run-to-completion computation over
//! tens of skills; scoring is O(skills * triggers * words).

pub mod engine;
pub mod enforce;
pub mod error;
pub mod event;
pub mod fuzzy;
pub mod keyword;
pub mod manifest;
pub mod normalize;
pub mod output;
pub mod path_match;
pub mod pattern;
pub mod rank;
pub mod registry;
pub mod scorer;
pub mod signals;
pub mod stem;

pub use engine::{
    evaluate_enforce, evaluate_enforce_with, register_subagent_start, register_subagent_stop,
    score_prompt, score_prompt_with, score_tool_use, score_tool_use_with,
};
pub use enforce::{EnforceDecision, EnforceRequest};
pub use error::{CliError, ManifestError, RegistryError};
pub use event::{Event, HookInput};
pub use fuzzy::{fuzzy_threshold, levenshtein_distance, FUZZY_DISCOUNT};
pub use keyword::{MatchQuality, WordIndex};
pub use manifest::{AgentEnforceEntry, Manifest, ScoringConfig, SkillDefinition, TriggerSet, Weights};
pub use normalize::normalize;
pub use pattern::DEFAULT_PROXIMITY_BOUND;
pub use rank::{filter_by_threshold, sort_descending_by_score};
pub use registry::{FileRegistry, MemoryRegistry, RegistryStore};
pub use scorer::{score_skill, MatchedSignal, SignalType, SkillScoreResult};
pub use signals::ExtractedSignals;
pub use stem::stem;
