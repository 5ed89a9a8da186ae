//! File ownership enforcement for edit/write tool calls.
//!
//! Rules are evaluated in order and the first applicable one decides:
//!
//! 1. not an edit/write tool: allow
//! 2. session is a registered subagent: allow
//! 3. manifest unusable or declares no agents: allow
//! 4. no agent is enforced with patterns: allow
//! 5. the file matches an enforced agent's pattern: block, naming every
//!    matching agent; otherwise allow
//!
//! Every uncertain path fails open.

use crate::manifest::Manifest;
use crate::path_match::{matches_any_form, GlobPattern, PathForms};
use crate::registry::RegistryStore;
use serde::Serialize;
use std::borrow::Borrow;
use tracing::{debug, info, warn};

/// Tools that modify files
pub const EDIT_TOOLS: &[&str] = &["edit", "multiedit", "write", "notebookedit"];

/// Outcome of an enforcement check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum EnforceDecision {
    Allow,
    Block {
        agents: Vec<String>,
        #[serde(rename = "filePath")]
        file_path: String,
    },
}

impl EnforceDecision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, EnforceDecision::Block { .. })
    }

    /// Message explaining a block; `None` for allow
    pub fn reason(&self) -> Option<String> {
        match self {
            EnforceDecision::Allow => None,
            EnforceDecision::Block { agents, file_path } => Some(format!(
                "{} is owned by the {} agent{}. Delegate this edit to {} instead of editing it directly.",
                file_path,
                agents.join(", "),
                if agents.len() == 1 { "" } else { "s" },
                if agents.len() == 1 { "that agent" } else { "one of them" },
            )),
        }
    }
}

/// True for tools that write or edit files (case-insensitive).
pub fn is_edit_tool(tool_name: &str) -> bool {
    let lower = tool_name.to_lowercase();
    EDIT_TOOLS.contains(&lower.as_str())
}

/// A single edit request to check.
#[derive(Debug, Clone, Copy)]
pub struct EnforceRequest<'a> {
    pub session_id: &'a str,
    pub tool_name: &'a str,
    pub file_path: &'a str,
    pub project_root: &'a str,
}

/// Decide whether an edit must be blocked.
///
/// `load_manifest` is only called once rules 1 and 2 have passed; a `None`
/// means the manifest could not be loaded. It may hand back an owned
/// manifest or borrow one the caller already holds.
pub fn evaluate<R, F, M>(request: &EnforceRequest<'_>, registry: &R, load_manifest: F) -> EnforceDecision
where
    R: RegistryStore + ?Sized,
    F: FnOnce() -> Option<M>,
    M: Borrow<Manifest>,
{
    if !is_edit_tool(request.tool_name) {
        return EnforceDecision::Allow;
    }

    if !request.session_id.is_empty() && registry.contains(request.session_id) {
        debug!("Session {} is a registered subagent, allowing", request.session_id);
        return EnforceDecision::Allow;
    }

    let Some(manifest) = load_manifest() else {
        return EnforceDecision::Allow;
    };

    evaluate_with_manifest(request, manifest.borrow())
}

/// Rules 3-5 against an already loaded manifest.
pub fn evaluate_with_manifest(request: &EnforceRequest<'_>, manifest: &Manifest) -> EnforceDecision {
    if manifest.agents.is_empty() || request.file_path.trim().is_empty() {
        return EnforceDecision::Allow;
    }

    let enforced: Vec<_> = manifest
        .agents
        .iter()
        .filter(|(_, entry)| entry.is_active())
        .collect();
    if enforced.is_empty() {
        return EnforceDecision::Allow;
    }

    let forms = PathForms::new(request.file_path, request.project_root);
    let forms = forms.as_slice();

    let mut owners = Vec::new();
    for (name, entry) in enforced {
        let owns = entry.file_patterns.iter().any(|pattern| match GlobPattern::new(pattern) {
            Ok(glob) => matches_any_form(&glob, &forms),
            Err(e) => {
                warn!("Invalid file pattern for agent '{}': {} ({})", name, pattern, e);
                false
            }
        });
        if owns {
            owners.push(name.clone());
        }
    }

    if owners.is_empty() {
        return EnforceDecision::Allow;
    }

    info!("Blocking {} on {}: owned by {:?}", request.tool_name, request.file_path, owners);
    EnforceDecision::Block {
        agents: owners,
        file_path: request.file_path.to_string(),
    }
}
