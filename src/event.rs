//! Hook payloads and the event type the engine dispatches on.
//!
//! The adapter classifies a payload once, by `hook_event_name`; nothing
//! downstream re-inspects its shape.

use serde::Deserialize;

// ============================================================================
// Input Types (from Claude Code hooks)
// ============================================================================

/// Input payload from a Claude Code hook
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    /// UserPromptSubmit, PreToolUse, SubagentStart, SubagentStop, ...
    #[serde(default, alias = "hookEventName")]
    pub hook_event_name: String,

    #[serde(default, alias = "sessionId")]
    pub session_id: String,

    /// Current working directory
    #[serde(default)]
    pub cwd: String,

    /// The user's prompt text (UserPromptSubmit)
    #[serde(default)]
    pub prompt: Option<String>,

    /// Tool being invoked (PreToolUse)
    #[serde(default, alias = "toolName")]
    pub tool_name: Option<String>,

    /// Tool arguments (PreToolUse)
    #[serde(default, alias = "toolInput")]
    pub tool_input: Option<ToolInput>,
}

/// The parts of a tool's arguments the engine looks at
#[derive(Debug, Default, Deserialize)]
pub struct ToolInput {
    #[serde(default, alias = "filePath")]
    pub file_path: Option<String>,

    #[serde(default, alias = "notebookPath")]
    pub notebook_path: Option<String>,
}

impl ToolInput {
    fn target_path(&self) -> Option<&str> {
        self.file_path
            .as_deref()
            .or(self.notebook_path.as_deref())
            .filter(|p| !p.trim().is_empty())
    }
}

// ============================================================================
// Events
// ============================================================================

/// One incoming event, classified once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Prompt {
        prompt: String,
    },
    ToolUse {
        tool_name: String,
        file_path: Option<String>,
    },
    SubagentStart,
    SubagentStop,
}

impl Event {
    /// Classify a hook payload; `None` for events this engine ignores.
    pub fn from_hook(input: &HookInput) -> Option<Self> {
        match input.hook_event_name.as_str() {
            "UserPromptSubmit" => Some(Event::Prompt {
                prompt: input.prompt.clone().unwrap_or_default(),
            }),
            "PreToolUse" => Some(Event::ToolUse {
                tool_name: input.tool_name.clone().unwrap_or_default(),
                file_path: input
                    .tool_input
                    .as_ref()
                    .and_then(ToolInput::target_path)
                    .map(str::to_string),
            }),
            "SubagentStart" => Some(Event::SubagentStart),
            "SubagentStop" => Some(Event::SubagentStop),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Event::Prompt { .. } => "UserPromptSubmit",
            Event::ToolUse { .. } => "PreToolUse",
            Event::SubagentStart => "SubagentStart",
            Event::SubagentStop => "SubagentStop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> HookInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_prompt_event() {
        let input = parse(
            r#"{"hook_event_name": "UserPromptSubmit", "session_id": "s1", "cwd": "/repo", "prompt": "fix the tests"}"#,
        );
        assert_eq!(
            Event::from_hook(&input),
            Some(Event::Prompt {
                prompt: "fix the tests".to_string()
            })
        );
        assert_eq!(input.session_id, "s1");
    }

    #[test]
    fn test_tool_use_event() {
        let input = parse(
            r#"{"hook_event_name": "PreToolUse", "tool_name": "Edit",
                "tool_input": {"file_path": "/repo/src/x.ts", "old_string": "a", "new_string": "b"}}"#,
        );
        assert_eq!(
            Event::from_hook(&input),
            Some(Event::ToolUse {
                tool_name: "Edit".to_string(),
                file_path: Some("/repo/src/x.ts".to_string()),
            })
        );
    }

    #[test]
    fn test_notebook_path_used_as_file_path() {
        let input = parse(
            r#"{"hook_event_name": "PreToolUse", "tool_name": "NotebookEdit",
                "tool_input": {"notebook_path": "/repo/nb/analysis.ipynb"}}"#,
        );
        let Some(Event::ToolUse { file_path, .. }) = Event::from_hook(&input) else {
            panic!("expected tool use");
        };
        assert_eq!(file_path.as_deref(), Some("/repo/nb/analysis.ipynb"));
    }

    #[test]
    fn test_tool_without_file_path() {
        let input = parse(
            r#"{"hook_event_name": "PreToolUse", "tool_name": "Bash", "tool_input": {"command": "ls"}}"#,
        );
        assert_eq!(
            Event::from_hook(&input),
            Some(Event::ToolUse {
                tool_name: "Bash".to_string(),
                file_path: None,
            })
        );
    }

    #[test]
    fn test_camel_case_aliases() {
        let input = parse(r#"{"hookEventName": "SubagentStop", "sessionId": "abc"}"#);
        assert_eq!(Event::from_hook(&input), Some(Event::SubagentStop));
        assert_eq!(input.session_id, "abc");
    }

    #[test]
    fn test_unknown_event_ignored() {
        let input = parse(r#"{"hook_event_name": "Notification"}"#);
        assert_eq!(Event::from_hook(&input), None);
        assert_eq!(Event::from_hook(&HookInput::default()), None);
    }
}
