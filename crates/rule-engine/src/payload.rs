//! Hook event payload types.
//!
//! The agent runtime delivers one JSON object per invocation. Its shape is
//! loosely typed at the wire level (`tool_input` is tool-specific), so the
//! payload keeps the raw object for literal key lookups and additionally
//! offers typed views for the tool kinds the engine knows about, with a
//! generic fallback for everything else.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The hook event names defined by the runtime's hook protocol.
///
/// Unrecognized names are preserved in [`HookEvent::Other`]; they evaluate
/// like events with no blocking or warning channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    PreToolUse,
    PostToolUse,
    Stop,
    UserPromptSubmit,
    SessionStart,
    Notification,
    Other(String),
}

impl HookEvent {
    /// Parse a `hook_event_name` string.
    pub fn parse(name: &str) -> Self {
        match name {
            "PreToolUse" => Self::PreToolUse,
            "PostToolUse" => Self::PostToolUse,
            "Stop" => Self::Stop,
            "UserPromptSubmit" => Self::UserPromptSubmit,
            "SessionStart" => Self::SessionStart,
            "Notification" => Self::Notification,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire name, as echoed back in `hookSpecificOutput.hookEventName`.
    pub fn name(&self) -> &str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Stop => "Stop",
            Self::UserPromptSubmit => "UserPromptSubmit",
            Self::SessionStart => "SessionStart",
            Self::Notification => "Notification",
            Self::Other(name) => name,
        }
    }
}

/// One hook invocation's input, as received on stdin.
///
/// Every field is optional on the wire; absent fields default so that a
/// minimal `{}` payload still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookPayload {
    #[serde(default)]
    pub hook_event_name: String,
    /// Empty for non-tool events (Stop, UserPromptSubmit, ...).
    #[serde(default)]
    pub tool_name: String,
    /// Raw tool-specific input object.
    #[serde(default)]
    pub tool_input: Map<String, Value>,
    /// Stop-event reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Path to the session transcript, when the event carries one.
    #[serde(default)]
    pub transcript_path: Option<String>,
    /// UserPromptSubmit-event prompt text.
    #[serde(default)]
    pub user_prompt: Option<String>,
}

impl HookPayload {
    /// Typed view of `tool_input` for the known tool kinds.
    ///
    /// Parse failures (and tools the engine has no schema for) fall back to
    /// [`ToolView::Unknown`] rather than erroring; the raw object remains
    /// available for literal key lookups either way.
    pub fn tool_view(&self) -> ToolView {
        let value = Value::Object(self.tool_input.clone());
        match self.tool_name.as_str() {
            "Bash" => serde_json::from_value(value)
                .map(ToolView::Bash)
                .unwrap_or(ToolView::Unknown),
            "Write" => serde_json::from_value(value)
                .map(ToolView::Write)
                .unwrap_or(ToolView::Unknown),
            "Edit" => serde_json::from_value(value)
                .map(ToolView::Edit)
                .unwrap_or(ToolView::Unknown),
            "MultiEdit" => serde_json::from_value(value)
                .map(ToolView::MultiEdit)
                .unwrap_or(ToolView::Unknown),
            _ => ToolView::Unknown,
        }
    }
}

/// Closed set of tool-input shapes the field extractor understands.
#[derive(Debug, Clone)]
pub enum ToolView {
    Bash(BashArgs),
    Write(WriteArgs),
    Edit(EditArgs),
    MultiEdit(MultiEditArgs),
    /// Any tool the engine has no schema for.
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BashArgs {
    #[serde(default)]
    pub command: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WriteArgs {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditArgs {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub old_string: String,
    #[serde(default)]
    pub new_string: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MultiEditArgs {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub edits: Vec<EditSpan>,
}

/// A single replacement within a MultiEdit call.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditSpan {
    #[serde(default)]
    pub old_string: String,
    #[serde(default)]
    pub new_string: String,
}
