//! Field extraction: resolves a condition's symbolic field name to the
//! concrete string value it should be tested against.
//!
//! Resolution is layered so rule authors can reference both raw tool-input
//! keys and semantic aliases without coupling rules to per-tool schemas:
//!
//! 1. a literal key present in `tool_input` wins outright;
//! 2. `reason` / `user_prompt` resolve from the payload top level;
//! 3. `transcript` reads the referenced transcript file (guarded against
//!    path traversal, and recovering from every read failure);
//! 4. tool-kind aliases (`command`, `content`, `new_text`, ...) resolve
//!    through the typed tool views;
//! 5. anything else is absent, which fails the owning rule.

use std::path::{Component, Path};

use serde_json::Value;
use tracing::warn;

use crate::payload::{HookPayload, ToolView};

/// Symbolic field names the extractor knows how to alias.
///
/// Parsing to a closed variant set keeps the alias table exhaustive; names
/// outside it are carried in [`FieldKey::Other`] and only participate in the
/// literal-key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKey {
    Command,
    Content,
    NewText,
    OldText,
    FilePath,
    Reason,
    Transcript,
    UserPrompt,
    Other(String),
}

impl FieldKey {
    /// Map a condition's `field` string to its key. `new_string` and
    /// `old_string` are accepted as spellings of `new_text` / `old_text`.
    pub fn parse(field: &str) -> Self {
        match field {
            "command" => Self::Command,
            "content" => Self::Content,
            "new_text" | "new_string" => Self::NewText,
            "old_text" | "old_string" => Self::OldText,
            "file_path" => Self::FilePath,
            "reason" => Self::Reason,
            "transcript" => Self::Transcript,
            "user_prompt" => Self::UserPrompt,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Resolve `field` against the payload. `None` means the field is absent
/// for this event, which short-circuits the owning rule to non-match.
pub fn extract(field: &str, payload: &HookPayload) -> Option<String> {
    // Literal tool_input keys take precedence over every alias.
    if let Some(value) = payload.tool_input.get(field) {
        return Some(stringify(value));
    }

    match FieldKey::parse(field) {
        FieldKey::Reason => Some(payload.reason.clone().unwrap_or_default()),
        FieldKey::UserPrompt => Some(payload.user_prompt.clone().unwrap_or_default()),
        FieldKey::Transcript => read_transcript(payload),
        key => extract_tool_alias(&key, payload),
    }
}

/// Non-string JSON values are rendered with their JSON representation, so a
/// numeric `timeout` field can still be tested with string operators.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Step 4: per-tool-kind aliasing via the typed views.
fn extract_tool_alias(key: &FieldKey, payload: &HookPayload) -> Option<String> {
    match (payload.tool_view(), key) {
        (ToolView::Bash(args), FieldKey::Command) => Some(args.command),

        // Write and Edit share the alias set. The literal-key lookup has
        // already handled whichever of `content` / `new_string` is present,
        // so these arms cover the cross-tool spellings.
        (ToolView::Write(args), FieldKey::Content) => Some(args.content),
        (ToolView::Write(_), FieldKey::NewText | FieldKey::OldText) => Some(String::new()),
        (ToolView::Write(args), FieldKey::FilePath) => Some(args.file_path),

        (ToolView::Edit(args), FieldKey::Content | FieldKey::NewText) => Some(args.new_string),
        (ToolView::Edit(args), FieldKey::OldText) => Some(args.old_string),
        (ToolView::Edit(args), FieldKey::FilePath) => Some(args.file_path),

        (ToolView::MultiEdit(args), FieldKey::FilePath) => Some(args.file_path),
        (ToolView::MultiEdit(args), FieldKey::NewText | FieldKey::Content) => Some(
            args.edits
                .iter()
                .map(|e| e.new_string.as_str())
                .collect::<Vec<_>>()
                .join(" "),
        ),

        _ => None,
    }
}

/// Step 3: read the transcript file referenced by the payload.
///
/// Absent `transcript_path` yields `None`. An unsafe path (absolute, or
/// containing a parent-directory segment) is rejected unconditionally, and
/// every read failure recovers to an empty string; neither ever aborts the
/// overall evaluation.
fn read_transcript(payload: &HookPayload) -> Option<String> {
    let raw = payload.transcript_path.as_deref()?;
    let path = Path::new(raw);

    if path.is_absolute()
        || path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        warn!(transcript_path = raw, "rejecting unsafe transcript path");
        return Some(String::new());
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            warn!(transcript_path = raw, error = %e, "failed to read transcript");
            Some(String::new())
        }
    }
}
