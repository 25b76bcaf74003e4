//! Event-shape-correct hook responses.
//!
//! The runtime's hook protocol keys the response shape off the event kind:
//! PreToolUse blocks through `hookSpecificOutput.permissionDecision`, Stop
//! and UserPromptSubmit through a top-level `decision`/`reason` pair,
//! PostToolUse through both. Warnings travel in `additionalContext` where
//! the event kind defines that channel, and are dropped where it doesn't.

use serde::Serialize;

use crate::payload::HookEvent;
use crate::schema::Rule;

/// The `hookSpecificOutput` object, populated per event kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    pub hook_event_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}

/// One hook invocation's output. Serializes to `{}` when the engine has no
/// opinion, which the runtime treats as fully permissive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HookResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "hookSpecificOutput", skip_serializing_if = "Option::is_none")]
    pub hook_specific_output: Option<HookSpecificOutput>,
}

impl HookResponse {
    /// The empty (no-opinion) response.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.decision.is_none() && self.reason.is_none() && self.hook_specific_output.is_none()
    }
}

/// Render matched rules into the event-appropriate response.
///
/// Blocking rules take priority over warnings; the combined message lists
/// every matched rule in evaluation order so the user sees every reason an
/// operation was denied, not just the first.
pub fn compose(blocking: &[&Rule], warning: &[&Rule], event: &HookEvent) -> HookResponse {
    if !blocking.is_empty() {
        let message = render_messages(blocking);
        return match event {
            HookEvent::PreToolUse => HookResponse {
                hook_specific_output: Some(HookSpecificOutput {
                    hook_event_name: event.name().to_string(),
                    permission_decision: Some("deny".to_string()),
                    permission_decision_reason: Some(message),
                    additional_context: None,
                }),
                ..Default::default()
            },
            HookEvent::PostToolUse => HookResponse {
                decision: Some("block".to_string()),
                reason: Some(message),
                hook_specific_output: Some(HookSpecificOutput {
                    hook_event_name: event.name().to_string(),
                    permission_decision: None,
                    permission_decision_reason: None,
                    additional_context: None,
                }),
            },
            HookEvent::Stop | HookEvent::UserPromptSubmit => HookResponse {
                decision: Some("block".to_string()),
                reason: Some(message),
                ..Default::default()
            },
            // SessionStart, Notification, unknown events: no blocking channel.
            _ => HookResponse::empty(),
        };
    }

    if !warning.is_empty() {
        let message = render_messages(warning);
        return match event {
            HookEvent::PostToolUse | HookEvent::UserPromptSubmit | HookEvent::SessionStart => {
                HookResponse {
                    hook_specific_output: Some(HookSpecificOutput {
                        hook_event_name: event.name().to_string(),
                        permission_decision: None,
                        permission_decision_reason: None,
                        additional_context: Some(message),
                    }),
                    ..Default::default()
                }
            }
            // PreToolUse warnings have no way to reach the agent without
            // blocking; other events have no context channel either.
            _ => HookResponse::empty(),
        };
    }

    HookResponse::empty()
}

fn render_messages(rules: &[&Rule]) -> String {
    rules
        .iter()
        .map(|r| format!("**[{}]**\n{}", r.name, r.message))
        .collect::<Vec<_>>()
        .join("\n\n")
}
