//! Rule and condition definitions.
//!
//! These types are deserialized from the YAML rules file by [`crate::loader`]
//! and passed by reference into the engine, which treats them as read-only
//! for the duration of an evaluation.

use serde::{Deserialize, Serialize};

/// A single guard rule: a tool filter plus an ordered condition set, with an
/// action and message applied when every condition matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Human-readable rule name, shown in block/warn messages.
    ///
    /// Names are expected to be unique within a loaded set, but the engine
    /// itself never relies on uniqueness.
    pub name: String,
    /// Disabled rules are skipped entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Which event class this rule belongs to.
    pub event: EventClass,
    /// Optional tool filter: `*`, a single tool name, or a `|`-delimited
    /// alternation (e.g. `"Edit|Write"`).
    #[serde(default)]
    pub tool_matcher: Option<String>,
    /// Conditions, all of which must match (logical AND, in listed order).
    /// A rule with zero conditions never matches.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// What happens when the rule fires.
    pub action: RuleAction,
    /// Message template shown to the user when the rule fires.
    pub message: String,
}

fn default_enabled() -> bool {
    true
}

/// A single field / operator / pattern test within a rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    /// Symbolic field name resolved by the field extractor: `command`,
    /// `content`, `new_text`, `old_text`, `file_path`, `reason`,
    /// `transcript`, `user_prompt`, or any literal tool-input key.
    pub field: String,
    /// How to compare the extracted value against `pattern`.
    pub operator: Operator,
    /// Literal string or regex, depending on the operator.
    pub pattern: String,
}

/// Event classes a rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClass {
    /// Shell-command tool events.
    Bash,
    /// File write/edit tool events.
    File,
    /// Session-stop events.
    Stop,
    /// User prompt submission events.
    UserPrompt,
    /// Session-start events.
    SessionStart,
    /// Notification events.
    Notification,
}

/// What a matched rule does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Prevent the operation and surface the rule message.
    Block,
    /// Let the operation proceed but surface the rule message as context.
    Warn,
}

/// Comparison operators available to conditions.
///
/// Operator strings not in the known set deserialize into [`Operator::Other`]
/// and never match, so a rules file written for a newer engine degrades to
/// inert rules instead of a load failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Case-insensitive regex search anywhere in the value.
    RegexMatch,
    /// Literal substring test.
    Contains,
    /// Exact string equality.
    Equals,
    /// Negated literal substring test.
    NotContains,
    /// Literal prefix test.
    StartsWith,
    /// Literal suffix test.
    EndsWith,
    /// Any unrecognized operator string.
    #[serde(untagged)]
    Other(String),
}
