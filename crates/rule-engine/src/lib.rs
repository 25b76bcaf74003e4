//! # rule-engine
//!
//! Declarative guard-rule evaluation for agent runtime hook events. The
//! crate receives an already-parsed rule set and one hook payload per
//! invocation, and renders an event-shape-correct allow / warn / block
//! response.
//!
//! The crate is organised around the evaluation pipeline:
//!
//! 1. **[`permit`]** -- time-boxed override permits that bypass all rules.
//! 2. **[`extract`]** -- resolves a condition's symbolic field name to the
//!    string value under test, handling per-tool aliasing and guarded
//!    transcript reads.
//! 3. **[`condition`]** -- single field/operator/pattern tests, with a
//!    bounded LRU cache of compiled regexes.
//! 4. **[`matcher`]** -- tool filtering and per-rule condition conjunction.
//! 5. **[`decision`](HookResponse)** -- renders matched rules into the
//!    response shape the triggering event kind defines.
//! 6. **[`loader`]** -- YAML rules-file loading, validation, and event
//!    filtering.
//!
//! ## Quick start
//!
//! ```rust
//! use rule_engine::{loader, HookPayload, RuleEngine};
//!
//! let rules = loader::load_rules_from_str(r#"
//! version: "1.0"
//! rules:
//!   - name: block-rm-rf
//!     event: bash
//!     action: block
//!     message: "Dangerous rm command!"
//!     conditions:
//!       - field: command
//!         operator: regex_match
//!         pattern: "rm\\s+-rf"
//! "#, None).unwrap();
//!
//! let payload: HookPayload = serde_json::from_str(
//!     r#"{"hook_event_name":"PreToolUse","tool_name":"Bash","tool_input":{"command":"rm -rf /tmp"}}"#,
//! ).unwrap();
//!
//! let mut engine = RuleEngine::new();
//! let response = engine.evaluate(&rules, &payload);
//! assert!(!response.is_empty());
//! ```

pub mod condition;
mod decision;
mod evaluator;
pub mod extract;
pub mod loader;
pub mod matcher;
mod payload;
pub mod permit;
mod schema;

// Re-export primary public API at the crate root.
pub use condition::ConditionMatcher;
pub use decision::{compose, HookResponse, HookSpecificOutput};
pub use evaluator::RuleEngine;
pub use payload::{
    BashArgs, EditArgs, EditSpan, HookEvent, HookPayload, MultiEditArgs, ToolView, WriteArgs,
};
pub use schema::{Condition, EventClass, Operator, Rule, RuleAction};
