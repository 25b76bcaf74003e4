//! The rule engine: permit short-circuit, rule matching, and composition.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::condition::ConditionMatcher;
use crate::decision::{compose, HookResponse};
use crate::matcher::rule_applies;
use crate::payload::{HookEvent, HookPayload};
use crate::permit;
use crate::schema::{Rule, RuleAction};

/// Evaluates a rule set against hook payloads.
///
/// The engine is a pure function of (rules, payload) apart from two
/// read-only file accesses: the permit record and, when a condition asks
/// for it, the transcript. Its only mutable state is the regex cache inside
/// the condition matcher, hence `evaluate` takes `&mut self`; reuse a
/// single instance for sequential invocations, do not share one across
/// threads.
#[derive(Debug)]
pub struct RuleEngine {
    matcher: ConditionMatcher,
    permit_path: PathBuf,
}

impl RuleEngine {
    /// Engine reading the permit from its well-known path.
    pub fn new() -> Self {
        Self::with_permit_path(permit::PERMIT_PATH)
    }

    /// Engine reading the permit from `path` instead.
    pub fn with_permit_path(path: impl Into<PathBuf>) -> Self {
        Self {
            matcher: ConditionMatcher::new(),
            permit_path: path.into(),
        }
    }

    pub fn permit_path(&self) -> &Path {
        &self.permit_path
    }

    /// Evaluate every rule and render the combined decision.
    ///
    /// The permit is checked exactly once, before any rule; an active permit
    /// short-circuits to the empty response regardless of what would have
    /// matched. Disabled rules are skipped. Matched rules partition into
    /// blocking and warning sets in evaluation order.
    pub fn evaluate(&mut self, rules: &[Rule], payload: &HookPayload) -> HookResponse {
        if permit::bypass_active_at(&self.permit_path) {
            debug!("active override permit; bypassing all rules");
            return HookResponse::empty();
        }

        let event = HookEvent::parse(&payload.hook_event_name);
        let mut blocking: Vec<&Rule> = Vec::new();
        let mut warning: Vec<&Rule> = Vec::new();

        for rule in rules {
            if !rule.enabled {
                continue;
            }
            if rule_applies(&mut self.matcher, rule, payload) {
                trace!(rule = %rule.name, "rule matched");
                match rule.action {
                    RuleAction::Block => blocking.push(rule),
                    RuleAction::Warn => warning.push(rule),
                }
            }
        }

        compose(&blocking, &warning, &event)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
