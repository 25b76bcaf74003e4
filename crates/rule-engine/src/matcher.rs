//! Rule-level matching: tool filter plus condition conjunction.

use crate::condition::ConditionMatcher;
use crate::extract;
use crate::payload::HookPayload;
use crate::schema::Rule;

/// Check whether `tool_name` satisfies a rule's tool matcher.
///
/// `*` matches every tool; otherwise the matcher is split on `|` and the
/// tool name must equal one of the alternatives exactly.
pub fn matches_tool(matcher: &str, tool_name: &str) -> bool {
    if matcher == "*" {
        return true;
    }
    matcher.split('|').any(|alt| alt == tool_name)
}

/// Check whether a rule applies to the payload.
///
/// A rule applies when its tool matcher (if any) accepts the payload's tool
/// name and every condition matches. A rule with zero conditions never
/// applies. A condition whose field is absent for this event fails the rule.
/// Evaluation short-circuits on the first failing condition.
pub fn rule_applies(matcher: &mut ConditionMatcher, rule: &Rule, payload: &HookPayload) -> bool {
    if let Some(tool_matcher) = &rule.tool_matcher {
        if !matches_tool(tool_matcher, &payload.tool_name) {
            return false;
        }
    }

    if rule.conditions.is_empty() {
        return false;
    }

    rule.conditions.iter().all(|condition| {
        match extract::extract(&condition.field, payload) {
            Some(value) => matcher.matches(condition, &value),
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Condition, EventClass, Operator, RuleAction};

    fn rule(tool_matcher: Option<&str>, conditions: Vec<Condition>) -> Rule {
        Rule {
            name: "test-rule".to_string(),
            enabled: true,
            event: EventClass::Bash,
            tool_matcher: tool_matcher.map(str::to_string),
            conditions,
            action: RuleAction::Block,
            message: "blocked".to_string(),
        }
    }

    fn cond(field: &str, operator: Operator, pattern: &str) -> Condition {
        Condition {
            field: field.to_string(),
            operator,
            pattern: pattern.to_string(),
        }
    }

    fn bash_payload(command: &str) -> HookPayload {
        serde_json::from_str(&format!(
            r#"{{"tool_name":"Bash","tool_input":{{"command":{}}}}}"#,
            serde_json::Value::String(command.to_string())
        ))
        .unwrap()
    }

    // ---- tool matcher ----

    #[test]
    fn star_matches_every_tool() {
        assert!(matches_tool("*", "Bash"));
        assert!(matches_tool("*", "Edit"));
        assert!(matches_tool("*", ""));
    }

    #[test]
    fn alternation_matches_exact_literals() {
        assert!(matches_tool("Edit|Write", "Edit"));
        assert!(matches_tool("Edit|Write", "Write"));
        assert!(!matches_tool("Edit|Write", "Bash"));
        assert!(!matches_tool("Edit|Write", "Edi"));
    }

    #[test]
    fn single_tool_is_exact_match() {
        assert!(matches_tool("Bash", "Bash"));
        assert!(!matches_tool("Bash", "bash"));
    }

    // ---- rule_applies ----

    #[test]
    fn rule_with_no_conditions_never_applies() {
        let mut m = ConditionMatcher::new();
        let r = rule(Some("*"), vec![]);
        assert!(!rule_applies(&mut m, &r, &bash_payload("anything")));
    }

    #[test]
    fn single_condition_match() {
        let mut m = ConditionMatcher::new();
        let r = rule(
            Some("Bash"),
            vec![cond("command", Operator::RegexMatch, r"rm\s+-rf")],
        );
        assert!(rule_applies(&mut m, &r, &bash_payload("rm -rf /tmp/test")));
        assert!(!rule_applies(&mut m, &r, &bash_payload("ls -la")));
    }

    #[test]
    fn all_conditions_must_match() {
        let mut m = ConditionMatcher::new();
        let r = rule(
            None,
            vec![
                cond("command", Operator::Contains, "git push"),
                cond("command", Operator::Contains, "--force"),
            ],
        );
        assert!(rule_applies(&mut m, &r, &bash_payload("git push --force origin")));
        assert!(!rule_applies(&mut m, &r, &bash_payload("git push origin")));
    }

    #[test]
    fn tool_matcher_gates_conditions() {
        let mut m = ConditionMatcher::new();
        let r = rule(
            Some("Edit|Write"),
            vec![cond("command", Operator::Contains, "rm")],
        );
        // Tool filter fails before conditions are consulted.
        assert!(!rule_applies(&mut m, &r, &bash_payload("rm -rf /")));
    }

    #[test]
    fn absent_field_fails_rule() {
        let mut m = ConditionMatcher::new();
        let r = rule(
            None,
            vec![cond("no_such_field", Operator::Contains, "x")],
        );
        assert!(!rule_applies(&mut m, &r, &bash_payload("x marks the spot")));
    }

    #[test]
    fn file_rule_against_edit_payload() {
        let mut m = ConditionMatcher::new();
        let payload: HookPayload = serde_json::from_str(
            r#"{"tool_name":"Edit","tool_input":{"file_path":"/app/.env","old_string":"A=1","new_string":"A=2"}}"#,
        )
        .unwrap();
        let r = rule(
            Some("Edit|Write"),
            vec![cond("file_path", Operator::EndsWith, ".env")],
        );
        assert!(rule_applies(&mut m, &r, &payload));
    }
}
