//! Rules-file loading and validation.
//!
//! Rules live in a single YAML file:
//!
//! ```yaml
//! version: "1.0"
//! rules:
//!   - name: block-rm-rf
//!     event: bash
//!     action: block
//!     message: "Dangerous rm command!"
//!     conditions:
//!       - field: command
//!         operator: regex_match
//!         pattern: 'rm\s+-rf'
//! ```
//!
//! Loading failures are typed and surface as hard failures in the binary;
//! a missing rules file is never silently treated as "no rules".

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::schema::{EventClass, Rule};

/// Errors raised while loading or validating a rules file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read rules file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse rules file: {0}")]
    Parse(#[from] serde_yml::Error),
    #[error("unsupported rules version '{0}'; only '1.0' is supported")]
    Version(String),
    #[error("rule name must not be empty")]
    EmptyName,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    version: String,
    #[serde(default)]
    rules: Vec<Rule>,
}

/// Load rules from a YAML file, keeping only enabled rules and (when
/// `event` is given) rules of that event class.
pub fn load_rules(
    path: impl AsRef<Path>,
    event: Option<EventClass>,
) -> Result<Vec<Rule>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_rules_from_str(&contents, event)
}

/// Parse, validate, and filter a rules document from a YAML string.
pub fn load_rules_from_str(
    yaml: &str,
    event: Option<EventClass>,
) -> Result<Vec<Rule>, LoadError> {
    let file: RuleFile = serde_yml::from_str(yaml)?;
    validate(&file)?;

    Ok(file
        .rules
        .into_iter()
        .filter(|r| r.enabled)
        .filter(|r| event.is_none_or(|e| r.event == e))
        .collect())
}

/// Version gate and name checks. Duplicate names are reported but kept:
/// the engine treats names as labels, not identities.
fn validate(file: &RuleFile) -> Result<(), LoadError> {
    if file.version != "1.0" {
        return Err(LoadError::Version(file.version.clone()));
    }

    let mut seen = HashSet::new();
    for rule in &file.rules {
        if rule.name.is_empty() {
            return Err(LoadError::EmptyName);
        }
        if !seen.insert(rule.name.as_str()) {
            warn!(rule = %rule.name, "duplicate rule name in rules file");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
version: "1.0"
rules:
  - name: "block-rm-rf"
    event: bash
    action: block
    message: "Dangerous rm command!"
    conditions:
      - field: command
        operator: regex_match
        pattern: "rm\\s+-rf"
  - name: "warn-env-edits"
    event: file
    tool_matcher: "Edit|Write"
    action: warn
    message: "You are touching an env file."
    conditions:
      - field: file_path
        operator: ends_with
        pattern: ".env"
  - name: "disabled-rule"
    enabled: false
    event: bash
    action: block
    message: "never loaded"
    conditions:
      - field: command
        operator: contains
        pattern: "x"
"#;

    #[test]
    fn load_and_filter_by_event() {
        let bash = load_rules_from_str(SAMPLE, Some(EventClass::Bash)).unwrap();
        assert_eq!(bash.len(), 1);
        assert_eq!(bash[0].name, "block-rm-rf");

        let file = load_rules_from_str(SAMPLE, Some(EventClass::File)).unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file[0].tool_matcher.as_deref(), Some("Edit|Write"));
    }

    #[test]
    fn no_filter_keeps_all_enabled_rules() {
        let all = load_rules_from_str(SAMPLE, None).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn disabled_rules_are_dropped() {
        let all = load_rules_from_str(SAMPLE, None).unwrap();
        assert!(all.iter().all(|r| r.name != "disabled-rule"));
    }

    #[test]
    fn reject_wrong_version() {
        let err = load_rules_from_str(r#"{version: "2.0", rules: []}"#, None).unwrap_err();
        assert!(matches!(err, LoadError::Version(v) if v == "2.0"));
    }

    #[test]
    fn reject_empty_rule_name() {
        let yaml = r#"
version: "1.0"
rules:
  - name: ""
    event: bash
    action: block
    message: "m"
"#;
        let err = load_rules_from_str(yaml, None).unwrap_err();
        assert!(matches!(err, LoadError::EmptyName));
    }

    #[test]
    fn duplicate_names_are_kept() {
        let yaml = r#"
version: "1.0"
rules:
  - name: "dup"
    event: bash
    action: block
    message: "first"
  - name: "dup"
    event: bash
    action: warn
    message: "second"
"#;
        let rules = load_rules_from_str(yaml, None).unwrap();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn unparsable_yaml_is_an_error() {
        let err = load_rules_from_str("rules: [unclosed", None).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_rules("/does/not/exist.yaml", None).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.yaml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();

        let rules = load_rules(&path, Some(EventClass::Bash)).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn unknown_operator_in_file_loads_as_inert_rule() {
        let yaml = r#"
version: "1.0"
rules:
  - name: "future-rule"
    event: bash
    action: block
    message: "m"
    conditions:
      - field: command
        operator: fuzzy_match
        pattern: "anything"
"#;
        let rules = load_rules_from_str(yaml, None).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(
            rules[0].conditions[0].operator,
            crate::schema::Operator::Other("fuzzy_match".to_string())
        );
    }
}
