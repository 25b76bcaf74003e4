//! Condition matching and the regex compilation cache.

use std::num::NonZeroUsize;

use lru::LruCache;
use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::schema::{Condition, Operator};

/// The 128 most recently used distinct patterns stay compiled; beyond that
/// the least recently used entry is evicted. Eviction only costs a
/// recompilation, never correctness.
const REGEX_CACHE_CAPACITY: usize = 128;

/// Evaluates single conditions against extracted field values.
///
/// Owns the bounded regex-compilation cache, so matching takes `&mut self`.
/// The type is not meant to be shared across threads; a host that evaluates
/// sequentially within one long-lived process can reuse a single instance to
/// amortize compilation across invocations.
pub struct ConditionMatcher {
    cache: LruCache<String, Regex>,
}

impl std::fmt::Debug for ConditionMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionMatcher")
            .field("cached_patterns", &self.cache.len())
            .finish()
    }
}

impl ConditionMatcher {
    pub fn new() -> Self {
        Self::with_capacity(
            NonZeroUsize::new(REGEX_CACHE_CAPACITY).expect("cache capacity is non-zero"),
        )
    }

    /// Construct with a custom cache bound (used by eviction tests).
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Evaluate one condition against a present field value.
    ///
    /// Callers handle absent fields by failing the owning rule before this
    /// point. Unknown operators never match; invalid regex patterns never
    /// match and never propagate an error.
    pub fn matches(&mut self, condition: &Condition, value: &str) -> bool {
        let pattern = condition.pattern.as_str();
        match &condition.operator {
            Operator::RegexMatch => self.regex_search(pattern, value),
            Operator::Contains => value.contains(pattern),
            Operator::Equals => value == pattern,
            Operator::NotContains => !value.contains(pattern),
            Operator::StartsWith => value.starts_with(pattern),
            Operator::EndsWith => value.ends_with(pattern),
            Operator::Other(op) => {
                warn!(operator = %op, "unknown condition operator; treating as non-match");
                false
            }
        }
    }

    /// Case-insensitive search (not full-match) anywhere in `value`.
    fn regex_search(&mut self, pattern: &str, value: &str) -> bool {
        if let Some(re) = self.cache.get(pattern) {
            return re.is_match(value);
        }
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => {
                let is_match = re.is_match(value);
                self.cache.put(pattern.to_string(), re);
                is_match
            }
            Err(e) => {
                warn!(pattern, error = %e, "invalid regex pattern; treating as non-match");
                false
            }
        }
    }

    /// Number of compiled patterns currently cached.
    pub fn cached_patterns(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ConditionMatcher {
    fn default() -> Self {
        Self::new()
    }
}
