//! Reject rules for submitted commands.
//!
//! A command is rejected when any rule matches it. Rules are checked in the
//! order they were added and evaluation stops at the first match.

use std::fmt;

use regex::Regex;

use crate::error::HistoryError;

/// Pattern used by the default rule set: blank or whitespace-only input.
pub const BLANK_PATTERN: &str = r"^\s*$";

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A single admission rule.
pub enum FilterRule {
    /// Matches when the regex finds a match anywhere in the input.
    Pattern(Regex),
    /// Matches when the function returns `true`.
    Predicate(Predicate),
}

impl FilterRule {
    /// Compile a pattern rule. Malformed patterns are reported here, at
    /// configuration time, rather than when a command is evaluated.
    pub fn pattern(pattern: &str) -> Result<Self, HistoryError> {
        Regex::new(pattern)
            .map(FilterRule::Pattern)
            .map_err(|source| HistoryError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        FilterRule::Predicate(Box::new(f))
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            FilterRule::Pattern(re) => re.is_match(input),
            FilterRule::Predicate(f) => f(input),
        }
    }
}

impl fmt::Debug for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterRule::Pattern(re) => f.debug_tuple("Pattern").field(&re.as_str()).finish(),
            FilterRule::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Returns true if any rule matches `input`. An empty rule list rejects nothing.
pub fn should_reject(input: &str, rules: &[FilterRule]) -> bool {
    rules.iter().any(|rule| rule.matches(input))
}

/// Ordered set of reject rules.
#[derive(Debug)]
pub struct FilterSet {
    rules: Vec<FilterRule>,
}

impl Default for FilterSet {
    /// A single rule rejecting blank input.
    fn default() -> Self {
        Self {
            rules: vec![FilterRule::predicate(|s| s.trim().is_empty())],
        }
    }
}

impl FilterSet {
    /// An empty set that admits everything.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Compile a list of reject patterns, failing on the first bad one.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, HistoryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| FilterRule::pattern(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn push(&mut self, rule: FilterRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn should_reject(&self, input: &str) -> bool {
        should_reject(input, &self.rules)
    }
}
