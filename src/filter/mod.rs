//! Admission control for submitted commands.
//!
//! This module decides whether a trimmed command is recorded in history.
//! Rules are either regex patterns or plain predicates; a command matching
//! any of them is rejected.

mod rules;

pub use rules::{should_reject, FilterRule, FilterSet, BLANK_PATTERN};
