//! Command history storage.
//!
//! This module holds the in-memory history list and its flat-file
//! persistence.
//!
//! # Features
//!
//! - Most-recent-first ordering with move-to-front on repeated commands
//! - Size cap enforced on every insert and on every save
//! - Merge-on-save so concurrent sessions don't drop each other's commands
//! - Escaped line format that survives multi-line commands

pub mod persist;
pub mod store;

pub use persist::{default_history_path, merge, HistoryFile};
pub use store::{HistoryStore, DEFAULT_MAX_SIZE};
