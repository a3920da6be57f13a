//! RustyHistory - command history recording for interactive shell sessions
//!
//! This library provides the core of a shell history recorder:
//! - Admission control for submitted commands (regex and predicate rules)
//! - A bounded, deduplicated, most-recent-first history store
//! - Flat-file persistence with merge-on-save across sessions
//! - Session hooks connecting the recorder to a host shell
//!
//! # Example
//!
//! ```no_run
//! use rusty_history::config::HistoryConfig;
//! use rusty_history::session::{Recorder, SessionHost};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = HistoryConfig::load_or_default()?;
//!     let mut host = SessionHost::new();
//!     let mut recorder = Recorder::new(&config)?;
//!
//!     // Loads the history file and registers submit/shutdown hooks
//!     recorder.activate(&mut host)?;
//!
//!     host.submit(Some(std::process::id()), "  cargo build\n")?;
//!     assert_eq!(recorder.search()[0], "cargo build");
//!
//!     // Merges this session's history into the file
//!     host.shutdown()
//! }
//! ```

pub mod config;
pub mod error;
pub mod filter;
pub mod history;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use config::HistoryConfig;
pub use error::HistoryError;
pub use filter::{FilterRule, FilterSet};
pub use history::{HistoryFile, HistoryStore};
pub use session::{Recorder, SessionHost, TrimPolicy};
