//! Error types surfaced by the history core.
//!
//! Most fallible operations return `anyhow::Result`; the variants below are
//! the ones a host may want to tell apart, recoverable with
//! `err.downcast_ref::<HistoryError>()`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    /// A reject pattern failed to compile.
    #[error("invalid reject pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `max_size` was configured as zero.
    #[error("history size must be a positive integer")]
    ZeroCapacity,

    /// A submission arrived with no shell process attached to the session.
    #[error("no shell process attached to the session")]
    NoProcess,

    /// Writing the history file failed.
    #[error("failed to write history file {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
