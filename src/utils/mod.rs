//! Utility modules for common functionality.
//!
//! Currently this is the logging setup used by the host binary.

pub mod logger;
