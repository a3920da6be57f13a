//! Session integration for the history recorder.
//!
//! This module connects the history core to the shell session hosting it.
//! The host exposes two extension points (before-submit and shutdown) and the
//! recorder registers exactly one hook on each while it is active.

mod host;
mod recorder;
mod trim;

#[cfg(test)]
mod tests;

pub use host::{HookId, SessionHost, ShutdownHook, SubmitEvent, SubmitHook};
pub use recorder::Recorder;
pub use trim::TrimPolicy;
