//! Extension points exposed by the host shell session.
//!
//! The host calls [`SessionHost::submit`] once per line the user sends to the
//! shell and [`SessionHost::shutdown`] once when the process exits. Anything
//! that wants to observe those events registers a hook and keeps the returned
//! [`HookId`] to unregister it later.

use anyhow::Result;
use tracing::{debug, error};

/// A line the user submitted to the shell.
#[derive(Clone, Copy, Debug)]
pub struct SubmitEvent<'a> {
    /// Id of the shell process the line is sent to, if one is attached.
    pub process: Option<u32>,
    /// Raw text as typed, before any trimming.
    pub input: &'a str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookId(u64);

pub type SubmitHook = Box<dyn FnMut(&SubmitEvent<'_>) -> Result<()> + Send>;
pub type ShutdownHook = Box<dyn FnMut() -> Result<()> + Send>;

#[derive(Default)]
pub struct SessionHost {
    next_id: u64,
    submit_hooks: Vec<(HookId, SubmitHook)>,
    shutdown_hooks: Vec<(HookId, ShutdownHook)>,
}

impl SessionHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook run before each submitted line reaches the shell.
    pub fn on_before_submit(&mut self, hook: SubmitHook) -> HookId {
        let id = self.allocate_id();
        self.submit_hooks.push((id, hook));
        id
    }

    /// Register a hook run once when the session shuts down.
    pub fn on_shutdown(&mut self, hook: ShutdownHook) -> HookId {
        let id = self.allocate_id();
        self.shutdown_hooks.push((id, hook));
        id
    }

    /// Unregister a hook of either kind. Returns false if `id` was not registered.
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.hook_count();
        self.submit_hooks.retain(|(hook_id, _)| *hook_id != id);
        self.shutdown_hooks.retain(|(hook_id, _)| *hook_id != id);
        self.hook_count() != before
    }

    pub fn hook_count(&self) -> usize {
        self.submit_hooks.len() + self.shutdown_hooks.len()
    }

    /// Run the before-submit hooks in registration order.
    ///
    /// Stops at the first hook that fails and returns its error.
    pub fn submit(&mut self, process: Option<u32>, input: &str) -> Result<()> {
        let event = SubmitEvent { process, input };
        for (_, hook) in self.submit_hooks.iter_mut() {
            hook(&event)?;
        }
        Ok(())
    }

    /// Run every shutdown hook, even after one fails.
    ///
    /// Returns the first failure, if any.
    pub fn shutdown(&mut self) -> Result<()> {
        debug!("Running {} shutdown hooks", self.shutdown_hooks.len());
        let mut first_err = None;
        for (id, hook) in self.shutdown_hooks.iter_mut() {
            if let Err(e) = hook() {
                error!("Shutdown hook {:?} failed: {:#}", id, e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn allocate_id(&mut self) -> HookId {
        self.next_id += 1;
        HookId(self.next_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_hook(seen: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> SubmitHook {
        let seen = seen.clone();
        Box::new(move |event| {
            seen.lock().unwrap().push(format!("{}:{}", tag, event.input));
            Ok(())
        })
    }

    #[test]
    fn test_submit_runs_hooks_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut host = SessionHost::new();
        host.on_before_submit(recording_hook(&seen, "a"));
        host.on_before_submit(recording_hook(&seen, "b"));

        host.submit(Some(1), "ls").unwrap();

        assert_eq!(*seen.lock().unwrap(), vec!["a:ls", "b:ls"]);
    }

    #[test]
    fn test_remove_hook() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut host = SessionHost::new();
        let id = host.on_before_submit(recording_hook(&seen, "a"));
        assert_eq!(host.hook_count(), 1);

        assert!(host.remove_hook(id));
        assert!(!host.remove_hook(id));
        assert_eq!(host.hook_count(), 0);

        host.submit(Some(1), "ls").unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_submit_stops_at_first_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut host = SessionHost::new();
        host.on_before_submit(Box::new(|_| anyhow::bail!("refused")));
        host.on_before_submit(recording_hook(&seen, "late"));

        let err = host.submit(None, "ls").unwrap_err();
        assert_eq!(err.to_string(), "refused");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_shutdown_runs_all_hooks() {
        let calls = Arc::new(Mutex::new(0));
        let mut host = SessionHost::new();

        host.on_shutdown(Box::new(|| anyhow::bail!("disk full")));
        let counter = calls.clone();
        host.on_shutdown(Box::new(move || {
            *counter.lock().unwrap() += 1;
            Ok(())
        }));

        let err = host.shutdown().unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_hook_ids_are_unique() {
        let mut host = SessionHost::new();
        let a = host.on_shutdown(Box::new(|| Ok(())));
        let b = host.on_before_submit(Box::new(|_| Ok(())));
        assert_ne!(a, b);
    }
}
