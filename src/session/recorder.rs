//! Records submitted shell commands into history.
//!
//! A [`Recorder`] owns one history store for one session. While active it
//! listens to the host's submit and shutdown events: every submitted line is
//! trimmed, filtered and inserted, and the store is merged into the history
//! file when the session ends.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tracing::{debug, info};

use super::host::{HookId, SessionHost};
use super::trim::TrimPolicy;
use crate::config::HistoryConfig;
use crate::error::HistoryError;
use crate::filter::FilterSet;
use crate::history::{HistoryFile, HistoryStore};

fn lock(store: &Mutex<HistoryStore>) -> MutexGuard<'_, HistoryStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The part of a recorder the submit hook needs: trim, filter, insert.
#[derive(Clone)]
struct Admission {
    store: Arc<Mutex<HistoryStore>>,
    filters: Arc<FilterSet>,
    trim: TrimPolicy,
}

impl Admission {
    fn record(&self, raw: &str) -> bool {
        let value = self.trim.apply(raw);
        if value.is_empty() {
            return false;
        }
        if self.filters.should_reject(value) {
            debug!("Filtered out submitted command ({} bytes)", raw.len());
            return false;
        }
        lock(&self.store).insert(value.to_string());
        true
    }
}

struct Registration {
    submit: HookId,
    shutdown: HookId,
}

pub struct Recorder {
    admission: Admission,
    file: HistoryFile,
    loaded: bool,
    /// Set by `deactivate`; the history is frozen until the next `activate`.
    suspended: bool,
    registration: Option<Registration>,
}

impl Recorder {
    /// Build a recorder from configuration. Fails on an invalid size or pattern.
    pub fn new(config: &HistoryConfig) -> Result<Self> {
        config.validate()?;
        let filters = config.filter_set()?;
        Ok(Self::with_parts(
            HistoryStore::new(config.max_size),
            config.history_file(),
            filters,
            config.trim_policy(),
        ))
    }

    pub fn with_parts(
        store: HistoryStore,
        file: HistoryFile,
        filters: FilterSet,
        trim: TrimPolicy,
    ) -> Self {
        Self {
            admission: Admission {
                store: Arc::new(Mutex::new(store)),
                filters: Arc::new(filters),
                trim,
            },
            file,
            loaded: false,
            suspended: false,
            registration: None,
        }
    }

    /// Shared handle to the history store, e.g. for a selection UI.
    pub fn store(&self) -> Arc<Mutex<HistoryStore>> {
        self.admission.store.clone()
    }

    pub fn file(&self) -> &HistoryFile {
        &self.file
    }

    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }

    /// Start recording for `host`.
    ///
    /// The history file is read the first time a recorder is activated only;
    /// later activations reuse what is in memory. Activating an already
    /// active recorder does nothing.
    pub fn activate(&mut self, host: &mut SessionHost) -> Result<()> {
        if !self.loaded {
            let on_disk = self.file.load();
            let added = lock(&self.admission.store).absorb_older(on_disk);
            info!("Loaded {} history entries from {}", added, self.file.path().display());
            self.loaded = true;
        }

        self.suspended = false;
        if self.registration.is_some() {
            return Ok(());
        }

        let admission = self.admission.clone();
        let submit = host.on_before_submit(Box::new(move |event| {
            if event.process.is_none() {
                return Err(HistoryError::NoProcess.into());
            }
            admission.record(event.input);
            Ok(())
        }));

        let store = self.admission.store.clone();
        let file = self.file.clone();
        let shutdown = host.on_shutdown(Box::new(move || {
            let snapshot = lock(&store).snapshot();
            file.save(&snapshot).map(|_| ())
        }));

        self.registration = Some(Registration { submit, shutdown });
        debug!("History recorder activated");
        Ok(())
    }

    /// Stop recording for `host`. The in-memory history is kept but no longer
    /// updated or saved, neither by the host nor through `on_submit`/`save`,
    /// until the recorder is activated again.
    pub fn deactivate(&mut self, host: &mut SessionHost) {
        if let Some(registration) = self.registration.take() {
            host.remove_hook(registration.submit);
            host.remove_hook(registration.shutdown);
            self.suspended = true;
            debug!("History recorder deactivated");
        }
    }

    /// Trim, filter and record one submitted line. Returns whether it was recorded.
    ///
    /// Works before the first activation; after `deactivate` nothing is recorded.
    pub fn on_submit(&self, raw: &str) -> bool {
        if self.suspended {
            return false;
        }
        self.admission.record(raw)
    }

    /// Current history, most-recent-first. Callers presenting it should keep
    /// that order if recency matters.
    pub fn search(&self) -> Vec<String> {
        lock(&self.admission.store).snapshot()
    }

    /// Merge the current history into the history file now.
    ///
    /// Writes nothing and returns 0 after `deactivate`.
    pub fn save(&self) -> Result<usize> {
        if self.suspended {
            debug!("Recorder is deactivated, not saving history");
            return Ok(0);
        }
        let snapshot = self.search();
        self.file.save(&snapshot)
    }
}
