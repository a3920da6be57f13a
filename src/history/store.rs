//! Bounded, deduplicated command history kept in memory.
//!
//! Entries are ordered most-recent-first. Re-inserting a command moves it to
//! the front instead of adding a second copy.

/// Default maximum number of commands to keep in history.
pub const DEFAULT_MAX_SIZE: usize = 500;

#[derive(Clone, Debug)]
pub struct HistoryStore {
    entries: Vec<String>,
    max_size: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SIZE)
    }
}

impl HistoryStore {
    /// Create an empty store. A `max_size` of zero is raised to one.
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self {
            entries: Vec::with_capacity(max_size.min(DEFAULT_MAX_SIZE)),
            max_size,
        }
    }

    /// Build a store from entries already ordered most-recent-first.
    pub fn from_entries<I>(max_size: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut store = Self::new(max_size);
        store.absorb_older(entries);
        store
    }

    /// Record a command as the most recent entry.
    ///
    /// The caller is expected to have trimmed and filtered `value` already.
    pub fn insert(&mut self, value: String) {
        if let Some(pos) = self.entries.iter().position(|e| *e == value) {
            self.entries.remove(pos);
        }
        self.entries.insert(0, value);
        self.entries.truncate(self.max_size);
    }

    /// Append entries older than everything currently held.
    ///
    /// Values already present keep their position. Stops once the store is full.
    pub fn absorb_older<I>(&mut self, older: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.entries.len();
        for value in older {
            if self.entries.len() >= self.max_size {
                break;
            }
            if !self.contains(&value) {
                self.entries.push(value);
            }
        }
        self.entries.len() - before
    }

    /// Copy of the current entries, most-recent-first.
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The `n` most recent entries.
    pub fn recent(&self, n: usize) -> &[String] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.iter().any(|e| e == value)
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
