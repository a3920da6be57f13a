//! Flat-file persistence for command history.
//!
//! Goal: keep history across restarts without a shared server process. Each
//! session loads the file when it starts and merges its own entries with
//! whatever is on disk when it saves, so commands typed in other sessions
//! survive as long as two saves do not race.
//!
//! File format: one entry per line, most-recent-first. Backslashes, newlines
//! and carriage returns inside an entry are escaped so multi-line commands
//! keep line alignment on reload.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::{debug, info, warn};

use super::store::DEFAULT_MAX_SIZE;
use crate::error::HistoryError;

/// Base directory for everything the recorder writes: `~/.rusty-history`.
pub fn data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".rusty-history")
}

pub fn default_history_path() -> PathBuf {
    data_dir().join("history")
}

/// The persisted history file and the cap applied when writing it.
#[derive(Clone, Debug)]
pub struct HistoryFile {
    path: PathBuf,
    max_size: usize,
}

impl Default for HistoryFile {
    fn default() -> Self {
        Self::new(default_history_path(), DEFAULT_MAX_SIZE)
    }
}

impl HistoryFile {
    pub fn new(path: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            path: path.into(),
            max_size: max_size.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Read the entries on disk, in file order.
    ///
    /// A missing or unreadable file means "no history yet" and yields an
    /// empty list.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file at {}", self.path.display());
                return Vec::new();
            }
            Err(e) => {
                warn!("Ignoring unreadable history file {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        raw.split('\n')
            .filter(|line| !line.is_empty())
            .map(unescape)
            .collect()
    }

    /// Merge `current` with the entries on disk and rewrite the file.
    ///
    /// `current` takes priority and comes first; disk-only entries follow in
    /// their file order. Returns the number of entries written.
    pub fn save(&self, current: &[String]) -> anyhow::Result<usize> {
        let on_disk = self.load();
        let merged = merge(current, &on_disk, self.max_size);

        let mut data = String::new();
        for entry in &merged {
            data.push_str(&escape(entry));
            data.push('\n');
        }

        write_atomic(&self.path, data.as_bytes())?;
        info!("Saved {} history entries to {}", merged.len(), self.path.display());
        Ok(merged.len())
    }

    /// Delete the history file. A missing file counts as cleared.
    pub fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove history file {}", self.path.display())),
        }
    }
}

/// Union of `current` and `on_disk`, first occurrence wins, capped at `max_size`.
pub fn merge(current: &[String], on_disk: &[String], max_size: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(current.len() + on_disk.len());
    current
        .iter()
        .chain(on_disk)
        .filter(|entry| seen.insert(entry.as_str()))
        .take(max_size)
        .cloned()
        .collect()
}

fn ensure_parent_dir(path: &Path) -> Result<(), HistoryError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| HistoryError::Save {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// `history` -> `history.tmp`, `hist.txt` -> `hist.txt.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), HistoryError> {
    ensure_parent_dir(path)?;
    let tmp = temp_path(path);
    fs::write(&tmp, data).map_err(|source| HistoryError::Save {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&tmp, path) {
        if let Err(e) = fs::remove_file(&tmp) {
            warn!("Failed to remove temp file {}: {}", tmp.display(), e);
        }
        return Err(HistoryError::Save {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn escape(entry: &str) -> String {
    let mut out = String::with_capacity(entry.len());
    for ch in entry.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            // Unknown sequences are kept verbatim
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
