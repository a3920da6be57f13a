//! Recorder configuration.
//!
//! Settings come from an optional JSON file (`~/.rusty-history/config.json`)
//! and can be overridden by environment variables set in the host shell:
//!
//! - `RUSTY_HISTORY_FILE` - path of the persisted history file
//! - `RUSTY_HISTORY_SIZE` - maximum number of entries kept
//! - `RUSTY_HISTORY_TRIM_LEFT` / `RUSTY_HISTORY_TRIM_RIGHT` - `true`/`false`
//!
//! Every field of the file is optional; missing ones take their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;
use crate::filter::{FilterSet, BLANK_PATTERN};
use crate::history::persist::data_dir;
use crate::history::{default_history_path, HistoryFile, DEFAULT_MAX_SIZE};
use crate::session::TrimPolicy;

pub const ENV_HISTORY_FILE: &str = "RUSTY_HISTORY_FILE";
pub const ENV_HISTORY_SIZE: &str = "RUSTY_HISTORY_SIZE";
pub const ENV_TRIM_LEFT: &str = "RUSTY_HISTORY_TRIM_LEFT";
pub const ENV_TRIM_RIGHT: &str = "RUSTY_HISTORY_TRIM_RIGHT";

pub fn default_config_path() -> PathBuf {
    data_dir().join("config.json")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Where history is persisted between sessions.
    pub history_file: PathBuf,
    /// Maximum number of entries kept in memory and on disk.
    pub max_size: usize,
    /// Strip leading whitespace before filtering.
    pub trim_left: bool,
    /// Strip trailing whitespace before filtering.
    pub trim_right: bool,
    /// Regexes; a command matching any of them is not recorded.
    pub reject_patterns: Vec<String>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_path(),
            max_size: DEFAULT_MAX_SIZE,
            trim_left: true,
            trim_right: true,
            reject_patterns: vec![BLANK_PATTERN.to_string()],
        }
    }
}

impl HistoryConfig {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: HistoryConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config JSON at {}", path.display()))?;
        Ok(config)
    }

    /// Config file if present, then environment overrides, then validation.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = default_config_path();
        let mut config = if path.exists() {
            Self::load(&path)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, normally backed by the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_HISTORY_FILE).filter(|p| !p.is_empty()) {
            self.history_file = PathBuf::from(path);
        }
        if let Some(size) = lookup(ENV_HISTORY_SIZE) {
            self.max_size = size
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got `{}`", ENV_HISTORY_SIZE, size))?;
        }
        if let Some(value) = lookup(ENV_TRIM_LEFT) {
            self.trim_left = parse_switch(ENV_TRIM_LEFT, &value)?;
        }
        if let Some(value) = lookup(ENV_TRIM_RIGHT) {
            self.trim_right = parse_switch(ENV_TRIM_RIGHT, &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.max_size == 0 {
            return Err(HistoryError::ZeroCapacity);
        }
        Ok(())
    }

    /// Compile `reject_patterns`. Fails on the first malformed pattern.
    pub fn filter_set(&self) -> Result<FilterSet, HistoryError> {
        FilterSet::from_patterns(&self.reject_patterns)
    }

    pub fn trim_policy(&self) -> TrimPolicy {
        TrimPolicy {
            left: self.trim_left,
            right: self.trim_right,
        }
    }

    pub fn history_file(&self) -> HistoryFile {
        HistoryFile::new(self.history_file.clone(), self.max_size)
    }
}

fn parse_switch(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be true or false, got `{}`", key, other),
    }
}
