use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Global settings, read from `~/.config/tsm/config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for logs and runtime files
    pub data_dir: String,
    /// Number of pane lines captured for status detection
    pub preview_lines: usize,
    /// Seconds between two refreshes
    pub poll_interval_sec: u64,
    /// Directory the agent hooks write status files into, `<data_dir>/status` when unset
    pub status_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "~/.config/tsm".to_string(),
            preview_lines: 150,
            poll_interval_sec: 2,
            status_dir: None,
        }
    }
}

impl Config {
    /// Parse TOML, keeping defaults for any key left out
    pub fn load_from_str(data: &str) -> Result<Self> {
        toml::from_str(data).context("Failed to parse config")
    }

    /// Load the user config, falling back to defaults when there is none
    pub fn load() -> Result<Self> {
        let path = expand_path("~/.config/tsm/config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::load_from_str(&data)
    }

    pub fn data_path(&self) -> PathBuf {
        expand_path(&self.data_dir)
    }

    pub fn status_path(&self) -> PathBuf {
        match &self.status_dir {
            Some(dir) => expand_path(dir),
            None => self.data_path().join("status"),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_sec.max(1))
    }
}

/// Expand a leading `~/` to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
