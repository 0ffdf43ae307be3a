use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to tmux or reading its side channels
#[derive(Debug, Error)]
pub enum TmuxError {
    /// Hook status file missing or unreadable
    #[error("read hook status {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hook status file is not the expected JSON object
    #[error("parse hook status: {0}")]
    Parse(#[from] serde_json::Error),

    /// A listing line did not carry all six fields
    #[error("unexpected format: {0:?}")]
    Format(String),

    /// The activity field of a listing line is not an integer
    #[error("invalid activity timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Session name cannot be used as a file name inside the status directory
    #[error("invalid session name {0:?}")]
    InvalidSessionName(String),

    /// The tmux binary could not be started
    #[error("failed to execute tmux: {0}")]
    Spawn(#[source] std::io::Error),

    /// tmux ran but exited unsuccessfully
    #[error("tmux {command} failed: {stderr}")]
    Command { command: String, stderr: String },
}

impl TmuxError {
    /// Whether tmux reported that there is nothing to list
    pub fn is_no_server(&self) -> bool {
        match self {
            TmuxError::Command { stderr, .. } => {
                stderr.contains("no server running")
                    || stderr.contains("no sessions")
                    || stderr.contains("error connecting to")
            }
            _ => false,
        }
    }
}
