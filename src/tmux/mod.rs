mod ansi;
mod client;
mod error;
mod heuristics;
mod hook;
mod parser;
mod resolver;
mod title;

pub use client::{TmuxClient, TmuxExecutor};
pub use error::TmuxError;
pub use heuristics::{last_line_is_prompt, BUSY_INDICATORS};

use serde::{Deserialize, Serialize};

/// Live activity state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SessionStatus {
    /// Nothing is happening, or the state could not be determined
    #[default]
    Idle,
    /// An agent is actively computing
    Running,
    /// An agent is waiting on human input
    Waiting,
    /// An agent reported an error
    Error,
}

impl SessionStatus {
    /// Glyph shown next to the session name
    pub fn icon(self) -> &'static str {
        match self {
            SessionStatus::Running => "●",
            SessionStatus::Waiting => "◐",
            SessionStatus::Idle => "○",
            SessionStatus::Error => "✗",
        }
    }
}

/// Represents a tmux session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session name (unique key)
    pub name: String,
    /// Session ID (e.g., "$0")
    pub id: String,
    /// Working directory
    pub path: String,
    /// Whether any client is attached
    pub attached: bool,
    /// Unix timestamp of the last activity
    pub activity: i64,
    /// Resolved agent status
    pub status: SessionStatus,
    /// Detected AI model, empty for non-AI sessions
    pub ai_model: String,
    /// Short summary of what the agent last printed
    pub ai_summary: String,
    /// Group assigned by the session store, carried through untouched
    pub group_name: String,
    /// Position within the group, carried through untouched
    pub sort_order: i32,
}

impl Session {
    /// Activity age relative to `now`, e.g. "30s", "5m", "3h", "2d"
    pub fn relative_time(&self, now: i64) -> String {
        let secs = (now - self.activity).max(0);
        match secs {
            s if s < 60 => format!("{}s", s),
            s if s < 60 * 60 => format!("{}m", s / 60),
            s if s < 24 * 60 * 60 => format!("{}h", s / (60 * 60)),
            s => format!("{}d", s / (24 * 60 * 60)),
        }
    }
}

/// Runs tmux subcommands and returns their standard output
pub trait Executor: Send + Sync {
    fn execute(&self, args: &[&str]) -> Result<String, TmuxError>;
}

/// Current wall-clock time as unix seconds
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
