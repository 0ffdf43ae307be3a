use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use super::ansi::strip_ansi;
use super::hook::read_hook_status;
use super::parser::{parse_list_sessions, LIST_SESSIONS_FORMAT};
use super::resolver::{resolve_status, StatusInput};
use super::title::{parse_pane_titles, PANE_TITLES_FORMAT};
use super::{Executor, Session, TmuxError};
use crate::ai;

/// Executes commands against the real tmux binary
pub struct TmuxExecutor {
    /// Path to tmux binary
    tmux_path: String,
}

impl TmuxExecutor {
    pub fn new() -> Self {
        Self {
            tmux_path: "tmux".to_string(),
        }
    }

    /// Get the command that hands the terminal over to `name`.
    ///
    /// Inside tmux the current client is switched, outside a new client attaches.
    pub fn attach_command(&self, name: &str, inside_tmux: bool) -> Vec<String> {
        let subcommand = if inside_tmux {
            "switch-client"
        } else {
            "attach-session"
        };
        vec![
            self.tmux_path.clone(),
            subcommand.to_string(),
            "-t".to_string(),
            name.to_string(),
        ]
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for TmuxExecutor {
    fn execute(&self, args: &[&str]) -> Result<String, TmuxError> {
        let output = Command::new(&self.tmux_path)
            .args(args)
            .output()
            .map_err(TmuxError::Spawn)?;

        if !output.status.success() {
            return Err(TmuxError::Command {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Client for interacting with tmux through an [`Executor`]
pub struct TmuxClient<E: Executor = TmuxExecutor> {
    exec: E,
}

impl<E: Executor> TmuxClient<E> {
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    pub fn executor(&self) -> &E {
        &self.exec
    }

    /// List all tmux sessions; a missing server means no sessions
    pub fn list_sessions(&self) -> Result<Vec<Session>, TmuxError> {
        match self.exec.execute(&["list-sessions", "-F", LIST_SESSIONS_FORMAT]) {
            Ok(output) => parse_list_sessions(&output),
            Err(e) if e.is_no_server() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Active pane title of every session, keyed by session name
    pub fn pane_titles(&self) -> Result<HashMap<String, String>, TmuxError> {
        let output = self.exec.execute(&["list-sessions", "-F", PANE_TITLES_FORMAT])?;
        Ok(parse_pane_titles(&output))
    }

    /// Capture the last `lines` lines of the session's active pane
    pub fn capture_pane(&self, name: &str, lines: usize) -> Result<String, TmuxError> {
        let start = format!("-{}", lines);
        self.exec.execute(&["capture-pane", "-t", name, "-p", "-S", &start])
    }

    /// Create a new detached session rooted at `path`
    pub fn new_session(&self, name: &str, path: &str) -> Result<(), TmuxError> {
        self.exec.execute(&["new-session", "-d", "-s", name, "-c", path])?;
        Ok(())
    }

    /// Rename a session
    pub fn rename_session(&self, old_name: &str, new_name: &str) -> Result<(), TmuxError> {
        self.exec.execute(&["rename-session", "-t", old_name, new_name])?;
        Ok(())
    }

    /// Kill a session
    pub fn kill_session(&self, name: &str) -> Result<(), TmuxError> {
        self.exec.execute(&["kill-session", "-t", name])?;
        Ok(())
    }

    /// Run one poll tick: list sessions and resolve each one's status.
    ///
    /// Only a failed listing is an error. Missing titles, hook files and
    /// pane captures degrade to absent signals.
    pub fn refresh(
        &self,
        status_dir: &Path,
        preview_lines: usize,
        now: i64,
    ) -> Result<Vec<Session>, TmuxError> {
        let mut sessions = self.list_sessions()?;
        if sessions.is_empty() {
            return Ok(sessions);
        }

        let titles = self.pane_titles().unwrap_or_else(|e| {
            warn!(error = %e, "failed to list pane titles");
            HashMap::new()
        });

        for session in &mut sessions {
            let hook = match read_hook_status(status_dir, &session.name) {
                Ok(hook) => {
                    debug!(
                        session = %session.name,
                        status = %hook.raw_status,
                        event = %hook.event,
                        fresh = hook.is_valid(now),
                        "read hook status"
                    );
                    Some(hook)
                }
                Err(e) => {
                    debug!(session = %session.name, error = %e, "no hook status");
                    None
                }
            };

            let content = self
                .capture_pane(&session.name, preview_lines)
                .unwrap_or_else(|e| {
                    warn!(session = %session.name, error = %e, "failed to capture pane");
                    String::new()
                });

            session.status = resolve_status(&StatusInput {
                hook: hook.as_ref(),
                pane_title: titles.get(&session.name).map(String::as_str).unwrap_or(""),
                pane_content: &content,
                now,
            });

            let clean = strip_ansi(&content);
            session.ai_model = ai::detect_model(&clean);
            if !ai::detect_tool(&clean).is_empty() {
                session.ai_summary = ai::detect_summary(&clean);
            }
        }

        debug!(count = sessions.len(), "refreshed sessions");
        Ok(sessions)
    }
}
