use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::tmux::Session;

/// Actions that can be dispatched through the application
#[derive(Debug, Clone)]
pub enum Action {
    /// A key was pressed
    KeyPress(KeyEvent),
    /// Sessions were refreshed from tmux
    SessionsUpdated(Vec<Session>),
    /// An error occurred
    Error(String),
    /// Attach to a session
    AttachSession(String),
    /// Create a new session
    CreateSession(String),
    /// Rename a session
    RenameSession { from: String, to: String },
    /// Kill a session
    DeleteSession(String),
}

/// Empty the queue after the terminal was handed to another client.
///
/// Key presses typed into the attached session are dropped. Everything else
/// is returned in arrival order.
pub fn discard_queued_keys(rx: &mut UnboundedReceiver<Action>) -> Vec<Action> {
    let mut kept = Vec::new();
    while let Ok(action) = rx.try_recv() {
        if !matches!(action, Action::KeyPress(_)) {
            kept.push(action);
        }
    }
    kept
}
