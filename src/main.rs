use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::fs::OpenOptions;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

mod actions;
mod ai;
mod app;
mod config;
mod tmux;

use actions::{discard_queued_keys, Action};
use app::App;
use config::Config;
use tmux::{unix_now, TmuxClient, TmuxExecutor};

/// Send tracing output to `<data_dir>/tsm.log`; the terminal belongs to the TUI
fn init_logging(data_dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_ansi(false);

    let log_file = std::fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("tsm.log"))
    });
    match log_file {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(std::io::sink).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config.data_path());
    info!(status_dir = %config.status_path().display(), "starting tsm");

    // Create event channel
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

    // Initialize terminal
    let mut terminal = ratatui::init();

    // Set while an attached client owns the terminal
    let input_paused = Arc::new(AtomicBool::new(false));

    // Spawn input handler
    let input_tx = tx.clone();
    let paused = Arc::clone(&input_paused);
    tokio::spawn(async move {
        loop {
            if paused.load(Ordering::Acquire) {
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        let _ = input_tx.send(Action::KeyPress(key));
                    }
                }
            }
        }
    });

    let client = Arc::new(TmuxClient::new(TmuxExecutor::new()));

    // Spawn tmux poller
    let poll_tx = tx.clone();
    let poll_client = Arc::clone(&client);
    let status_dir = config.status_path();
    let preview_lines = config.preview_lines;
    let interval = config.poll_interval();
    tokio::spawn(async move {
        loop {
            let client = Arc::clone(&poll_client);
            let dir = status_dir.clone();
            let result = tokio::task::spawn_blocking(move || {
                client.refresh(&dir, preview_lines, unix_now())
            })
            .await;

            let action = match result {
                Ok(Ok(sessions)) => Action::SessionsUpdated(sessions),
                Ok(Err(e)) => {
                    warn!(error = %e, "refresh failed");
                    Action::Error(format!("Tmux: {}", e))
                }
                Err(e) => Action::Error(format!("Refresh task failed: {}", e)),
            };
            if poll_tx.send(action).is_err() {
                break;
            }
            tokio::time::sleep(interval).await;
        }
    });

    // Create app state
    let mut app = App::new();
    let inside_tmux = std::env::var_os("TMUX").is_some();

    // Main event loop
    let result = loop {
        // Render
        terminal.draw(|f| app.render(f))?;

        // Process any pending actions from the app
        for pending_action in app.take_pending_actions() {
            match pending_action {
                Action::AttachSession(ref name) => {
                    let cmd = client.executor().attach_command(name, inside_tmux);
                    info!(session = %name, inside_tmux, "attaching");

                    // Suspend TUI while the attached client owns the terminal
                    input_paused.store(true, Ordering::Release);
                    ratatui::restore();
                    let status = std::process::Command::new(&cmd[0])
                        .args(&cmd[1..])
                        .stdin(Stdio::inherit())
                        .stdout(Stdio::inherit())
                        .stderr(Stdio::inherit())
                        .status();
                    terminal = ratatui::init();

                    // Keystrokes meant for the attached session must not reach the menu
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    for action in discard_queued_keys(&mut rx) {
                        app.handle_action(action)?;
                    }
                    input_paused.store(false, Ordering::Release);

                    if let Err(e) = status {
                        app.message = Some(format!("Failed to attach: {}", e));
                    }
                }
                Action::CreateSession(ref name) => {
                    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
                    if let Err(e) = client.new_session(name, &cwd.to_string_lossy()) {
                        app.message = Some(format!("Failed to create: {}", e));
                    }
                }
                Action::RenameSession { ref from, ref to } => {
                    if let Err(e) = client.rename_session(from, to) {
                        app.message = Some(format!("Failed to rename: {}", e));
                    }
                }
                Action::DeleteSession(ref name) => {
                    if let Err(e) = client.kill_session(name) {
                        app.message = Some(format!("Failed to delete: {}", e));
                    }
                }
                _ => {}
            }
        }

        // Handle events from channel
        match rx.recv().await {
            Some(action) => match app.handle_action(action) {
                Ok(true) => break Ok(()),
                Ok(false) => {}
                Err(e) => break Err(e),
            },
            None => break Ok(()),
        }
    };

    // Restore terminal
    ratatui::restore();
    info!("exiting tsm");
    result
}
