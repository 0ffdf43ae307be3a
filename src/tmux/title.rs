use std::collections::HashMap;

use super::heuristics::SPINNER_GLYPHS;

/// Format string for listing the active pane title of every session
pub const PANE_TITLES_FORMAT: &str = "#{session_name}:#{pane_title}";

const DONE_GLYPHS: [char; 2] = ['✓', '✔'];

/// Coarse status hint read from a pane title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleStatus {
    #[default]
    Unknown,
    Running,
    Done,
}

/// Classify a pane title by the glyphs agents put in it
pub fn detect_title_status(title: &str) -> TitleStatus {
    if title.contains(SPINNER_GLYPHS) {
        TitleStatus::Running
    } else if title.contains(DONE_GLYPHS) {
        TitleStatus::Done
    } else {
        TitleStatus::Unknown
    }
}

/// Parse `session:title` lines into a map from session name to title.
///
/// Only the first colon separates the fields; titles keep any colons they
/// contain. Lines without a colon are skipped.
pub fn parse_pane_titles(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| line.trim_end_matches('\r').split_once(':'))
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, title)| (name.to_string(), title.to_string()))
        .collect()
}
