use super::ansi::strip_ansi;
use super::SessionStatus;

/// Footer text an agent shows while it can be interrupted
pub const BUSY_INDICATORS: [&str; 2] = ["ctrl+c to interrupt", "esc to interrupt"];

/// Braille spinner frames
pub(crate) const SPINNER_GLYPHS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Asterisk spinner labels
const SPINNER_LABELS: [&str; 4] = ["* Clauding", "* Hullaballooing", "* Thinking", "* Pondering"];

/// Confirmation and permission prompts
const WAITING_INDICATORS: [&str; 4] = [
    "Yes, allow once",
    "No, and tell Claude",
    "Continue? (Y/n)",
    "(Y/n)",
];

/// Bare input prompts
const PROMPT_GLYPHS: [&str; 2] = [">", "❯"];

/// Engine for inferring agent status from pane content
pub struct StateInferenceEngine;

impl StateInferenceEngine {
    /// Analyze pane content and determine agent status.
    ///
    /// Escape sequences are stripped first. Rules are checked in a fixed
    /// order and the first hit wins, so a busy footer always outranks a
    /// permission prompt still visible further up the screen.
    pub fn analyze(content: &str) -> SessionStatus {
        if content.is_empty() {
            return SessionStatus::Idle;
        }
        let clean = strip_ansi(content);

        if BUSY_INDICATORS.iter().any(|ind| clean.contains(ind)) {
            return SessionStatus::Running;
        }

        if clean.contains(SPINNER_GLYPHS) {
            return SessionStatus::Running;
        }

        if SPINNER_LABELS.iter().any(|label| clean.contains(label)) {
            return SessionStatus::Running;
        }

        if WAITING_INDICATORS.iter().any(|ind| clean.contains(ind)) {
            return SessionStatus::Waiting;
        }

        if last_line_is_prompt(&clean) {
            return SessionStatus::Waiting;
        }

        SessionStatus::Idle
    }
}

/// Whether the last non-blank line is nothing but a prompt glyph
pub fn last_line_is_prompt(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .is_some_and(|line| PROMPT_GLYPHS.contains(&line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_running() {
        let cases = [
            "Processing files...\n  ctrl+c to interrupt",
            "Reading code...\n  esc to interrupt",
            "⠋ Working on task...",
            "* Clauding... (12s, ↓ 200 tokens)",
            "* Pondering",
        ];
        for content in cases {
            assert_eq!(
                StateInferenceEngine::analyze(content),
                SessionStatus::Running,
                "{content:?}"
            );
        }
    }

    #[test]
    fn test_detect_waiting() {
        let cases = [
            "Task completed.\n>",
            "Done.\n❯",
            "Allow this action?\n  Yes, allow once",
            "Continue? (Y/n)",
            "Done.\n  ❯  \n\n   \n",
        ];
        for content in cases {
            assert_eq!(
                StateInferenceEngine::analyze(content),
                SessionStatus::Waiting,
                "{content:?}"
            );
        }
    }

    #[test]
    fn test_detect_idle() {
        for content in ["user@host:~$", "", "some random output\nmore lines", "> quoted reply\nok"] {
            assert_eq!(
                StateInferenceEngine::analyze(content),
                SessionStatus::Idle,
                "{content:?}"
            );
        }
    }

    #[test]
    fn test_busy_outranks_waiting() {
        let content = "Yes, allow once\n>\n  esc to interrupt";
        assert_eq!(StateInferenceEngine::analyze(content), SessionStatus::Running);
    }

    #[test]
    fn test_escape_sequences_ignored() {
        let content = "\x1b[2mctrl+c\x1b[0m to interrupt";
        assert_eq!(StateInferenceEngine::analyze(content), SessionStatus::Running);

        let content = "done\n\x1b[1m❯\x1b[0m ";
        assert_eq!(StateInferenceEngine::analyze(content), SessionStatus::Waiting);
    }

    #[test]
    fn test_prompt_must_be_last_line() {
        assert!(last_line_is_prompt("output\n>\n"));
        assert!(!last_line_is_prompt(">\nmore output"));
        assert!(!last_line_is_prompt(""));
    }
}
