use once_cell::sync::Lazy;
use regex::Regex;

use crate::tmux::{last_line_is_prompt, BUSY_INDICATORS};

/// Tool identifier reported for Claude Code sessions
pub const CLAUDE_CODE: &str = "claude-code";

const SUMMARY_MAX_CHARS: usize = 80;

static RE_CLAUDE_MODEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"claude-(?:sonnet|opus|haiku)-[\w.-]+").unwrap());

/// First Claude model name mentioned in the content, or an empty string
pub fn detect_model(content: &str) -> String {
    RE_CLAUDE_MODEL
        .find(content)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Identify the agent running in a pane, or an empty string for plain shells
pub fn detect_tool(content: &str) -> &'static str {
    if BUSY_INDICATORS.iter().any(|ind| content.contains(ind)) || last_line_is_prompt(content) {
        CLAUDE_CODE
    } else {
        ""
    }
}

/// Last meaningful line the agent printed, shortened for the preview
pub fn detect_summary(content: &str) -> String {
    let Some(line) = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !last_line_is_prompt(line))
        .rfind(|line| !BUSY_INDICATORS.iter().any(|ind| line.contains(ind)))
    else {
        return String::new();
    };

    if line.chars().count() <= SUMMARY_MAX_CHARS {
        return line.to_string();
    }
    let mut short: String = line.chars().take(SUMMARY_MAX_CHARS - 1).collect();
    short.push('…');
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_model() {
        let cases = [
            ("Using claude-sonnet-4-6\n> ", "claude-sonnet-4-6"),
            ("Model: claude-opus-4-6\nProcessing...", "claude-opus-4-6"),
            ("claude-haiku-4-5-20251001 ready", "claude-haiku-4-5-20251001"),
            ("regular shell output", ""),
            ("╭ claude-sonnet-4-6 · $0.02", "claude-sonnet-4-6"),
            ("claude-opus-4.1 then claude-haiku-3", "claude-opus-4.1"),
            ("claude-instant-1", ""),
        ];
        for (content, expected) in cases {
            assert_eq!(detect_model(content), expected, "{content:?}");
        }
    }

    #[test]
    fn test_detect_tool() {
        let cases = [
            ("some output\n>", CLAUDE_CODE),
            ("some output\n❯ \n", CLAUDE_CODE),
            ("ctrl+c to interrupt", CLAUDE_CODE),
            ("Reading...\nesc to interrupt\nmore", CLAUDE_CODE),
            ("user@host:~$", ""),
            ("gemini>", ""),
            ("", ""),
        ];
        for (content, expected) in cases {
            assert_eq!(detect_tool(content), expected, "{content:?}");
        }
    }

    #[test]
    fn test_detect_summary() {
        assert_eq!(detect_summary("Refactored the parser.\n\n>"), "Refactored the parser.");
        assert_eq!(
            detect_summary("Writing tests\n  esc to interrupt\n"),
            "Writing tests"
        );
        assert_eq!(detect_summary("❯"), "");
        assert_eq!(detect_summary(""), "");
    }

    #[test]
    fn test_detect_summary_truncates() {
        let long = "é".repeat(100);
        let summary = detect_summary(&long);
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(summary.ends_with('…'));
    }
}
