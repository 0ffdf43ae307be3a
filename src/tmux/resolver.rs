use super::heuristics::StateInferenceEngine;
use super::hook::HookStatus;
use super::title::{detect_title_status, TitleStatus};
use super::SessionStatus;

/// Everything one status decision looks at
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusInput<'a> {
    /// Hook signal, if one could be read
    pub hook: Option<&'a HookStatus>,
    pub pane_title: &'a str,
    /// Raw captured pane text, escape sequences included
    pub pane_content: &'a str,
    /// Unix seconds used for the hook TTL check
    pub now: i64,
}

/// Combine hook, title and content signals into one status.
///
/// A live hook wins outright, whatever it says. Otherwise a spinning title
/// means Running. Everything else falls through to the pane content.
pub fn resolve_status(input: &StatusInput<'_>) -> SessionStatus {
    if let Some(hook) = input.hook.filter(|h| h.is_valid(input.now)) {
        return hook.status;
    }

    match detect_title_status(input.pane_title) {
        TitleStatus::Running => SessionStatus::Running,
        TitleStatus::Done | TitleStatus::Unknown => StateInferenceEngine::analyze(input.pane_content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_709_312_400;

    fn hook(status: SessionStatus, timestamp: i64) -> HookStatus {
        HookStatus {
            status,
            timestamp,
            ..Default::default()
        }
    }

    #[test]
    fn test_hook_takes_priority() {
        let hs = hook(SessionStatus::Running, NOW);
        let input = StatusInput {
            hook: Some(&hs),
            pane_title: "",
            pane_content: ">",
            now: NOW,
        };
        assert_eq!(resolve_status(&input), SessionStatus::Running);
    }

    #[test]
    fn test_valid_hook_is_terminal_for_every_status() {
        for status in [
            SessionStatus::Idle,
            SessionStatus::Running,
            SessionStatus::Waiting,
            SessionStatus::Error,
        ] {
            let hs = hook(status, NOW - 10);
            let input = StatusInput {
                hook: Some(&hs),
                pane_title: "⠋ Working",
                pane_content: "ctrl+c to interrupt",
                now: NOW,
            };
            assert_eq!(resolve_status(&input), status);
        }
    }

    #[test]
    fn test_title_fallback() {
        let input = StatusInput {
            pane_title: "⠋ Working",
            pane_content: "Done.\n>",
            now: NOW,
            ..Default::default()
        };
        assert_eq!(resolve_status(&input), SessionStatus::Running);
    }

    #[test]
    fn test_title_done_falls_to_content() {
        for content in ["Task completed.\n>", "user@host:~$", "", "esc to interrupt"] {
            let input = StatusInput {
                pane_title: "✓ Done",
                pane_content: content,
                now: NOW,
                ..Default::default()
            };
            assert_eq!(resolve_status(&input), StateInferenceEngine::analyze(content));
        }
    }

    #[test]
    fn test_content_fallback() {
        let input = StatusInput {
            pane_title: "bash",
            pane_content: "Processing\n  ctrl+c to interrupt",
            now: NOW,
            ..Default::default()
        };
        assert_eq!(resolve_status(&input), SessionStatus::Running);

        let input = StatusInput {
            pane_content: "user@host:~$",
            now: NOW,
            ..Default::default()
        };
        assert_eq!(resolve_status(&input), SessionStatus::Idle);
    }

    #[test]
    fn test_expired_hook_ignored() {
        let expired = hook(SessionStatus::Running, NOW - 180);
        let input = StatusInput {
            hook: Some(&expired),
            pane_title: "",
            pane_content: ">",
            now: NOW,
        };
        assert_eq!(resolve_status(&input), SessionStatus::Waiting);
    }

    #[test]
    fn test_expired_hook_falls_to_spinning_title() {
        let expired = hook(SessionStatus::Idle, NOW - 180);
        let input = StatusInput {
            hook: Some(&expired),
            pane_title: "⠹ Editing files",
            pane_content: "Allow this action?\n  Yes, allow once\n>",
            now: NOW,
        };
        assert_eq!(resolve_status(&input), SessionStatus::Running);
    }

    #[test]
    fn test_repeatable() {
        let hs = hook(SessionStatus::Error, NOW);
        let input = StatusInput {
            hook: Some(&hs),
            pane_title: "✓",
            pane_content: "❯",
            now: NOW,
        };
        let first = resolve_status(&input);
        assert_eq!(resolve_status(&input), first);
    }
}
