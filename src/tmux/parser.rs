use super::{Session, TmuxError};

/// Format string passed to `tmux list-sessions -F`
pub const LIST_SESSIONS_FORMAT: &str = "#{session_name}:#{session_id}:#{session_windows}:#{session_path}:#{session_attached}:#{session_activity}";

/// Parse `list-sessions` output into sessions.
///
/// Each line is `name:id:windows:path:attached:activity`; only the first
/// five colons split, the remainder is the activity field. Blank lines are
/// skipped and blank output yields no sessions.
pub fn parse_list_sessions(output: &str) -> Result<Vec<Session>, TmuxError> {
    let mut sessions = Vec::new();

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.splitn(6, ':').collect();
        let [name, id, _windows, path, attached, activity] = parts[..] else {
            return Err(TmuxError::Format(line.to_string()));
        };

        let activity = activity.parse::<i64>().map_err(|source| TmuxError::Timestamp {
            value: activity.to_string(),
            source,
        })?;

        sessions.push(Session {
            name: name.to_string(),
            id: id.to_string(),
            path: path.to_string(),
            attached: attached == "1",
            activity,
            ..Default::default()
        });
    }

    Ok(sessions)
}
