use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use super::{SessionStatus, TmuxError};

/// How long a hook status stays authoritative, in seconds
pub const HOOK_STATUS_TTL_SECS: i64 = 2 * 60;

/// Status signal written by agent hooks into `<status_dir>/<session>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HookStatus {
    /// Decoded from `raw_status`
    #[serde(skip)]
    pub status: SessionStatus,
    #[serde(rename = "status", default, deserialize_with = "null_as_default")]
    pub raw_status: String,
    /// Unix seconds when the hook fired
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: i64,
    /// Hook event name, e.g. "UserPromptSubmit"
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,
}

/// Hook scripts may write `null`; treat it like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl HookStatus {
    /// Decode a hook status file body
    pub fn from_json(data: &str) -> Result<Self, TmuxError> {
        let mut hs: HookStatus = serde_json::from_str(data)?;
        hs.status = decode_status(&hs.raw_status);
        Ok(hs)
    }

    /// Whether the signal is younger than the TTL at `now` (unix seconds)
    pub fn is_valid(&self, now: i64) -> bool {
        now.saturating_sub(self.timestamp) < HOOK_STATUS_TTL_SECS
    }
}

/// Unrecognized values fall back to Idle
fn decode_status(raw: &str) -> SessionStatus {
    match raw {
        "running" => SessionStatus::Running,
        "waiting" => SessionStatus::Waiting,
        "error" => SessionStatus::Error,
        _ => SessionStatus::Idle,
    }
}

/// Session names become file names, so they must not leave the status directory
fn validate_session_name(name: &str) -> Result<(), TmuxError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(TmuxError::InvalidSessionName(name.to_string()));
    }
    Ok(())
}

/// Read the hook status file for `session_name` from `status_dir`
pub fn read_hook_status(status_dir: &Path, session_name: &str) -> Result<HookStatus, TmuxError> {
    validate_session_name(session_name)?;

    let path = status_dir.join(session_name);
    let data = std::fs::read_to_string(&path).map_err(|source| TmuxError::Io {
        path: path.clone(),
        source,
    })?;

    HookStatus::from_json(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const NOW: i64 = 1_709_312_400;

    fn write_status(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_read_hook_status() {
        let dir = tempfile::tempdir().unwrap();
        write_status(
            dir.path(),
            "my-session",
            &format!(r#"{{"status":"running","timestamp":{NOW},"event":"UserPromptSubmit"}}"#),
        );

        let hs = read_hook_status(dir.path(), "my-session").unwrap();
        assert_eq!(hs.status, SessionStatus::Running);
        assert_eq!(hs.raw_status, "running");
        assert_eq!(hs.event, "UserPromptSubmit");
        assert!(hs.is_valid(NOW));
    }

    #[test]
    fn test_expired_hook_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        write_status(
            dir.path(),
            "old-session",
            &format!(r#"{{"status":"running","timestamp":{},"event":"UserPromptSubmit"}}"#, NOW - 180),
        );

        let hs = read_hook_status(dir.path(), "old-session").unwrap();
        assert!(!hs.is_valid(NOW));
    }

    #[test]
    fn test_ttl_boundary() {
        let hs = HookStatus {
            timestamp: NOW,
            ..Default::default()
        };
        assert!(hs.is_valid(NOW + HOOK_STATUS_TTL_SECS - 1));
        assert!(!hs.is_valid(NOW + HOOK_STATUS_TTL_SECS));
    }

    #[test]
    fn test_status_decoding() {
        let cases = [
            ("running", SessionStatus::Running),
            ("waiting", SessionStatus::Waiting),
            ("error", SessionStatus::Error),
            ("idle", SessionStatus::Idle),
            ("RUNNING", SessionStatus::Idle),
            ("", SessionStatus::Idle),
        ];
        for (raw, expected) in cases {
            let body = format!(r#"{{"status":"{raw}","timestamp":{NOW},"event":"Stop"}}"#);
            assert_eq!(HookStatus::from_json(&body).unwrap().status, expected, "{raw:?}");
        }
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let hs = HookStatus::from_json(r#"{"status":"running","timestamp":100,"event":null}"#).unwrap();
        assert_eq!(hs.status, SessionStatus::Running);
        assert_eq!(hs.timestamp, 100);
        assert_eq!(hs.event, "");

        let hs = HookStatus::from_json(r#"{"status":null,"timestamp":null,"event":"Stop"}"#).unwrap();
        assert_eq!(hs.status, SessionStatus::Idle);
        assert_eq!(hs.raw_status, "");
        assert_eq!(hs.timestamp, 0);
        assert_eq!(hs.event, "Stop");
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let hs = HookStatus::from_json(r#"{"status":"waiting"}"#).unwrap();
        assert_eq!(hs.status, SessionStatus::Waiting);
        assert_eq!(hs.timestamp, 0);
        assert!(hs.event.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        write_status(dir.path(), "bad-session", "{bad json");

        let err = read_hook_status(dir.path(), "bad-session").unwrap_err();
        assert!(matches!(err, TmuxError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_hook_status(dir.path(), "nonexistent").unwrap_err();
        assert!(matches!(err, TmuxError::Io { .. }));
    }

    #[test]
    fn test_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["", ".", "..", "../escape", "a/b", "a\\b"] {
            let err = read_hook_status(dir.path(), name).unwrap_err();
            assert!(matches!(err, TmuxError::InvalidSessionName(_)), "{name:?}");
        }
    }
}
