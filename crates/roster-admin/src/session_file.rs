//! Stored login session under the roster home directory
//!
//! The session survives between invocations the same way a browser keeps
//! it across reloads: one fixed file, read on startup, written on login,
//! removed on logout. An unreadable file counts as logged out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use roster_api::model::Session;

pub const HOME_ENV: &str = "ROSTER_HOME";
const SESSION_FILE: &str = "session.json";

/// `$ROSTER_HOME`, or `~/.roster` when unset.
pub fn home_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".roster")
}

fn session_path(dir: &Path) -> PathBuf {
    dir.join(SESSION_FILE)
}

/// Read the stored session, if any.
pub fn load_from(dir: &Path) -> Option<Session> {
    let path = session_path(dir);
    let raw = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!("ignoring unreadable session file {}: {}", path.display(), e);
            None
        }
    }
}

/// Write the session, creating the directory when needed.
pub fn save_in(dir: &Path, session: &Session) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = session_path(dir);
    let raw = serde_json::to_string_pretty(session)?;
    fs::write(&path, raw).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Delete the session file; missing is fine.
pub fn remove_from(dir: &Path) -> Result<()> {
    let path = session_path(dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

pub fn load() -> Option<Session> {
    load_from(&home_dir())
}

pub fn save(session: &Session) -> Result<()> {
    save_in(&home_dir(), session)
}

pub fn remove() -> Result<()> {
    remove_from(&home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_api::model::SessionUser;

    fn session() -> Session {
        Session {
            access_token: "tok-abc".to_string(),
            refresh_token: "tok-ref".to_string(),
            user: SessionUser {
                id: "u1".to_string(),
                login_id: "admin".to_string(),
                name: "Admin".to_string(),
            },
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        save_in(dir.path(), &session()).unwrap();

        let restored = load_from(dir.path()).unwrap();
        assert_eq!(restored.access_token, "tok-abc");
        assert_eq!(restored.user.login_id, "admin");
    }

    #[test]
    fn test_missing_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(dir.path()).is_none());
    }

    #[test]
    fn test_unreadable_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SESSION_FILE), "{not json").unwrap();
        assert!(load_from(dir.path()).is_none());
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        remove_from(dir.path()).unwrap();

        save_in(dir.path(), &session()).unwrap();
        remove_from(dir.path()).unwrap();
        assert!(load_from(dir.path()).is_none());
    }

    #[test]
    fn test_save_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("roster");
        save_in(&nested, &session()).unwrap();
        assert!(load_from(&nested).is_some());
    }
}
