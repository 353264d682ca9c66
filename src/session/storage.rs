use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::types::{Session, SESSION_VERSION};

/// Get the default session file path (~/.config/fitscore/session.json)
pub fn get_session_path() -> PathBuf {
    crate::config::get_config_dir().join("session.json")
}

/// Load a session from a JSON file.
///
/// If the file doesn't exist, returns a new empty session.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_session(path: &Path) -> Result<Session> {
    if !path.exists() {
        return Ok(Session::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open session file at {}", path.display()))?;

    let session: Session = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse session file at {}", path.display()))?;

    if session.version != SESSION_VERSION {
        anyhow::bail!("Unsupported session file version: {}", session.version);
    }

    Ok(session)
}

/// Save a session to a JSON file atomically.
///
/// Creates the parent directory if it doesn't exist; the write either fully
/// lands or leaves the previous file untouched.
pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory at {}", parent.display())
            })?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, session).context("Failed to serialize session")?;

    file.commit().context("Failed to save session")?;

    Ok(())
}
