//! Locally persisted identity of the current user.
//!
//! One JSON file, named after [`SESSION_KEY`], holds
//! `{"schema_version": 1, "user": {...}}`. It is read once when the store is
//! opened and written once when onboarding completes.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use wellness_core::User;

use crate::error::{Result, SessionError};

/// Storage key of the persisted user.
pub const SESSION_KEY: &str = "wellness_user";

/// Current session file schema.
pub const SCHEMA_VERSION: u64 = 1;

/// Schema version assigned to a bare user object written before versioning.
pub const LEGACY_SCHEMA_VERSION: u64 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    schema_version: u64,
    user: User,
}

/// Directory holding the session file: `WELLNESS_SESSION_DIR`, or
/// `$HOME/.wellness`.
pub fn default_session_dir() -> PathBuf {
    if let Some(dir) = env::var_os("WELLNESS_SESSION_DIR") {
        return PathBuf::from(dir);
    }
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wellness")
}

fn session_path(dir: &Path) -> PathBuf {
    dir.join(format!("{}.json", SESSION_KEY))
}

fn read_session_file(path: &Path) -> Result<Option<User>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read(path)?;
    let value: Value = serde_json::from_slice(&data)?;

    let version = match value.get("schema_version") {
        Some(version) => version.as_u64().ok_or_else(|| {
            SessionError::Json(serde::de::Error::custom(format!(
                "schema_version is not an integer: {}",
                version
            )))
        })?,
        None => LEGACY_SCHEMA_VERSION,
    };

    match version {
        SCHEMA_VERSION => {
            let file: SessionFile = serde_json::from_value(value)?;
            Ok(Some(file.user))
        }
        LEGACY_SCHEMA_VERSION => {
            debug!("Loading unversioned session from {}", path.display());
            Ok(Some(serde_json::from_value(value)?))
        }
        other => Err(SessionError::UnsupportedVersion(other)),
    }
}

fn write_session_file(dir: &Path, user: &User) -> Result<()> {
    fs::create_dir_all(dir)?;
    let final_path = session_path(dir);
    let tmp_path = dir.join(format!("{}.json.tmp", SESSION_KEY));

    let file = SessionFile {
        schema_version: SCHEMA_VERSION,
        user: user.clone(),
    };
    fs::write(&tmp_path, serde_json::to_vec_pretty(&file)?)?;

    match fs::rename(&tmp_path, &final_path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if final_path.exists() {
                fs::remove_file(&final_path)?;
                fs::rename(&tmp_path, &final_path)?;
                Ok(())
            } else {
                Err(rename_err.into())
            }
        }
    }
}

/// Holds the identified user for the lifetime of the process.
#[derive(Debug)]
pub struct SessionStore {
    dir: PathBuf,
    current: RwLock<Option<User>>,
}

impl SessionStore {
    /// Open the store in `dir`, loading a previously persisted user.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let current = read_session_file(&session_path(&dir))?;
        if let Some(user) = &current {
            info!("Restored session for user {}", user.id);
        }

        Ok(Self {
            dir,
            current: RwLock::new(current),
        })
    }

    /// A store with no backing file contents yet.
    pub fn empty(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            current: RwLock::new(None),
        }
    }

    pub fn path(&self) -> PathBuf {
        session_path(&self.dir)
    }

    pub async fn current(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn user_id(&self) -> Option<i64> {
        self.current.read().await.as_ref().map(|user| user.id)
    }

    pub async fn is_established(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Persist `user` and make it the current user.
    ///
    /// A store holds one identity: once a user is established, further calls
    /// fail with [`SessionError::AlreadyEstablished`]. The file is replaced
    /// atomically; on failure the in-memory user is left unchanged.
    pub async fn establish(&self, user: User) -> Result<()> {
        let mut current = self.current.write().await;
        if let Some(existing) = current.as_ref() {
            warn!("Refusing to replace session of user {} with user {}", existing.id, user.id);
            return Err(SessionError::AlreadyEstablished(existing.id));
        }

        let dir = self.dir.clone();
        let saved = user.clone();
        tokio::task::spawn_blocking(move || write_session_file(&dir, &saved))
            .await
            .map_err(io::Error::other)??;

        info!("Session established for user {} at {}", user.id, self.path().display());
        *current = Some(user);
        Ok(())
    }
}
