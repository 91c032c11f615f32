//! Session token persistence.
//!
//! The token is the only thing the client persists between runs. It lives in
//! a small JSON object file under the `token` key; other keys in that file are
//! left alone so the file can be shared with other settings.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
#[cfg(test)]
use std::sync::Mutex;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not a JSON object: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the bearer token is kept between commands.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token. An empty string counts as no token.
    fn get(&self) -> Result<Option<String>, SessionError>;
    fn set(&self, token: &str) -> Result<(), SessionError>;
    fn clear(&self) -> Result<(), SessionError>;

    /// True when a usable token is stored. Unreadable storage counts as signed out.
    fn has_token(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> Result<Map<String, Value>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        let body = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, body)?;
        Ok(())
    }

    fn remove_file(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let map = self.read_map()?;
        Ok(map
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_owned))
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        let mut map = match self.read_map() {
            Err(SessionError::Corrupt(e)) => {
                warn!("Overwriting unreadable session file {}: {e}", self.path.display());
                Map::new()
            }
            other => other?,
        };
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)?;
        debug!("Session token saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut map = match self.read_map() {
            Err(SessionError::Corrupt(e)) => {
                warn!("Removing unreadable session file {}: {e}", self.path.display());
                return self.remove_file();
            }
            other => other?,
        };
        if map.remove(TOKEN_KEY).is_none() {
            return Ok(());
        }
        if map.is_empty() {
            self.remove_file()?;
        } else {
            self.write_map(&map)?;
        }
        debug!("Session token removed from {}", self.path.display());
        Ok(())
    }
}

/// Process-local store. Nothing survives the process.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let guard = self.token.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone().filter(|t| !t.is_empty()))
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
