//! Roster persistence backends
//!
//! The store talks to durable storage through the [`RosterBackend`] trait:
//! `load_all` once at startup, `save_all` with a full snapshot after each
//! mutation (overwrite semantics). Which backend is wired up is a startup
//! decision; the store behaves identically with all of them.

use crate::core::errors::RosterError;
use crate::features::roster::person::Person;
use async_trait::async_trait;
use log::debug;
use std::path::{Path, PathBuf};

/// Durable backing contract for the roster.
#[async_trait]
pub trait RosterBackend: Send + Sync {
    /// Read the full roster snapshot. An absent backing file is an empty
    /// roster, not an error.
    async fn load_all(&self) -> Result<Vec<Person>, RosterError>;

    /// Overwrite the stored snapshot with the given roster.
    async fn save_all(&self, roster: &[Person]) -> Result<(), RosterError>;
}

/// JSON file backend: the whole roster as one pretty-printed array.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileBackend { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RosterBackend for JsonFileBackend {
    async fn load_all(&self) -> Result<Vec<Person>, RosterError> {
        if !self.path.exists() {
            debug!("Roster file {} not found, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            RosterError::persistence(format!("read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&contents).map_err(|e| {
            RosterError::persistence(format!("parse {}: {e}", self.path.display()))
        })
    }

    async fn save_all(&self, roster: &[Person]) -> Result<(), RosterError> {
        let json = serde_json::to_string_pretty(roster)
            .map_err(|e| RosterError::persistence(format!("serialize roster: {e}")))?;
        tokio::fs::write(&self.path, json).await.map_err(|e| {
            RosterError::persistence(format!("write {}: {e}", self.path.display()))
        })
    }
}

/// In-memory no-op backend: the "no durable backing" strategy, also used
/// as the store double in tests.
#[derive(Default)]
pub struct MemoryBackend;

#[async_trait]
impl RosterBackend for MemoryBackend {
    async fn load_all(&self) -> Result<Vec<Person>, RosterError> {
        Ok(Vec::new())
    }

    async fn save_all(&self, _roster: &[Person]) -> Result<(), RosterError> {
        Ok(())
    }
}
