use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use game_types::RoundState;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{PersistenceError, StateStore};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot<S> {
    version: u32,
    saved_at: DateTime<Utc>,
    state: S,
}

/// Stores the game as one JSON document on disk. Writes go to a sibling
/// temp file first and are renamed into place, so a crash mid-save leaves
/// the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn read_snapshot(&self) -> Result<Option<Snapshot<RoundState>>, anyhow::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}

impl StateStore for JsonFileStore {
    fn save(&self, state: &RoundState) -> Result<(), PersistenceError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            state,
        };
        let json = serde_json::to_string_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| self.io_error(e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| self.io_error(e))?;

        debug!(
            "Saved round {} ({}) to {}",
            state.current_round,
            state.game_phase,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Option<RoundState> {
        let snapshot = match self.read_snapshot() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!("Ignoring unreadable snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };

        if snapshot.version != SNAPSHOT_VERSION {
            warn!(
                "Ignoring snapshot {} with version {}",
                self.path.display(),
                snapshot.version
            );
            return None;
        }

        if let Err(reason) = snapshot.state.validate() {
            warn!("Ignoring inconsistent snapshot {}: {}", self.path.display(), reason);
            return None;
        }

        debug!(
            "Loaded snapshot saved at {} from {}",
            snapshot.saved_at,
            self.path.display()
        );
        Some(snapshot.state)
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
