pub mod file_store;
pub mod memory_store;

pub use file_store::JsonFileStore;
pub use memory_store::MemoryStore;

use game_types::RoundState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Storage for the single in-progress game.
///
/// Saving is best effort from the caller's point of view: a failed save must
/// never undo the in-memory transition that triggered it. Loading treats
/// anything unreadable as "no saved game".
pub trait StateStore: Send + Sync {
    fn save(&self, state: &RoundState) -> Result<(), PersistenceError>;

    /// `None` when nothing is stored or the stored snapshot cannot be used
    fn load(&self) -> Option<RoundState>;

    fn clear(&self) -> Result<(), PersistenceError>;
}
