use std::sync::Mutex;

use game_types::RoundState;

use crate::{PersistenceError, StateStore};

/// Keeps the snapshot in process memory; used by tests and when no state
/// file is configured
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<Option<RoundState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn save(&self, state: &RoundState) -> Result<(), PersistenceError> {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        *snapshot = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Option<RoundState> {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn clear(&self) -> Result<(), PersistenceError> {
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::{GamePhase, Team};

    fn state() -> RoundState {
        RoundState {
            teams: vec![
                Team {
                    id: "a".to_string(),
                    name: "Alpha".to_string(),
                    score: 3,
                },
                Team {
                    id: "b".to_string(),
                    name: "Beta".to_string(),
                    score: 1,
                },
            ],
            current_round: 4,
            current_word: "Zyx".to_string(),
            current_word_definition: "definition D".to_string(),
            current_team_index: 1,
            answers: Vec::new(),
            votes: Vec::new(),
            game_phase: GamePhase::Writing,
            true_definition_index: None,
        }
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemoryStore::new();
        assert!(store.load().is_none());

        store.save(&state()).unwrap();
        assert_eq!(store.load(), Some(state()));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
