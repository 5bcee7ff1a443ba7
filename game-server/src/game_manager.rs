use std::sync::Arc;

use game_core::{Game, GameEventBus, GameRng, TracingEventHandler, WordCatalog};
use game_persistence::StateStore;
use game_types::{GameError, LeaderboardResponse, RoundState, RoundSummary};
use rand::RngCore;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

struct Session {
    game: Option<Game>,
    catalog: WordCatalog,
    rng: GameRng,
}

impl Session {
    /// Each game gets its own word stream and shuffle stream drawn from ours
    fn spawn_parts(&mut self) -> (WordCatalog, GameRng, GameEventBus) {
        let words = self.catalog.fork(GameRng::new(self.rng.next_u64()));
        let rng = GameRng::new(self.rng.next_u64());
        let mut bus = GameEventBus::new();
        bus.add_handler(Box::new(TracingEventHandler));
        (words, rng, bus)
    }

    fn game_mut(&mut self) -> Result<&mut Game, GameError> {
        self.game.as_mut().ok_or(GameError::NoGameInProgress)
    }
}

/// Owns the single game hosted by this server. Every operation runs under one
/// lock together with its snapshot save, so requests never interleave.
pub struct GameManager {
    session: Mutex<Session>,
    store: Arc<dyn StateStore>,
    max_teams: usize,
}

impl GameManager {
    pub fn new(catalog: WordCatalog, store: Arc<dyn StateStore>, max_teams: usize, rng: GameRng) -> Self {
        Self {
            session: Mutex::new(Session {
                game: None,
                catalog,
                rng,
            }),
            store,
            max_teams,
        }
    }

    /// Picks up a saved game, if the store holds a usable one
    pub async fn restore(&self) -> bool {
        let store = self.store.clone();
        let saved = match tokio::task::spawn_blocking(move || store.load()).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("spawn_blocking panicked while loading state: {}", e);
                None
            }
        };

        let Some(state) = saved else {
            info!("No saved game found, starting fresh");
            return false;
        };

        let mut session = self.session.lock().await;
        let (words, rng, bus) = session.spawn_parts();
        info!(
            "Restored round {} in the {} phase with {} teams",
            state.current_round,
            state.game_phase,
            state.teams.len()
        );
        session.game = Some(Game::from_state(state, words, rng, bus));
        true
    }

    pub async fn create_game(&self, team_names: &[String]) -> Result<RoundState, GameError> {
        let mut session = self.session.lock().await;
        if session.game.is_some() {
            warn!("Replacing the game in progress with a new one");
        }

        let (words, rng, bus) = session.spawn_parts();
        let game = Game::create(team_names, self.max_teams, words, rng, bus)?;
        let state = game.state.clone();
        session.game = Some(game);

        self.persist(&state).await;
        Ok(state)
    }

    pub async fn current_state(&self) -> Option<RoundState> {
        let session = self.session.lock().await;
        session.game.as_ref().map(|game| game.state.clone())
    }

    /// `team_id` defaults to the team whose turn it is
    pub async fn submit_answer(
        &self,
        team_id: Option<&str>,
        answer: &str,
    ) -> Result<RoundState, GameError> {
        self.mutate(|game| {
            match team_id {
                Some(team_id) => game.submit_answer(team_id, answer)?,
                None => game.submit_current_answer(answer)?,
            };
            Ok(())
        })
        .await
    }

    pub async fn start_voting(&self) -> Result<RoundState, GameError> {
        self.mutate(|game| game.start_voting().map(|_| ())).await
    }

    pub async fn submit_vote(
        &self,
        team_id: Option<&str>,
        answer_index: usize,
    ) -> Result<RoundState, GameError> {
        self.mutate(|game| {
            match team_id {
                Some(team_id) => game.submit_vote(team_id, answer_index)?,
                None => game.submit_current_vote(answer_index)?,
            };
            Ok(())
        })
        .await
    }

    pub async fn round_summary(&self) -> Result<RoundSummary, GameError> {
        let mut session = self.session.lock().await;
        session.game_mut()?.round_summary()
    }

    pub async fn next_round(&self) -> Result<RoundState, GameError> {
        self.mutate(|game| game.next_round().map(|_| ())).await
    }

    pub async fn change_word(&self) -> Result<RoundState, GameError> {
        self.mutate(|game| game.change_word()).await
    }

    pub async fn leaderboard(&self) -> Result<LeaderboardResponse, GameError> {
        let mut session = self.session.lock().await;
        let game = session.game_mut()?;
        Ok(LeaderboardResponse {
            round: game.state.current_round,
            standings: game.leaderboard(),
        })
    }

    /// Drops the game and its snapshot. The next game starts at round 1.
    pub async fn reset(&self) {
        let mut session = self.session.lock().await;
        session.game = None;

        let store = self.store.clone();
        match tokio::task::spawn_blocking(move || store.clear()).await {
            Ok(Ok(())) => info!("Game reset"),
            Ok(Err(e)) => error!("Failed to clear saved state: {}", e),
            Err(e) => error!("spawn_blocking panicked while clearing state: {}", e),
        }
    }

    async fn mutate<F>(&self, op: F) -> Result<RoundState, GameError>
    where
        F: FnOnce(&mut Game) -> Result<(), GameError>,
    {
        let mut session = self.session.lock().await;
        let game = session.game_mut()?;
        op(game)?;
        let state = game.state.clone();

        self.persist(&state).await;
        Ok(state)
    }

    /// Best effort: a failed save is logged and the game carries on
    async fn persist(&self, state: &RoundState) {
        let store = self.store.clone();
        let state = state.clone();
        let round = state.current_round;

        match tokio::task::spawn_blocking(move || store.save(&state)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!("Failed to save round {}: {}", round, e),
            Err(e) => error!("spawn_blocking panicked while saving state: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_persistence::MemoryStore;

    fn manager(store: Arc<MemoryStore>) -> GameManager {
        GameManager::new(WordCatalog::with_default_words(), store, 16, GameRng::new(5))
    }

    #[tokio::test]
    async fn test_operations_need_a_game() {
        let manager = manager(Arc::new(MemoryStore::new()));
        assert!(manager.current_state().await.is_none());
        assert_eq!(
            manager.submit_answer(None, "fake").await,
            Err(GameError::NoGameInProgress)
        );
        assert_eq!(manager.next_round().await, Err(GameError::NoGameInProgress));
    }

    #[tokio::test]
    async fn test_every_mutation_is_saved() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());

        let state = manager
            .create_game(&["Alpha".to_string(), "Beta".to_string()])
            .await
            .unwrap();
        assert_eq!(store.load(), Some(state));

        let state = manager.submit_answer(None, "fake1").await.unwrap();
        assert_eq!(store.load(), Some(state));
    }

    #[tokio::test]
    async fn test_failed_operation_leaves_snapshot_alone() {
        let store = Arc::new(MemoryStore::new());
        let manager = manager(store.clone());
        let created = manager
            .create_game(&["Alpha".to_string(), "Beta".to_string()])
            .await
            .unwrap();

        assert!(manager.submit_vote(None, 0).await.is_err());
        assert_eq!(store.load(), Some(created.clone()));
        assert_eq!(manager.current_state().await, Some(created));
    }
}
