use game_types::{GameError, GamePhase, RoundScores, RoundState, RoundSummary, Team, TeamStanding};
use tracing::{debug, info};

use crate::{
    AnswerOutcome, GameEvent, GameEventBus, GameRng, ScoringEngine, VoteOutcome,
    WordCatalog, WordSource, answers, round, voting,
};

/// Owns one game's round state together with its random source, word source
/// and event bus. Every operation runs to completion before returning.
pub struct Game<W: WordSource = WordCatalog> {
    pub state: RoundState,
    rng: GameRng,
    word_source: W,
    event_bus: GameEventBus,
}

impl<W: WordSource> std::fmt::Debug for Game<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("handlers", &self.event_bus.handler_count())
            .finish()
    }
}

impl<W: WordSource> Game<W> {
    /// Starts a new game at round 1 with a freshly drawn word
    pub fn create<S: AsRef<str>>(
        team_names: &[S],
        max_teams: usize,
        mut word_source: W,
        rng: GameRng,
        event_bus: GameEventBus,
    ) -> Result<Self, GameError> {
        let word = word_source.next_word()?;
        let state = round::new_round_state(team_names, word, max_teams)?;

        let mut game = Self {
            state,
            rng,
            word_source,
            event_bus,
        };
        info!("Created game with {} teams", game.state.teams.len());
        game.publish(GameEvent::GameCreated {
            teams: game.state.teams.clone(),
            word: game.state.current_word.clone(),
        });
        Ok(game)
    }

    /// Resumes a previously saved round
    pub fn from_state(
        state: RoundState,
        word_source: W,
        rng: GameRng,
        event_bus: GameEventBus,
    ) -> Self {
        let mut game = Self {
            state,
            rng,
            word_source,
            event_bus,
        };
        game.publish(GameEvent::GameResumed {
            round: game.state.current_round,
            phase: game.state.game_phase,
        });
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.state.game_phase
    }

    pub fn current_team(&self) -> Option<&Team> {
        self.state.current_team()
    }

    /// Records an answer for `team_id`. When the last team in turn order
    /// answers, voting starts within the same call so the shuffle sees every
    /// answer that was written.
    pub fn submit_answer(&mut self, team_id: &str, text: &str) -> Result<AnswerOutcome, GameError> {
        let replaced = self.state.answer_for(team_id).is_some();
        let outcome = answers::submit_answer(&mut self.state, team_id, text)?;

        if outcome == AnswerOutcome::Ignored {
            return Ok(outcome);
        }

        self.publish(GameEvent::AnswerSubmitted {
            round: self.state.current_round,
            team_id: team_id.to_string(),
            replaced,
        });

        if outcome == AnswerOutcome::WritingComplete {
            self.start_voting()?;
        }
        Ok(outcome)
    }

    /// Records an answer for the team whose turn it is
    pub fn submit_current_answer(&mut self, text: &str) -> Result<AnswerOutcome, GameError> {
        let team_id = self.current_team_id()?;
        self.submit_answer(&team_id, text)
    }

    /// Opens voting, even when some teams have not answered yet
    pub fn start_voting(&mut self) -> Result<usize, GameError> {
        let missing_answers = answers::missing_answers(&self.state).len();
        let true_index = voting::start_voting(&mut self.state, &mut self.rng)?;

        self.publish(GameEvent::VotingStarted {
            round: self.state.current_round,
            answer_count: self.state.answers.len(),
            missing_answers,
        });
        Ok(true_index)
    }

    pub fn submit_vote(&mut self, team_id: &str, answer_index: usize) -> Result<VoteOutcome, GameError> {
        let outcome = voting::submit_vote(&mut self.state, team_id, answer_index)?;

        self.publish(GameEvent::VoteCast {
            round: self.state.current_round,
            team_id: team_id.to_string(),
            answer_index,
        });

        if outcome == VoteOutcome::VotingComplete {
            self.publish(GameEvent::RoundCompleted {
                round: self.state.current_round,
                round_scores: self.round_scores(),
            });
        }
        Ok(outcome)
    }

    pub fn submit_current_vote(&mut self, answer_index: usize) -> Result<VoteOutcome, GameError> {
        let team_id = self.current_team_id()?;
        self.submit_vote(&team_id, answer_index)
    }

    /// Points this round would award; nothing is committed
    pub fn round_scores(&self) -> RoundScores {
        ScoringEngine::compute_round_scores(&self.state)
    }

    /// Reveal view for the results phase
    pub fn round_summary(&self) -> Result<RoundSummary, GameError> {
        if self.state.game_phase != GamePhase::Results {
            return Err(GameError::InvalidPhase {
                expected: GamePhase::Results,
                actual: self.state.game_phase,
            });
        }
        Ok(ScoringEngine::round_summary(&self.state))
    }

    pub fn leaderboard(&self) -> Vec<TeamStanding> {
        ScoringEngine::leaderboard(&self.state.teams)
    }

    /// Commits this round's points and starts the next round on a new word
    pub fn next_round(&mut self) -> Result<RoundScores, GameError> {
        if self.state.game_phase != GamePhase::Results {
            return Err(GameError::InvalidPhase {
                expected: GamePhase::Results,
                actual: self.state.game_phase,
            });
        }

        let word = self.word_source.next_word()?;
        let committed_scores = round::next_round(&mut self.state, word)?;

        self.publish(GameEvent::NextRoundStarted {
            round: self.state.current_round,
            committed_scores: committed_scores.clone(),
        });
        Ok(committed_scores)
    }

    /// Draws a different word for the current round
    pub fn change_word(&mut self) -> Result<(), GameError> {
        if self.state.game_phase == GamePhase::Writing && !self.state.answers.is_empty() {
            return Err(GameError::WordChangeNotAllowed);
        }

        let word = self.word_source.next_word()?;
        round::change_word(&mut self.state, word)?;

        self.publish(GameEvent::WordChanged {
            round: self.state.current_round,
        });
        Ok(())
    }

    fn current_team_id(&self) -> Result<String, GameError> {
        self.state
            .current_team()
            .map(|team| team.id.clone())
            .ok_or_else(|| GameError::TeamNotFound {
                team_id: format!("#{}", self.state.current_team_index),
            })
    }

    fn publish(&mut self, event: GameEvent) {
        debug!("Publishing {}", event.name());
        self.event_bus.publish(event);
    }
}
