use game_types::{GamePhase, RoundScores, Team, TeamId};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameCreated {
        teams: Vec<Team>,
        word: String,
    },
    GameResumed {
        round: u32,
        phase: GamePhase,
    },
    AnswerSubmitted {
        round: u32,
        team_id: TeamId,
        replaced: bool,
    },
    VotingStarted {
        round: u32,
        answer_count: usize,
        missing_answers: usize,
    },
    VoteCast {
        round: u32,
        team_id: TeamId,
        answer_index: usize,
    },
    RoundCompleted {
        round: u32,
        round_scores: RoundScores,
    },
    NextRoundStarted {
        round: u32,
        committed_scores: RoundScores,
    },
    WordChanged {
        round: u32,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::GameCreated { .. } => "game_created",
            GameEvent::GameResumed { .. } => "game_resumed",
            GameEvent::AnswerSubmitted { .. } => "answer_submitted",
            GameEvent::VotingStarted { .. } => "voting_started",
            GameEvent::VoteCast { .. } => "vote_cast",
            GameEvent::RoundCompleted { .. } => "round_completed",
            GameEvent::NextRoundStarted { .. } => "next_round_started",
            GameEvent::WordChanged { .. } => "word_changed",
        }
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Writes every event to the tracing log
pub struct TracingEventHandler;

impl GameEventHandler for TracingEventHandler {
    fn handle_event(&mut self, event: GameEvent) {
        // Answer text and the word itself stay out of the log; the device is shared
        match &event {
            GameEvent::GameCreated { teams, .. } => {
                info!(kind = event.name(), teams = teams.len(), "Game created");
            }
            GameEvent::GameResumed { round, phase } => {
                info!(kind = event.name(), round, %phase, "Game resumed");
            }
            GameEvent::AnswerSubmitted { round, team_id, replaced } => {
                info!(kind = event.name(), round, team_id = %team_id, replaced, "Answer submitted");
            }
            GameEvent::VotingStarted { round, answer_count, missing_answers } => {
                info!(kind = event.name(), round, answer_count, missing_answers, "Voting started");
            }
            GameEvent::VoteCast { round, team_id, .. } => {
                info!(kind = event.name(), round, team_id = %team_id, "Vote cast");
            }
            GameEvent::RoundCompleted { round, .. } => {
                info!(kind = event.name(), round, "Round completed");
            }
            GameEvent::NextRoundStarted { round, .. } => {
                info!(kind = event.name(), round, "Next round started");
            }
            GameEvent::WordChanged { round } => {
                info!(kind = event.name(), round, "Word changed");
            }
        }
    }
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}
