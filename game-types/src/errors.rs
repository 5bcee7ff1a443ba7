use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::GamePhase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("Operation requires the {expected} phase, but the game is in the {actual} phase")]
    InvalidPhase { expected: GamePhase, actual: GamePhase },
    #[error("Team not found: {team_id}")]
    TeamNotFound { team_id: String },
    #[error("Answer index {index} is out of range for {len} answers")]
    AnswerIndexOutOfRange { index: usize, len: usize },
    #[error("Invalid number of teams: {count} (need between {min} and {max})")]
    InvalidTeamCount { count: usize, min: usize, max: usize },
    #[error("The word can only be changed before any team has answered")]
    WordChangeNotAllowed,
    #[error("The word catalog is empty")]
    EmptyWordCatalog,
    #[error("No game in progress")]
    NoGameInProgress,
}

impl GameError {
    /// True when the caller broke the call contract (bad index, unknown team, bad input)
    /// rather than calling at the wrong moment.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            GameError::TeamNotFound { .. }
                | GameError::AnswerIndexOutOfRange { .. }
                | GameError::InvalidTeamCount { .. }
        )
    }
}
