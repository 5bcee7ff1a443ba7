use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{RoundState, TeamId, TeamStanding};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateGameRequest {
    pub team_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitAnswerRequest {
    pub answer: String,
    /// Defaults to the team whose turn it is
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmitVoteRequest {
    pub answer_index: usize,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameStateResponse {
    pub state: RoundState,
    /// Name of the team that should hold the device
    pub current_team_name: Option<String>,
}

impl From<RoundState> for GameStateResponse {
    fn from(state: RoundState) -> Self {
        let current_team_name = state.current_team().map(|team| team.name.clone());
        Self {
            state,
            current_team_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardResponse {
    pub round: u32,
    pub standings: Vec<TeamStanding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
