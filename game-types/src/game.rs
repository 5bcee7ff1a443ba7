use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use ts_rs::TS;

pub type TeamId = String;

/// Points earned by each team during a single round, keyed by team id
pub type RoundScores = HashMap<TeamId, u32>;

/// Reserved team id carried by the injected true-definition answer
pub const TRUE_DEFINITION_TEAM_ID: &str = "__TRUE_DEFINITION__";
pub const TRUE_DEFINITION_TEAM_NAME: &str = "True Definition";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Word {
    pub word: String,
    pub definition: String,
}

impl Word {
    pub fn new(word: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: definition.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Answer {
    pub team_id: TeamId,
    pub team_name: String,
    pub answer: String,
    #[serde(default)]
    pub is_true_definition: bool,
}

impl Answer {
    /// The disguised dictionary definition injected when voting starts
    pub fn true_definition(definition: &str) -> Self {
        Self {
            team_id: TRUE_DEFINITION_TEAM_ID.to_string(),
            team_name: TRUE_DEFINITION_TEAM_NAME.to_string(),
            answer: definition.to_string(),
            is_true_definition: true,
        }
    }

    pub fn is_true(&self) -> bool {
        self.is_true_definition || self.team_id == TRUE_DEFINITION_TEAM_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vote {
    pub team_id: TeamId,
    pub team_name: String,
    pub answer_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GamePhase {
    Writing, // Teams take turns inventing definitions
    Voting,  // Teams pick the definition they believe is real
    Results, // Round points revealed, waiting for next round
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Writing => "writing",
            GamePhase::Voting => "voting",
            GamePhase::Results => "results",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundState {
    pub teams: Vec<Team>,
    pub current_round: u32,
    pub current_word: String,
    pub current_word_definition: String,
    pub current_team_index: usize,
    pub answers: Vec<Answer>,
    pub votes: Vec<Vote>,
    pub game_phase: GamePhase,
    #[serde(default)]
    pub true_definition_index: Option<usize>,
}

impl RoundState {
    pub fn current_team(&self) -> Option<&Team> {
        self.teams.get(self.current_team_index)
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.id == team_id)
    }

    /// Position of a team in turn order
    pub fn team_position(&self, team_id: &str) -> Option<usize> {
        self.teams.iter().position(|team| team.id == team_id)
    }

    /// The answer a team wrote this round, ignoring the injected true definition
    pub fn answer_for(&self, team_id: &str) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| answer.team_id == team_id && !answer.is_true())
    }

    pub fn current_word(&self) -> Word {
        Word::new(&self.current_word, &self.current_word_definition)
    }

    /// Checks the structural invariants of a round snapshot.
    /// Used to reject corrupt persisted state before resuming it.
    pub fn validate(&self) -> Result<(), String> {
        if self.teams.len() < 2 {
            return Err(format!("expected at least 2 teams, found {}", self.teams.len()));
        }

        let mut team_ids = HashSet::new();
        for team in &self.teams {
            if team.name.trim().is_empty() {
                return Err(format!("team {} has an empty name", team.id));
            }
            if team.id == TRUE_DEFINITION_TEAM_ID || !team_ids.insert(team.id.as_str()) {
                return Err(format!("duplicate or reserved team id {}", team.id));
            }
        }

        if self.current_round == 0 {
            return Err("current round must start at 1".to_string());
        }

        if self.current_team_index >= self.teams.len() {
            return Err(format!(
                "current team index {} out of range for {} teams",
                self.current_team_index,
                self.teams.len()
            ));
        }

        let mut answer_ids = HashSet::new();
        for answer in self.answers.iter().filter(|answer| !answer.is_true()) {
            if !team_ids.contains(answer.team_id.as_str()) {
                return Err(format!("answer from unknown team {}", answer.team_id));
            }
            if !answer_ids.insert(answer.team_id.as_str()) {
                return Err(format!("duplicate answer from team {}", answer.team_id));
            }
        }

        let true_answers = self.answers.iter().filter(|answer| answer.is_true()).count();
        match self.game_phase {
            GamePhase::Writing => {
                if true_answers != 0 || !self.votes.is_empty() {
                    return Err("writing phase cannot hold votes or the true definition".to_string());
                }
                if self.true_definition_index.is_some() {
                    return Err("writing phase cannot hold a true definition index".to_string());
                }
            }
            GamePhase::Voting | GamePhase::Results => {
                if true_answers != 1 {
                    return Err(format!("expected one true definition, found {}", true_answers));
                }
                if let Some(index) = self.true_definition_index {
                    let points_at_truth = self.answers.get(index).is_some_and(Answer::is_true);
                    if !points_at_truth {
                        return Err(format!("true definition index {} is stale", index));
                    }
                }
            }
        }

        if self.votes.len() > self.teams.len() {
            return Err(format!("{} votes for {} teams", self.votes.len(), self.teams.len()));
        }

        let mut voter_ids = HashSet::new();
        for vote in &self.votes {
            if !team_ids.contains(vote.team_id.as_str()) || !voter_ids.insert(vote.team_id.as_str()) {
                return Err(format!("invalid or duplicate vote from team {}", vote.team_id));
            }
            if vote.answer_index >= self.answers.len() {
                return Err(format!("vote index {} out of range", vote.answer_index));
            }
        }

        Ok(())
    }
}

/// One shuffled answer as shown on the results screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerTally {
    pub index: usize,
    pub answer: String,
    pub author_id: TeamId,
    pub author_name: String,
    pub is_true_definition: bool,
    pub voters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamStanding {
    pub team_id: TeamId,
    pub team_name: String,
    pub round_points: u32,
    pub total_score: u32,
}

/// Everything revealed at the end of a round. Derived from RoundState only,
/// so it can be recomputed at any time without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundSummary {
    pub round: u32,
    pub word: String,
    pub definition: String,
    pub true_definition_index: Option<usize>,
    pub answers: Vec<AnswerTally>,
    pub standings: Vec<TeamStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            name: name.to_string(),
            score: 0,
        }
    }

    fn writing_state() -> RoundState {
        RoundState {
            teams: vec![team("a", "Alpha"), team("b", "Beta")],
            current_round: 1,
            current_word: "Zyx".to_string(),
            current_word_definition: "definition D".to_string(),
            current_team_index: 0,
            answers: Vec::new(),
            votes: Vec::new(),
            game_phase: GamePhase::Writing,
            true_definition_index: None,
        }
    }

    #[test]
    fn test_fresh_state_is_valid() {
        assert!(writing_state().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_single_team() {
        let mut state = writing_state();
        state.teams.pop();
        assert!(state.validate().unwrap_err().contains("at least 2 teams"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_turn() {
        let mut state = writing_state();
        state.current_team_index = 2;
        assert!(state.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_stale_true_definition_index() {
        let mut state = writing_state();
        state.answers = vec![
            Answer {
                team_id: "a".to_string(),
                team_name: "Alpha".to_string(),
                answer: "fake".to_string(),
                is_true_definition: false,
            },
            Answer::true_definition("definition D"),
        ];
        state.game_phase = GamePhase::Voting;
        state.true_definition_index = Some(0);
        assert!(state.validate().unwrap_err().contains("stale"));

        state.true_definition_index = Some(1);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_true_definition_answer() {
        let answer = Answer::true_definition("real meaning");
        assert!(answer.is_true());
        assert_eq!(answer.team_id, TRUE_DEFINITION_TEAM_ID);
        assert_eq!(answer.answer, "real meaning");
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        let json = r#"{
            "teams": [{"id": "a", "name": "Alpha", "score": 3}, {"id": "b", "name": "Beta", "score": 0}],
            "current_round": 2,
            "current_word": "Zyx",
            "current_word_definition": "definition D",
            "current_team_index": 1,
            "answers": [{"team_id": "a", "team_name": "Alpha", "answer": "fake1"}],
            "votes": [],
            "game_phase": "Writing"
        }"#;

        let state: RoundState = serde_json::from_str(json).unwrap();
        assert_eq!(state.true_definition_index, None);
        assert!(!state.answers[0].is_true_definition);
        assert_eq!(state.current_team().unwrap().name, "Beta");
        assert!(state.validate().is_ok());
    }
}
