use game_types::{GameError, GamePhase, RoundScores, RoundState, Team, Word};
use std::collections::HashSet;
use tracing::info;
use uuid::Uuid;

use crate::{ScoringEngine, turn};

pub const MIN_TEAMS: usize = 2;
pub const DEFAULT_MAX_TEAMS: usize = 16;

/// Builds the team roster from raw names: trimmed, blanks dropped, exact
/// duplicates collapsed onto their first occurrence.
pub fn teams_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Team> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_string()))
        .map(|name| Team {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            score: 0,
        })
        .collect()
}

/// Fresh game at round 1 in the writing phase
pub fn new_round_state<S: AsRef<str>>(
    team_names: &[S],
    word: Word,
    max_teams: usize,
) -> Result<RoundState, GameError> {
    let teams = teams_from_names(team_names);
    let max_teams = max_teams.max(MIN_TEAMS);
    if teams.len() < MIN_TEAMS || teams.len() > max_teams {
        return Err(GameError::InvalidTeamCount {
            count: teams.len(),
            min: MIN_TEAMS,
            max: max_teams,
        });
    }

    Ok(RoundState {
        teams,
        current_round: 1,
        current_word: word.word,
        current_word_definition: word.definition,
        current_team_index: 0,
        answers: Vec::new(),
        votes: Vec::new(),
        game_phase: GamePhase::Writing,
        true_definition_index: None,
    })
}

/// Commits the finished round's points and opens the next round on `word`.
/// Returns the points that were committed.
pub fn next_round(state: &mut RoundState, word: Word) -> Result<RoundScores, GameError> {
    if state.game_phase != GamePhase::Results {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Results,
            actual: state.game_phase,
        });
    }

    let round_scores = ScoringEngine::compute_round_scores(state);
    ScoringEngine::apply_round_scores(&mut state.teams, &round_scores);

    state.answers.clear();
    state.votes.clear();
    state.true_definition_index = None;
    state.current_round += 1;
    state.current_word = word.word;
    state.current_word_definition = word.definition;
    state.game_phase = GamePhase::Writing;
    turn::reset_turn(state);

    info!("Round {} started", state.current_round);
    Ok(round_scores)
}

/// Swaps the word before anyone has written for it
pub fn change_word(state: &mut RoundState, word: Word) -> Result<(), GameError> {
    if state.game_phase != GamePhase::Writing {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Writing,
            actual: state.game_phase,
        });
    }
    if !state.answers.is_empty() {
        return Err(GameError::WordChangeNotAllowed);
    }

    state.current_word = word.word;
    state.current_word_definition = word.definition;
    Ok(())
}
