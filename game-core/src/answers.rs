use game_types::{Answer, GameError, GamePhase, RoundState};
use tracing::debug;

use crate::turn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Blank submission; nothing stored and the turn stays put
    Ignored,
    Recorded { next_team_index: usize },
    /// The last team in turn order has answered; voting should start now
    WritingComplete,
}

/// Records (or replaces) a team's fake definition for the current word.
pub fn submit_answer(
    state: &mut RoundState,
    team_id: &str,
    text: &str,
) -> Result<AnswerOutcome, GameError> {
    if state.game_phase != GamePhase::Writing {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Writing,
            actual: state.game_phase,
        });
    }

    let position = state
        .team_position(team_id)
        .ok_or_else(|| GameError::TeamNotFound {
            team_id: team_id.to_string(),
        })?;

    let text = text.trim();
    if text.is_empty() {
        debug!("Ignoring blank answer from team {}", team_id);
        return Ok(AnswerOutcome::Ignored);
    }

    let team = &state.teams[position];
    let answer = Answer {
        team_id: team.id.clone(),
        team_name: team.name.clone(),
        answer: text.to_string(),
        is_true_definition: false,
    };

    // Resubmission keeps the original slot
    match state
        .answers
        .iter_mut()
        .find(|existing| existing.team_id == answer.team_id)
    {
        Some(existing) => *existing = answer,
        None => state.answers.push(answer),
    }

    let next_team_index = turn::advance_after(state, position);

    if turn::is_last_in_turn_order(state, position) {
        Ok(AnswerOutcome::WritingComplete)
    } else {
        Ok(AnswerOutcome::Recorded { next_team_index })
    }
}

/// Teams in turn order that have not written an answer yet this round
pub fn missing_answers(state: &RoundState) -> Vec<&str> {
    state
        .teams
        .iter()
        .filter(|team| state.answer_for(&team.id).is_none())
        .map(|team| team.id.as_str())
        .collect()
}
