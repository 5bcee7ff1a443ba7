use game_types::{Answer, GameError, GamePhase, RoundState, Vote};
use rand::Rng;
use tracing::{info, warn};

use crate::turn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recorded { next_team_index: usize },
    /// Every team has voted and the round moved to results
    VotingComplete,
}

/// Fisher–Yates shuffle: walks from the last index down to 1 and swaps each
/// slot with a uniformly drawn index in `[0, i]`.
pub fn shuffle_in_place<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Injects the true definition among the team answers, shuffles them for
/// blind voting and opens the voting phase. Returns the shuffled position of
/// the true definition.
///
/// Starting with missing answers is allowed: a warning is logged and voting
/// runs on whatever was written.
pub fn start_voting<R: Rng + ?Sized>(
    state: &mut RoundState,
    rng: &mut R,
) -> Result<usize, GameError> {
    if state.game_phase != GamePhase::Writing {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Writing,
            actual: state.game_phase,
        });
    }

    if state.answers.len() != state.teams.len() {
        warn!(
            "Starting vote with {} answers for {} teams",
            state.answers.len(),
            state.teams.len()
        );
    }

    let mut candidates = std::mem::take(&mut state.answers);
    candidates.push(Answer::true_definition(&state.current_word_definition));
    shuffle_in_place(&mut candidates, rng);

    // Exactly one true answer was pushed above
    let true_index = candidates
        .iter()
        .position(|answer| answer.is_true_definition)
        .unwrap_or(candidates.len() - 1);

    state.answers = candidates;
    state.true_definition_index = Some(true_index);
    turn::reset_turn(state);
    state.game_phase = GamePhase::Voting;

    info!(
        "Round {} voting started with {} answers",
        state.current_round,
        state.answers.len()
    );
    Ok(true_index)
}

/// Records (or replaces) a team's vote. The index must point into the
/// shuffled answer list; invalid indexes are rejected before anything changes.
pub fn submit_vote(
    state: &mut RoundState,
    team_id: &str,
    answer_index: usize,
) -> Result<VoteOutcome, GameError> {
    if state.game_phase != GamePhase::Voting {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Voting,
            actual: state.game_phase,
        });
    }

    let position = state
        .team_position(team_id)
        .ok_or_else(|| GameError::TeamNotFound {
            team_id: team_id.to_string(),
        })?;

    if answer_index >= state.answers.len() {
        return Err(GameError::AnswerIndexOutOfRange {
            index: answer_index,
            len: state.answers.len(),
        });
    }

    let team = &state.teams[position];
    let vote = Vote {
        team_id: team.id.clone(),
        team_name: team.name.clone(),
        answer_index,
    };

    match state
        .votes
        .iter_mut()
        .find(|existing| existing.team_id == vote.team_id)
    {
        Some(existing) => *existing = vote,
        None => state.votes.push(vote),
    }

    if state.votes.len() == state.teams.len() {
        state.game_phase = GamePhase::Results;
        info!("Round {} voting complete", state.current_round);
        return Ok(VoteOutcome::VotingComplete);
    }

    let next_team_index = turn::advance_after(state, position);
    Ok(VoteOutcome::Recorded { next_team_index })
}
