use game_types::RoundState;

/// Moves the turn to the next team in fixed order, wrapping after the last one.
pub fn advance(state: &mut RoundState) -> usize {
    advance_after(state, state.current_team_index)
}

/// Hands the turn to the team following `position`.
/// Equivalent to [`advance`] when `position` is the current team.
pub fn advance_after(state: &mut RoundState, position: usize) -> usize {
    let team_count = state.teams.len();
    if team_count == 0 {
        state.current_team_index = 0;
        return 0;
    }

    state.current_team_index = (position + 1) % team_count;
    state.current_team_index
}

/// Used at every phase transition (writing start, voting start).
pub fn reset_turn(state: &mut RoundState) {
    state.current_team_index = 0;
}

pub fn is_last_in_turn_order(state: &RoundState, position: usize) -> bool {
    position + 1 == state.teams.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::{GamePhase, Team};

    fn state_with_teams(count: usize) -> RoundState {
        RoundState {
            teams: (0..count)
                .map(|i| Team {
                    id: format!("team-{}", i),
                    name: format!("Team {}", i),
                    score: 0,
                })
                .collect(),
            current_round: 1,
            current_word: "word".to_string(),
            current_word_definition: "definition".to_string(),
            current_team_index: 0,
            answers: Vec::new(),
            votes: Vec::new(),
            game_phase: GamePhase::Writing,
            true_definition_index: None,
        }
    }

    #[test]
    fn test_advance_cycles_through_teams() {
        let mut state = state_with_teams(3);
        assert_eq!(advance(&mut state), 1);
        assert_eq!(advance(&mut state), 2);
        assert_eq!(advance(&mut state), 0);
        assert_eq!(state.current_team_index, 0);
    }

    #[test]
    fn test_advance_after_other_position() {
        let mut state = state_with_teams(4);
        assert_eq!(advance_after(&mut state, 2), 3);
        assert_eq!(advance_after(&mut state, 3), 0);
    }

    #[test]
    fn test_last_in_turn_order() {
        let state = state_with_teams(2);
        assert!(!is_last_in_turn_order(&state, 0));
        assert!(is_last_in_turn_order(&state, 1));
    }

    #[test]
    fn test_reset_turn() {
        let mut state = state_with_teams(3);
        state.current_team_index = 2;
        reset_turn(&mut state);
        assert_eq!(state.current_team_index, 0);
    }
}
