use game_types::{
    AnswerTally, RoundScores, RoundState, Team, TeamStanding, TRUE_DEFINITION_TEAM_ID,
};
use tracing::warn;

/// Which scoring rule a single vote triggered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteAward {
    /// The voter found the true definition
    Guesser { team_id: String },
    /// The voter was fooled; the author of the chosen answer earns the point
    Bluff { author_id: String },
}

impl VoteAward {
    pub fn recipient(&self) -> &str {
        match self {
            VoteAward::Guesser { team_id } => team_id,
            VoteAward::Bluff { author_id } => author_id,
        }
    }
}

pub struct ScoringEngine;

impl ScoringEngine {
    /// Position of the true definition in the shuffled answers.
    /// The stored index wins; scanning for the flag only recovers snapshots
    /// that lost it.
    pub fn resolve_true_definition_index(state: &RoundState) -> Option<usize> {
        state.true_definition_index.or_else(|| {
            state
                .answers
                .iter()
                .position(|answer| answer.is_true())
        })
    }

    /// Classifies one vote. `None` only for a vote pointing outside the
    /// answer list, which the vote collector never stores.
    pub fn award_for_vote(
        state: &RoundState,
        true_index: Option<usize>,
        voter_id: &str,
        answer_index: usize,
    ) -> Option<VoteAward> {
        let answer = state.answers.get(answer_index)?;

        if Some(answer_index) == true_index || answer.is_true() {
            Some(VoteAward::Guesser {
                team_id: voter_id.to_string(),
            })
        } else {
            Some(VoteAward::Bluff {
                author_id: answer.team_id.clone(),
            })
        }
    }

    /// Points earned by each team this round. Pure: calling it again on the
    /// same state yields the same map.
    pub fn compute_round_scores(state: &RoundState) -> RoundScores {
        let mut scores: RoundScores = state
            .teams
            .iter()
            .map(|team| (team.id.clone(), 0))
            .collect();

        let true_index = Self::resolve_true_definition_index(state);

        for vote in &state.votes {
            match Self::award_for_vote(state, true_index, &vote.team_id, vote.answer_index) {
                Some(award) => {
                    let recipient = award.recipient();
                    if recipient == TRUE_DEFINITION_TEAM_ID {
                        continue;
                    }
                    *scores.entry(recipient.to_string()).or_insert(0) += 1;
                }
                None => {
                    warn!(
                        "Skipping vote from {} with index {} outside {} answers",
                        vote.team_id,
                        vote.answer_index,
                        state.answers.len()
                    );
                }
            }
        }

        scores
    }

    /// Folds a round's points into the cumulative team scores
    pub fn apply_round_scores(teams: &mut [Team], round_scores: &RoundScores) {
        for team in teams {
            if let Some(points) = round_scores.get(&team.id) {
                team.score = team.score.saturating_add(*points);
            }
        }
    }

    /// Per-team round points and the totals they would produce, in team order
    pub fn standings(state: &RoundState, round_scores: &RoundScores) -> Vec<TeamStanding> {
        state
            .teams
            .iter()
            .map(|team| {
                let round_points = round_scores.get(&team.id).copied().unwrap_or(0);
                TeamStanding {
                    team_id: team.id.clone(),
                    team_name: team.name.clone(),
                    round_points,
                    total_score: team.score.saturating_add(round_points),
                }
            })
            .collect()
    }

    /// Names of the teams that voted for each shuffled answer
    pub fn voters_by_answer(state: &RoundState) -> Vec<Vec<String>> {
        let mut voters = vec![Vec::new(); state.answers.len()];
        for vote in &state.votes {
            if let Some(names) = voters.get_mut(vote.answer_index) {
                names.push(vote.team_name.clone());
            }
        }
        voters
    }

    /// The reveal view for the results screen
    pub fn round_summary(state: &RoundState) -> game_types::RoundSummary {
        let round_scores = Self::compute_round_scores(state);
        let true_definition_index = Self::resolve_true_definition_index(state);
        let voters = Self::voters_by_answer(state);

        let answers = state
            .answers
            .iter()
            .zip(voters)
            .enumerate()
            .map(|(index, (answer, voters))| AnswerTally {
                index,
                answer: answer.answer.clone(),
                author_id: answer.team_id.clone(),
                author_name: answer.team_name.clone(),
                is_true_definition: Some(index) == true_definition_index || answer.is_true(),
                voters,
            })
            .collect();

        game_types::RoundSummary {
            round: state.current_round,
            word: state.current_word.clone(),
            definition: state.current_word_definition.clone(),
            true_definition_index,
            answers,
            standings: Self::standings(state, &round_scores),
        }
    }

    /// Cumulative standings, highest score first; ties keep turn order
    pub fn leaderboard(teams: &[Team]) -> Vec<TeamStanding> {
        let mut standings: Vec<TeamStanding> = teams
            .iter()
            .map(|team| TeamStanding {
                team_id: team.id.clone(),
                team_name: team.name.clone(),
                round_points: 0,
                total_score: team.score,
            })
            .collect();

        standings.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_types::{Answer, GamePhase, Vote};

    fn team(id: &str, score: u32) -> Team {
        Team {
            id: id.to_string(),
            name: id.to_uppercase(),
            score,
        }
    }

    fn answer(team_id: &str, text: &str) -> Answer {
        Answer {
            team_id: team_id.to_string(),
            team_name: team_id.to_uppercase(),
            answer: text.to_string(),
            is_true_definition: false,
        }
    }

    fn vote(team_id: &str, answer_index: usize) -> Vote {
        Vote {
            team_id: team_id.to_string(),
            team_name: team_id.to_uppercase(),
            answer_index,
        }
    }

    /// answers: [b's fake, TRUE, a's fake, c's fake]
    fn results_state(votes: Vec<Vote>) -> RoundState {
        RoundState {
            teams: vec![team("a", 2), team("b", 0), team("c", 5)],
            current_round: 3,
            current_word: "Zyx".to_string(),
            current_word_definition: "definition D".to_string(),
            current_team_index: 0,
            answers: vec![
                answer("b", "fake b"),
                Answer::true_definition("definition D"),
                answer("a", "fake a"),
                answer("c", "fake c"),
            ],
            votes,
            game_phase: GamePhase::Results,
            true_definition_index: Some(1),
        }
    }

    #[test]
    fn test_guesser_reward() {
        let state = results_state(vec![vote("a", 1), vote("b", 1), vote("c", 1)]);
        let scores = ScoringEngine::compute_round_scores(&state);
        assert_eq!(scores["a"], 1);
        assert_eq!(scores["b"], 1);
        assert_eq!(scores["c"], 1);
    }

    #[test]
    fn test_bluff_reward_goes_to_author() {
        // a and c both fooled by b
        let state = results_state(vec![vote("a", 0), vote("b", 1), vote("c", 0)]);
        let scores = ScoringEngine::compute_round_scores(&state);
        assert_eq!(scores["a"], 0);
        assert_eq!(scores["b"], 3);
        assert_eq!(scores["c"], 0);
    }

    #[test]
    fn test_no_votes_scores_zero() {
        let state = results_state(Vec::new());
        let scores = ScoringEngine::compute_round_scores(&state);
        assert_eq!(scores.len(), 3);
        assert!(scores.values().all(|points| *points == 0));
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let state = results_state(vec![vote("a", 3), vote("b", 1), vote("c", 2)]);
        let first = ScoringEngine::compute_round_scores(&state);
        let second = ScoringEngine::compute_round_scores(&state);
        assert_eq!(first, second);
    }

    #[test]
    fn test_each_vote_awards_exactly_one_point() {
        let state = results_state(vec![vote("a", 3), vote("b", 1), vote("c", 2)]);
        let scores = ScoringEngine::compute_round_scores(&state);
        let total: u32 = scores.values().sum();
        assert_eq!(total, state.votes.len() as u32);
    }

    #[test]
    fn test_fallback_search_when_index_missing() {
        let mut state = results_state(vec![vote("a", 1)]);
        state.true_definition_index = None;

        assert_eq!(ScoringEngine::resolve_true_definition_index(&state), Some(1));
        assert_eq!(ScoringEngine::compute_round_scores(&state)["a"], 1);
    }

    #[test]
    fn test_stored_index_preferred() {
        // flag sits at slot 1, stored index says 2
        let mut state = results_state(vec![vote("c", 2)]);
        state.true_definition_index = Some(2);

        assert_eq!(ScoringEngine::resolve_true_definition_index(&state), Some(2));
        let scores = ScoringEngine::compute_round_scores(&state);
        assert_eq!(scores["c"], 1);
        assert_eq!(scores["a"], 0);
    }

    #[test]
    fn test_huge_scores_saturate() {
        let mut state = results_state(vec![vote("a", 0), vote("b", 1), vote("c", 0)]);
        state.teams[1].score = u32::MAX;
        assert!(state.validate().is_ok());

        let summary = ScoringEngine::round_summary(&state);
        let b = summary.standings.iter().find(|s| s.team_id == "b").unwrap();
        assert_eq!(b.round_points, 3);
        assert_eq!(b.total_score, u32::MAX);

        let scores = ScoringEngine::compute_round_scores(&state);
        let mut teams = state.teams.clone();
        ScoringEngine::apply_round_scores(&mut teams, &scores);
        assert_eq!(teams[0].score, 2);
        assert_eq!(teams[1].score, u32::MAX);
        assert_eq!(teams[2].score, 5);
    }

    #[test]
    fn test_apply_round_scores() {
        let state = results_state(vec![vote("a", 0), vote("b", 1), vote("c", 2)]);
        let scores = ScoringEngine::compute_round_scores(&state);
        let mut teams = state.teams.clone();
        ScoringEngine::apply_round_scores(&mut teams, &scores);

        // a fooled by b, b guessed, c fooled by a
        assert_eq!(teams[0].score, 3);
        assert_eq!(teams[1].score, 2);
        assert_eq!(teams[2].score, 5);
    }

    #[test]
    fn test_round_summary() {
        let state = results_state(vec![vote("a", 0), vote("b", 1), vote("c", 0)]);
        let summary = ScoringEngine::round_summary(&state);

        assert_eq!(summary.round, 3);
        assert_eq!(summary.true_definition_index, Some(1));
        assert_eq!(summary.answers.len(), 4);
        assert_eq!(summary.answers[0].voters, vec!["A".to_string(), "C".to_string()]);
        assert!(summary.answers[1].is_true_definition);
        assert!(summary.answers[3].voters.is_empty());

        let b = summary.standings.iter().find(|s| s.team_id == "b").unwrap();
        assert_eq!(b.round_points, 3);
        assert_eq!(b.total_score, 3);

        assert_eq!(summary, ScoringEngine::round_summary(&state));
    }

    #[test]
    fn test_leaderboard_order() {
        let teams = vec![team("a", 2), team("b", 7), team("c", 2)];
        let board = ScoringEngine::leaderboard(&teams);
        let order: Vec<&str> = board.iter().map(|s| s.team_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }
}
