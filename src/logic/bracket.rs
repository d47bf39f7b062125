//! Bracket builder: every match slot of a single-elimination tree, created up front.

use crate::models::{MatchSpec, TournamentError};

/// Power of two, at least 2.
pub fn is_valid_bracket_size(team_count: u32) -> bool {
    team_count >= 2 && team_count.is_power_of_two()
}

/// Number of rounds for a valid bracket size (log2 of the team count).
pub fn round_count(team_count: u32) -> u32 {
    team_count.trailing_zeros()
}

/// Generate the empty match tree for `team_count` teams.
///
/// Round 1 holds `team_count / 2` matches and each later round half as many, down to
/// the single final. Output is ordered by `(round, match_order)`; the winner of round `r`
/// match `i` feeds round `r + 1` match `i / 2`.
pub fn build_bracket(team_count: u32) -> Result<Vec<MatchSpec>, TournamentError> {
    if !is_valid_bracket_size(team_count) {
        return Err(TournamentError::InvalidBracketSize(team_count));
    }

    let mut specs = Vec::with_capacity(team_count as usize - 1);
    let mut round = 1;
    let mut matches_in_round = team_count / 2;
    while matches_in_round >= 1 {
        specs.extend((0..matches_in_round).map(|match_order| MatchSpec { round, match_order }));
        matches_in_round /= 2;
        round += 1;
    }
    Ok(specs)
}
