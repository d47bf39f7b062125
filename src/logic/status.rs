//! Tournament status machine: draft -> in_progress -> completed, never backwards.

use crate::models::{GameMatch, TournamentStatus};

/// The final: highest round, order 0.
pub fn final_match(matches: &[GameMatch]) -> Option<&GameMatch> {
    let last_round = matches.iter().map(|m| m.round).max()?;
    matches
        .iter()
        .find(|m| m.round == last_round && m.match_order == 0)
}

/// Status implied by a snapshot of a tournament's matches, never lower than `current`.
pub fn derive_status(current: TournamentStatus, matches: &[GameMatch]) -> TournamentStatus {
    if current == TournamentStatus::Completed {
        return current;
    }
    let derived = if final_match(matches).is_some_and(|m| m.winner_id.is_some()) {
        TournamentStatus::Completed
    } else if matches.iter().any(GameMatch::has_activity) {
        TournamentStatus::InProgress
    } else {
        TournamentStatus::Draft
    };
    current.max(derived)
}
