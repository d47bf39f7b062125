//! Winner propagator: where the winner of a match plays next.

use crate::logic::resolve::ResolvedMatch;
use crate::models::{GameMatch, MatchId, MatchSpec, Slot, TeamId, TournamentError};
use serde::Serialize;

/// A winner moving into a slot of the next-round match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Advancement {
    pub match_id: MatchId,
    pub round: u32,
    pub match_order: u32,
    pub slot: Slot,
    pub team_id: TeamId,
}

/// Position fed by a match: next round, half the order; even orders fill team1, odd team2.
pub fn next_position(spec: MatchSpec) -> (MatchSpec, Slot) {
    let next = MatchSpec {
        round: spec.round + 1,
        match_order: spec.match_order / 2,
    };
    let slot = if spec.match_order % 2 == 0 { Slot::Team1 } else { Slot::Team2 };
    (next, slot)
}

/// Find the downstream slot for the winner of `resolved` within `bracket`.
///
/// Returns `None` when the match has no winner or was the final. The target slot must be
/// empty: an occupied slot (even by the same team, i.e. a repeated propagation) is a
/// `BracketIntegrity` error and is never overwritten. So is a winner already sitting in
/// the target's other slot, which would pit the team against itself.
pub fn next_slot(
    resolved: &ResolvedMatch,
    bracket: &[GameMatch],
) -> Result<Option<Advancement>, TournamentError> {
    let game = &resolved.game;
    let Some(team_id) = game.winner_id else {
        return Ok(None);
    };
    let (next, slot) = next_position(game.spec());
    let Some(target) = bracket
        .iter()
        .find(|m| m.tournament_id == game.tournament_id && m.spec() == next)
    else {
        return Ok(None);
    };
    if target.team(slot).is_some() {
        return Err(TournamentError::BracketIntegrity {
            match_id: target.id,
            slot,
        });
    }
    if target.team(slot.other()) == Some(team_id) {
        return Err(TournamentError::BracketIntegrity {
            match_id: target.id,
            slot: slot.other(),
        });
    }
    Ok(Some(Advancement {
        match_id: target.id,
        round: next.round,
        match_order: next.match_order,
        slot,
        team_id,
    }))
}
