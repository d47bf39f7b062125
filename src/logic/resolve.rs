//! Match resolver: merge a partial result update into a match and decide its winner.

use crate::models::{GameMatch, TeamId, TournamentError};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;

/// Requested change to one team slot.
///
/// In JSON an absent key keeps the slot, an explicit `null` clears it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SlotUpdate {
    #[default]
    Keep,
    Clear,
    Set(TeamId),
}

impl SlotUpdate {
    fn apply(self, current: Option<TeamId>) -> Option<TeamId> {
        match self {
            SlotUpdate::Keep => current,
            SlotUpdate::Clear => None,
            SlotUpdate::Set(id) => Some(id),
        }
    }
}

// Only called when the key is present; a missing key falls back to `Default` (Keep).
fn present_slot<'de, D>(deserializer: D) -> Result<SlotUpdate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<TeamId>::deserialize(deserializer)? {
        Some(id) => SlotUpdate::Set(id),
        None => SlotUpdate::Clear,
    })
}

/// Fields a result submission may change. The winner is never set directly.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchUpdate {
    #[serde(default, deserialize_with = "present_slot")]
    pub team1_id: SlotUpdate,
    #[serde(default, deserialize_with = "present_slot")]
    pub team2_id: SlotUpdate,
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
    /// Try to decide a winner from the merged scores.
    #[serde(default)]
    pub finalize: bool,
}

impl MatchUpdate {
    pub fn teams(mut self, team1_id: TeamId, team2_id: TeamId) -> Self {
        self.team1_id = SlotUpdate::Set(team1_id);
        self.team2_id = SlotUpdate::Set(team2_id);
        self
    }

    pub fn scores(mut self, score1: u32, score2: u32) -> Self {
        self.score1 = Some(score1);
        self.score2 = Some(score2);
        self
    }

    pub fn finalize(mut self) -> Self {
        self.finalize = true;
        self
    }

    /// Team ids this update puts into the match.
    pub fn assigned_teams(&self) -> impl Iterator<Item = TeamId> + '_ {
        [self.team1_id, self.team2_id].into_iter().filter_map(|u| match u {
            SlotUpdate::Set(id) => Some(id),
            _ => None,
        })
    }
}

/// Merged match plus whether this call established its winner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedMatch {
    pub game: GameMatch,
    pub decided: bool,
}

/// Higher score wins; a tie or a missing team decides nothing.
pub fn decide_winner(game: &GameMatch) -> Option<TeamId> {
    let (team1, team2) = (game.team1_id?, game.team2_id?);
    match game.score1.cmp(&game.score2) {
        Ordering::Greater => Some(team1),
        Ordering::Less => Some(team2),
        Ordering::Equal => None,
    }
}

/// Merge `update` into `current` and, when finalizing, determine the winner.
///
/// A match that already has a winner keeps it together with both its teams: scores may
/// still be corrected, any slot change is rejected, and `decided` is false.
pub fn resolve_match(current: &GameMatch, update: &MatchUpdate) -> Result<ResolvedMatch, TournamentError> {
    let mut game = current.clone();
    game.team1_id = update.team1_id.apply(current.team1_id);
    game.team2_id = update.team2_id.apply(current.team2_id);
    if let Some(score1) = update.score1 {
        game.score1 = score1;
    }
    if let Some(score2) = update.score2 {
        game.score2 = score2;
    }

    if current.winner_id.is_some() {
        if game.team1_id != current.team1_id || game.team2_id != current.team2_id {
            return Err(TournamentError::MatchDecided(current.id));
        }
        return Ok(ResolvedMatch { game, decided: false });
    }

    if let (Some(team1), Some(team2)) = (game.team1_id, game.team2_id) {
        if team1 == team2 {
            return Err(TournamentError::InvalidTeamAssignment(team1));
        }
    }

    if update.finalize {
        game.winner_id = decide_winner(&game);
    }
    let decided = game.winner_id.is_some();
    Ok(ResolvedMatch { game, decided })
}
