//! Bracket match, match slot, and the empty MatchSpec emitted by the bracket builder.

use crate::models::team::{Team, TeamId};
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match.
pub type MatchId = u64;

/// One of the two team positions of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Team1,
    Team2,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::Team1 => Slot::Team2,
            Slot::Team2 => Slot::Team1,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Team1 => write!(f, "team1"),
            Slot::Team2 => write!(f, "team2"),
        }
    }
}

/// Tree position of a match before it is stored: round (1 = earliest) and
/// zero-based order within the round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct MatchSpec {
    pub round: u32,
    pub match_order: u32,
}

impl MatchSpec {
    /// Materialize an empty match at this position.
    pub fn into_match(self, id: MatchId, tournament_id: TournamentId) -> GameMatch {
        GameMatch {
            id,
            tournament_id,
            round: self.round,
            match_order: self.match_order,
            team1_id: None,
            team2_id: None,
            score1: 0,
            score2: 0,
            winner_id: None,
        }
    }
}

/// A single bracket match between two teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: u32,
    pub match_order: u32,
    /// None until filled by the organizer or by propagation.
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub score1: u32,
    pub score2: u32,
    /// Always one of `team1_id` / `team2_id` once set.
    pub winner_id: Option<TeamId>,
}

impl GameMatch {
    pub fn spec(&self) -> MatchSpec {
        MatchSpec {
            round: self.round,
            match_order: self.match_order,
        }
    }

    pub fn team(&self, slot: Slot) -> Option<TeamId> {
        match slot {
            Slot::Team1 => self.team1_id,
            Slot::Team2 => self.team2_id,
        }
    }

    pub fn set_team(&mut self, slot: Slot, team_id: Option<TeamId>) {
        match slot {
            Slot::Team1 => self.team1_id = team_id,
            Slot::Team2 => self.team2_id = team_id,
        }
    }

    /// Both team slots are filled.
    pub fn is_ready(&self) -> bool {
        self.team1_id.is_some() && self.team2_id.is_some()
    }

    /// Anything has happened on this match: both teams known, a point scored, or a winner.
    pub fn has_activity(&self) -> bool {
        self.is_ready() || self.score1 > 0 || self.score2 > 0 || self.winner_id.is_some()
    }
}

/// Match with its teams resolved (for API responses).
#[derive(Clone, Debug, Serialize)]
pub struct MatchWithTeams {
    #[serde(flatten)]
    pub game: GameMatch,
    pub team1: Option<Team>,
    pub team2: Option<Team>,
    pub winner: Option<Team>,
}
