//! Tournament, TournamentStatus, and TournamentError.

use crate::models::game::{MatchId, Slot};
use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Team count is not a power of two >= 2 (or exceeds the configured maximum).
    #[error("Team count {0} is not a supported bracket size (power of two, at least 2)")]
    InvalidBracketSize(u32),
    /// The same team would occupy both slots of a match.
    #[error("Team {0} cannot play against itself")]
    InvalidTeamAssignment(TeamId),
    /// The match has a winner; its team slots can no longer change.
    #[error("Match {0} is already decided; its teams cannot change")]
    MatchDecided(MatchId),
    #[error("Name must not be empty")]
    EmptyName,
    /// Names are unique among non-deleted players (case-insensitive).
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    #[error("A team needs two different players")]
    SamePlayerTwice,
    /// Player is deleted or already plays in another team.
    #[error("Player {0} is not available for a new team")]
    PlayerUnavailable(PlayerId),
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("Team {0} not found")]
    TeamNotFound(TeamId),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),
    /// Propagation conflicts with the downstream match: the slot is already filled, or
    /// the winner already sits in the other slot.
    #[error("Bracket integrity violated at {slot} of match {match_id}")]
    BracketIntegrity { match_id: MatchId, slot: Slot },
}

/// Broad category of a [`TournamentError`], used to pick a response status.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Validation,
    NotFound,
    Integrity,
}

impl TournamentError {
    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            TournamentError::InvalidBracketSize(_) => "invalid_bracket_size",
            TournamentError::InvalidTeamAssignment(_) => "invalid_team_assignment",
            TournamentError::MatchDecided(_) => "match_decided",
            TournamentError::EmptyName => "empty_name",
            TournamentError::DuplicatePlayerName => "duplicate_player_name",
            TournamentError::SamePlayerTwice => "same_player_twice",
            TournamentError::PlayerUnavailable(_) => "player_unavailable",
            TournamentError::PlayerNotFound(_) => "player_not_found",
            TournamentError::TeamNotFound(_) => "team_not_found",
            TournamentError::MatchNotFound(_) => "match_not_found",
            TournamentError::TournamentNotFound(_) => "tournament_not_found",
            TournamentError::BracketIntegrity { .. } => "bracket_integrity",
        }
    }

    pub fn class(&self) -> ErrorClass {
        use TournamentError::*;
        match self {
            PlayerNotFound(_) | TeamNotFound(_) | MatchNotFound(_) | TournamentNotFound(_) => {
                ErrorClass::NotFound
            }
            BracketIntegrity { .. } => ErrorClass::Integrity,
            _ => ErrorClass::Validation,
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = u64;

/// Lifecycle of a tournament. Ordered: a status never moves to a smaller one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Bracket created, nothing played yet.
    #[default]
    Draft,
    /// At least one match shows activity.
    InProgress,
    /// The final has a winner.
    Completed,
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Draft => write!(f, "draft"),
            TournamentStatus::InProgress => write!(f, "in_progress"),
            TournamentStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Tournament record. Its matches are stored separately, keyed by `id`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub team_count: u32,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft.
    pub fn new(id: TournamentId, name: impl Into<String>, team_count: u32) -> Self {
        Self {
            id,
            name: name.into(),
            team_count,
            status: TournamentStatus::Draft,
            created_at: Utc::now(),
        }
    }
}
