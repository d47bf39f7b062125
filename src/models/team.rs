//! Two-player Team.

use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store.
pub type TeamId = u64;

/// A team of exactly two distinct players.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(id: TeamId, name: impl Into<String>, player1_id: PlayerId, player2_id: PlayerId) -> Self {
        Self {
            id,
            name: name.into(),
            player1_id,
            player2_id,
            deleted: false,
            created_at: Utc::now(),
        }
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.player1_id == player_id || self.player2_id == player_id
    }

    /// Mark the team as deleted; its players become available again.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }
}

/// Team with both players resolved (for API responses).
#[derive(Clone, Debug, Serialize)]
pub struct TeamWithPlayers {
    #[serde(flatten)]
    pub team: Team,
    pub player1: Option<Player>,
    pub player2: Option<Player>,
}
