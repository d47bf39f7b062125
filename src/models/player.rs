//! Player data structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the record store (positive, never reused).
pub type PlayerId = u64;

/// A registered player. Deleting only marks the player unavailable so that
/// historical teams keep resolving.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new, non-deleted player.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            deleted: false,
            created_at: Utc::now(),
        }
    }

    /// Mark the player as deleted.
    pub fn soft_delete(&mut self) {
        self.deleted = true;
    }
}
