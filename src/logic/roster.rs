//! Roster rules: player names and team formation.

use crate::models::{Player, PlayerId, Team, TournamentError};

/// Trimmed, non-empty name.
pub fn normalize_name(name: &str) -> Result<String, TournamentError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Validate a new player's name against the non-deleted players (case-insensitive).
pub fn check_player_name<'a>(
    players: impl IntoIterator<Item = &'a Player>,
    name: &str,
) -> Result<String, TournamentError> {
    let name = normalize_name(name)?;
    let is_duplicate = players
        .into_iter()
        .any(|p| !p.deleted && p.name.eq_ignore_ascii_case(&name));
    if is_duplicate {
        return Err(TournamentError::DuplicatePlayerName);
    }
    Ok(name)
}

/// A player can join a new team when not deleted and not in any non-deleted team.
pub fn is_player_available<'a>(player: &Player, teams: impl IntoIterator<Item = &'a Team>) -> bool {
    !player.deleted
        && !teams
            .into_iter()
            .any(|t| !t.deleted && t.has_player(player.id))
}

/// Check that `player1_id` and `player2_id` can form a new team.
pub fn check_new_team(
    players: &[Player],
    teams: &[Team],
    player1_id: PlayerId,
    player2_id: PlayerId,
) -> Result<(), TournamentError> {
    if player1_id == player2_id {
        return Err(TournamentError::SamePlayerTwice);
    }
    for id in [player1_id, player2_id] {
        let player = players
            .iter()
            .find(|p| p.id == id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        if !is_player_available(player, teams) {
            return Err(TournamentError::PlayerUnavailable(id));
        }
    }
    Ok(())
}
