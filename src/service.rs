//! Request-level operations: validate, run the engine, write the results to the store.
//!
//! Every operation checks everything before its first write, so a failed request leaves
//! the store untouched.

use crate::logic::{
    build_bracket, check_new_team, check_player_name, derive_status, is_player_available,
    next_slot, normalize_name, resolve_match, MatchUpdate,
};
use crate::models::{
    GameMatch, MatchId, MatchWithTeams, Player, PlayerId, Team, TeamId, TeamWithPlayers,
    Tournament, TournamentError, TournamentId,
};
use crate::store::{MemoryStore, Submission};

/// Register a player (unique name among non-deleted players).
pub fn create_player(store: &mut MemoryStore, name: &str) -> Result<Player, TournamentError> {
    let name = check_player_name(&store.players(), name)?;
    let player = store.insert_player(name);
    log::info!("Registered player {} ({})", player.name, player.id);
    Ok(player)
}

/// Mark a player deleted. Repeating the call is harmless.
pub fn soft_delete_player(store: &mut MemoryStore, id: PlayerId) -> Result<Player, TournamentError> {
    let player = store
        .player_mut(id)
        .ok_or(TournamentError::PlayerNotFound(id))?;
    player.soft_delete();
    Ok(player.clone())
}

/// Players that may join a new team.
pub fn list_available_players(store: &MemoryStore) -> Vec<Player> {
    let teams = store.teams();
    store
        .players()
        .into_iter()
        .filter(|p| is_player_available(p, &teams))
        .collect()
}

/// Form a team from two distinct, available players.
pub fn create_team(
    store: &mut MemoryStore,
    name: &str,
    player1_id: PlayerId,
    player2_id: PlayerId,
) -> Result<Team, TournamentError> {
    let name = normalize_name(name)?;
    check_new_team(&store.players(), &store.teams(), player1_id, player2_id)?;
    let team = store.insert_team(name, player1_id, player2_id);
    log::info!("Formed team {} ({}) from players {} and {}", team.name, team.id, player1_id, player2_id);
    Ok(team)
}

/// Mark a team deleted, freeing its players.
pub fn soft_delete_team(store: &mut MemoryStore, id: TeamId) -> Result<Team, TournamentError> {
    let team = store.team_mut(id).ok_or(TournamentError::TeamNotFound(id))?;
    team.soft_delete();
    Ok(team.clone())
}

/// All teams with their players resolved.
pub fn list_teams(store: &MemoryStore) -> Vec<TeamWithPlayers> {
    store
        .teams()
        .into_iter()
        .map(|team| TeamWithPlayers {
            player1: store.player(team.player1_id).cloned(),
            player2: store.player(team.player2_id).cloned(),
            team,
        })
        .collect()
}

/// Create a tournament in Draft with its whole bracket.
///
/// `max_team_count` caps the bracket size on top of the power-of-two rule.
pub fn create_tournament(
    store: &mut MemoryStore,
    name: &str,
    team_count: u32,
    max_team_count: u32,
) -> Result<Tournament, TournamentError> {
    let name = normalize_name(name)?;
    if team_count > max_team_count {
        return Err(TournamentError::InvalidBracketSize(team_count));
    }
    let specs = build_bracket(team_count)?;
    let tournament = store.insert_tournament(name, team_count, &specs);
    log::info!(
        "Created tournament {} ({}) for {} teams with {} matches",
        tournament.name,
        tournament.id,
        team_count,
        specs.len()
    );
    Ok(tournament)
}

pub fn get_tournament(store: &MemoryStore, id: TournamentId) -> Result<Tournament, TournamentError> {
    store
        .tournament(id)
        .cloned()
        .ok_or(TournamentError::TournamentNotFound(id))
}

/// Matches of a tournament ordered by `(round, match_order)`, teams resolved.
pub fn list_matches(store: &MemoryStore, tournament_id: TournamentId) -> Result<Vec<MatchWithTeams>, TournamentError> {
    get_tournament(store, tournament_id)?;
    let team = |id: Option<TeamId>| id.and_then(|id| store.team(id)).cloned();
    Ok(store
        .matches_of(tournament_id)
        .into_iter()
        .map(|game| MatchWithTeams {
            team1: team(game.team1_id),
            team2: team(game.team2_id),
            winner: team(game.winner_id),
            game,
        })
        .collect())
}

/// Apply a result submission: resolve the match, move a new winner into the next round,
/// and recompute the tournament status. All three writes land together or not at all.
pub fn submit_match_result(
    store: &mut MemoryStore,
    match_id: MatchId,
    update: &MatchUpdate,
) -> Result<GameMatch, TournamentError> {
    let current = store
        .game(match_id)
        .cloned()
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let tournament = get_tournament(store, current.tournament_id)?;
    for team_id in update.assigned_teams() {
        if store.team(team_id).is_none() {
            return Err(TournamentError::TeamNotFound(team_id));
        }
    }

    let resolved = resolve_match(&current, update)?;
    let mut bracket = store.matches_of(tournament.id);
    let advancement = if resolved.decided {
        next_slot(&resolved, &bracket)?
    } else {
        None
    };

    // Snapshot of the bracket as it will look after this submission.
    for game in bracket.iter_mut() {
        if game.id == resolved.game.id {
            *game = resolved.game.clone();
        }
        if let Some(adv) = &advancement {
            if game.id == adv.match_id {
                game.set_team(adv.slot, Some(adv.team_id));
            }
        }
    }
    let status = derive_status(tournament.status, &bracket);

    store.apply_submission(Submission {
        game: resolved.game.clone(),
        advancement,
        status: (status != tournament.status).then_some(status),
    })?;

    if let Some(winner) = resolved.game.winner_id.filter(|_| resolved.decided) {
        match &advancement {
            Some(adv) => log::info!(
                "Match {} won by team {}; advances to round {} match {} as {}",
                match_id,
                winner,
                adv.round,
                adv.match_order,
                adv.slot
            ),
            None => log::info!("Final match {} won by team {}", match_id, winner),
        }
    } else if update.finalize && resolved.game.winner_id.is_none() {
        log::debug!("Match {} not decided (tied or missing a team)", match_id);
    }
    if status != tournament.status {
        log::info!(
            "Tournament {} status {} -> {}",
            tournament.id,
            tournament.status,
            status
        );
    }
    Ok(resolved.game)
}

const DEMO_PLAYERS: [&str; 8] = ["Alex", "Sam", "Jordan", "Taylor", "Casey", "Riley", "Morgan", "Quinn"];
const DEMO_TEAMS: [&str; 4] = ["The Alphas", "Beta Blasters", "Gamma Rays", "Delta Force"];

/// Seed a demo roster (8 players, 4 teams) when no player exists yet. Returns whether it seeded.
pub fn seed_demo_roster(store: &mut MemoryStore) -> Result<bool, TournamentError> {
    if !store.players().is_empty() {
        return Ok(false);
    }
    let mut ids = Vec::with_capacity(DEMO_PLAYERS.len());
    for name in DEMO_PLAYERS {
        ids.push(create_player(store, name)?.id);
    }
    for (name, pair) in DEMO_TEAMS.iter().zip(ids.chunks_exact(2)) {
        create_team(store, name, pair[0], pair[1])?;
    }
    log::info!("Seeded demo roster: {} players, {} teams", DEMO_PLAYERS.len(), DEMO_TEAMS.len());
    Ok(true)
}
