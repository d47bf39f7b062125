//! In-memory record store: players, teams, tournaments and matches keyed by
//! store-assigned positive ids.
//!
//! Each table has its own id sequence, starting at 1; ids are never reused. The store
//! only persists what it is told to. Callers serialize access (one `&mut` at a time),
//! and [`MemoryStore::apply_submission`] validates every target before writing anything.

use crate::logic::Advancement;
use crate::models::{
    GameMatch, MatchId, MatchSpec, Player, PlayerId, Team, TeamId, Tournament, TournamentError,
    TournamentId, TournamentStatus,
};
use std::collections::BTreeMap;

/// Writes produced by one match-result submission.
#[derive(Clone, Debug)]
pub struct Submission {
    /// The resolved match, written over the stored one with the same id.
    pub game: GameMatch,
    pub advancement: Option<Advancement>,
    pub status: Option<TournamentStatus>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    players: BTreeMap<PlayerId, Player>,
    teams: BTreeMap<TeamId, Team>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    matches: BTreeMap<MatchId, GameMatch>,
    last_player_id: PlayerId,
    last_team_id: TeamId,
    last_tournament_id: TournamentId,
    last_match_id: MatchId,
}

fn next_id(last: &mut u64) -> u64 {
    *last += 1;
    *last
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_player(&mut self, name: impl Into<String>) -> Player {
        let player = Player::new(next_id(&mut self.last_player_id), name);
        self.players.insert(player.id, player.clone());
        player
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    /// All players (deleted included), ordered by id.
    pub fn players(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }

    pub fn insert_team(&mut self, name: impl Into<String>, player1_id: PlayerId, player2_id: PlayerId) -> Team {
        let team = Team::new(next_id(&mut self.last_team_id), name, player1_id, player2_id);
        self.teams.insert(team.id, team.clone());
        team
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.get_mut(&id)
    }

    /// All teams (deleted included), ordered by id.
    pub fn teams(&self) -> Vec<Team> {
        self.teams.values().cloned().collect()
    }

    /// Create a tournament together with one empty match per spec.
    pub fn insert_tournament(&mut self, name: impl Into<String>, team_count: u32, specs: &[MatchSpec]) -> Tournament {
        let tournament = Tournament::new(next_id(&mut self.last_tournament_id), name, team_count);
        for spec in specs {
            let game = spec.into_match(next_id(&mut self.last_match_id), tournament.id);
            self.matches.insert(game.id, game);
        }
        self.tournaments.insert(tournament.id, tournament.clone());
        tournament
    }

    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// All tournaments, ordered by id.
    pub fn tournaments(&self) -> Vec<Tournament> {
        self.tournaments.values().cloned().collect()
    }

    pub fn game(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.get(&id)
    }

    /// Matches of one tournament, ordered by `(round, match_order)`.
    pub fn matches_of(&self, tournament_id: TournamentId) -> Vec<GameMatch> {
        let mut matches: Vec<GameMatch> = self
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.match_order));
        matches
    }

    /// Write a submission's match, downstream slot and status as one unit.
    pub fn apply_submission(&mut self, submission: Submission) -> Result<(), TournamentError> {
        let Submission {
            game,
            advancement,
            status,
        } = submission;

        // Stage every record first; the writes below are plain inserts that cannot fail.
        if !self.matches.contains_key(&game.id) {
            return Err(TournamentError::MatchNotFound(game.id));
        }
        let target = match &advancement {
            Some(adv) => {
                let mut target = self
                    .matches
                    .get(&adv.match_id)
                    .cloned()
                    .ok_or(TournamentError::MatchNotFound(adv.match_id))?;
                if target.team(adv.slot).is_some() {
                    return Err(TournamentError::BracketIntegrity {
                        match_id: adv.match_id,
                        slot: adv.slot,
                    });
                }
                if target.team(adv.slot.other()) == Some(adv.team_id) {
                    return Err(TournamentError::BracketIntegrity {
                        match_id: adv.match_id,
                        slot: adv.slot.other(),
                    });
                }
                target.set_team(adv.slot, Some(adv.team_id));
                Some(target)
            }
            None => None,
        };
        let mut tournament = self
            .tournaments
            .get(&game.tournament_id)
            .cloned()
            .ok_or(TournamentError::TournamentNotFound(game.tournament_id))?;
        if let Some(status) = status {
            tournament.status = status;
        }

        self.matches.insert(game.id, game);
        if let Some(target) = target {
            self.matches.insert(target.id, target);
        }
        self.tournaments.insert(tournament.id, tournament);
        Ok(())
    }
}
