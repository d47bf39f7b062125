//! Data records for the bracket organizer: players, teams, tournaments, matches.

mod game;
mod player;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, MatchSpec, MatchWithTeams, Slot};
pub use player::{Player, PlayerId};
pub use team::{Team, TeamId, TeamWithPlayers};
pub use tournament::{ErrorClass, Tournament, TournamentError, TournamentId, TournamentStatus};
