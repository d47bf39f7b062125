//! Two-player team bracket organizer: library with models, bracket engine, store and API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    build_bracket, derive_status, next_slot, resolve_match, Advancement, MatchUpdate, ResolvedMatch,
    SlotUpdate,
};
pub use models::{
    ErrorClass, GameMatch, MatchId, MatchSpec, MatchWithTeams, Player, PlayerId, Slot, Team, TeamId,
    TeamWithPlayers, Tournament, TournamentError, TournamentId, TournamentStatus,
};
pub use store::MemoryStore;
