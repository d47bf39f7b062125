//! Bracket engine: construction, match resolution, winner propagation, status, roster rules.
//!
//! Everything here is a pure function over values handed in by the caller.

mod bracket;
mod propagate;
mod resolve;
mod roster;
mod status;

pub use bracket::{build_bracket, is_valid_bracket_size, round_count};
pub use propagate::{next_position, next_slot, Advancement};
pub use resolve::{decide_winner, resolve_match, MatchUpdate, ResolvedMatch, SlotUpdate};
pub use roster::{check_new_team, check_player_name, is_player_available, normalize_name};
pub use status::{derive_status, final_match};
