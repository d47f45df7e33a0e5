//! Data structures for the bracket: teams, matches, rounds, tournament state.

mod game;
mod team;
mod tournament;

pub(crate) use tournament::MatchRef;

pub use game::{Match, MatchId, MatchStatus, Side, Slot};
pub use team::{Team, TeamId};
pub use tournament::{BracketError, Round, TournamentState, THIRD_PLACE_MATCH_ID};
