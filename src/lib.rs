//! Single-elimination tournament bracket: library with models and bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    apply, apply_decision, build, get_champion, get_third_place_match, is_round_complete,
    resolve_third_place, revert, shuffle_teams, teams_from_csv, teams_from_names, Decision,
    SUPPORTED_TEAM_COUNTS,
};
pub use models::{
    BracketError, Match, MatchId, MatchStatus, Round, Side, Slot, Team, TeamId, TournamentState,
    THIRD_PLACE_MATCH_ID,
};
