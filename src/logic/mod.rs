//! Bracket logic: setup, building, advancing, reverting, third place.

mod advancement;
mod builder;
mod revert;
mod setup;
mod third_place;

pub use advancement::{apply, apply_decision, get_champion, is_round_complete, Decision};
pub use builder::{build, SUPPORTED_TEAM_COUNTS};
pub use revert::revert;
pub use setup::{shuffle_teams, teams_from_csv, teams_from_names};
pub use third_place::{get_third_place_match, resolve as resolve_third_place};
