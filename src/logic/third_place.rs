//! Third-place match between the two semifinal losers.
//!
//! The match lives outside `rounds` and is rebuilt from the semifinals after
//! every semifinal change rather than patched.

use crate::logic::advancement::pick_winner;
use crate::models::{BracketError, Match, Side, Slot, TournamentState, THIRD_PLACE_MATCH_ID};

/// Derive the third-place match from the current semifinal results.
///
/// `None` until at least one semifinal is decided. The left loser takes slot
/// `team_a`, the right loser `team_b`. A winner recorded on the previous
/// third-place match is kept only while both of its teams are unchanged.
pub fn resolve(state: &TournamentState) -> Option<Match> {
    let [left, right] = &state.semi_final_ids;
    let left = state.find_match(left)?;
    let right = state.find_match(right)?;
    if left.winner.is_none() && right.winner.is_none() {
        return None;
    }

    // Placed after both semifinals so (round_index, position) stays unique.
    let position = left.position.max(right.position) + 1;
    let mut m = Match::new(THIRD_PLACE_MATCH_ID, left.round_index, position, Side::Center);
    m.set_team(Slot::A, left.loser().cloned());
    m.set_team(Slot::B, right.loser().cloned());
    if let Some(previous) = &state.third_place {
        let unchanged = m.has_both_teams()
            && previous.team_a == m.team_a
            && previous.team_b == m.team_b;
        if unchanged {
            m.winner = previous.winner.clone();
        }
    }
    Some(m)
}

/// The third-place match, if any semifinal has been decided.
pub fn get_third_place_match(state: &TournamentState) -> Option<&Match> {
    state.third_place.as_ref()
}

pub(crate) fn is_decided(state: &TournamentState) -> bool {
    state
        .third_place
        .as_ref()
        .is_some_and(|m| m.winner.is_some())
}

pub(crate) fn decide(
    state: &TournamentState,
    winner_team_id: &str,
) -> Result<TournamentState, BracketError> {
    let current = state
        .third_place
        .as_ref()
        .ok_or_else(|| BracketError::IncompleteMatch(THIRD_PLACE_MATCH_ID.to_string()))?;
    let winner = pick_winner(current, winner_team_id)?;
    log::info!("{} takes third place", winner.name);

    let mut next = state.clone();
    if let Some(m) = next.third_place.as_mut() {
        m.winner = Some(winner);
    }
    Ok(next)
}

pub(crate) fn revert(state: &TournamentState) -> Result<TournamentState, BracketError> {
    if !is_decided(state) {
        return Err(BracketError::NotDecided(THIRD_PLACE_MATCH_ID.to_string()));
    }
    let mut next = state.clone();
    if let Some(m) = next.third_place.as_mut() {
        m.winner = None;
    }
    log::debug!("Reverted third-place result");
    Ok(next)
}
