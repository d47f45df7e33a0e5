//! Undoing a decision while nothing downstream depends on it yet.

use crate::logic::third_place;
use crate::models::{BracketError, TournamentState, THIRD_PLACE_MATCH_ID};

/// Clear the winner of `match_id` and pull it back out of the downstream match.
///
/// Refused with `RevertBlocked` if the downstream match (or, for a semifinal,
/// the third-place match) already has a winner. The current round is never
/// rolled back; reverting the final reopens the tournament.
pub fn revert(state: &TournamentState, match_id: &str) -> Result<TournamentState, BracketError> {
    if match_id == THIRD_PLACE_MATCH_ID {
        return third_place::revert(state);
    }

    let at = state
        .locate(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let current = state.match_at(at);
    if current.winner.is_none() {
        return Err(BracketError::NotDecided(match_id.to_string()));
    }

    let downstream = match (&current.next_match_id, current.next_slot) {
        (Some(next_id), Some(slot)) => {
            let target = state
                .locate(next_id)
                .ok_or_else(|| BracketError::MatchNotFound(next_id.clone()))?;
            if state.match_at(target).winner.is_some() {
                return Err(BracketError::RevertBlocked(match_id.to_string()));
            }
            Some((target, slot))
        }
        _ => None,
    };
    let is_semi_final = state.is_semi_final(match_id);
    if is_semi_final && third_place::is_decided(state) {
        return Err(BracketError::RevertBlocked(match_id.to_string()));
    }

    let mut next = state.clone();
    next.match_mut(at).winner = None;
    if let Some((target, slot)) = downstream {
        next.match_mut(target).set_team(slot, None);
    }
    if match_id == next.final_match_id {
        next.is_complete = false;
        next.champion = None;
    }
    if is_semi_final {
        next.third_place = third_place::resolve(&next);
    }
    log::debug!("Reverted result of {}", match_id);
    Ok(next)
}
