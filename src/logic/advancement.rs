//! Applying decisions: set a winner, propagate it downstream, advance rounds, crown the champion.

use crate::logic::{revert, third_place};
use crate::models::{
    BracketError, Match, MatchRef, Round, Team, TeamId, TournamentState, THIRD_PLACE_MATCH_ID,
};
use serde::{Deserialize, Serialize};

/// A user action on one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Name the winner of a ready match.
    Decide { winner: TeamId },
    /// Undo a previously recorded winner.
    Revert,
}

/// Single entry point for user actions on a match.
pub fn apply(
    state: &TournamentState,
    match_id: &str,
    decision: &Decision,
) -> Result<TournamentState, BracketError> {
    match decision {
        Decision::Decide { winner } => apply_decision(state, match_id, winner),
        Decision::Revert => revert::revert(state, match_id),
    }
}

/// Record `winner_team_id` as the winner of `match_id` and return the resulting state.
///
/// The input state is never modified; on error the caller keeps using it as is.
pub fn apply_decision(
    state: &TournamentState,
    match_id: &str,
    winner_team_id: &str,
) -> Result<TournamentState, BracketError> {
    if match_id == THIRD_PLACE_MATCH_ID {
        return third_place::decide(state, winner_team_id);
    }

    let at = state
        .locate(match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let current = state.match_at(at);
    let winner = pick_winner(current, winner_team_id)?;

    let mut next = state.clone();
    next.match_mut(at).winner = Some(winner.clone());
    if let (Some(next_id), Some(slot)) = (&current.next_match_id, current.next_slot) {
        let target = next
            .locate(next_id)
            .ok_or_else(|| BracketError::MatchNotFound(next_id.clone()))?;
        next.match_mut(target).set_team(slot, Some(winner.clone()));
    }
    log::debug!("{} won {}", winner.name, match_id);

    settle_rounds(&mut next);
    if next.is_semi_final(match_id) {
        next.third_place = third_place::resolve(&next);
    }
    Ok(next)
}

/// Validate a decision against a match and return the winning team.
pub(crate) fn pick_winner(m: &Match, winner_team_id: &str) -> Result<Team, BracketError> {
    if m.winner.is_some() {
        return Err(BracketError::AlreadyDecided(m.id.clone()));
    }
    if !m.has_both_teams() {
        return Err(BracketError::IncompleteMatch(m.id.clone()));
    }
    m.team_by_id(winner_team_id)
        .cloned()
        .ok_or_else(|| BracketError::InvalidWinner {
            match_id: m.id.clone(),
            team_id: winner_team_id.to_string(),
        })
}

/// Advance `current_round_index` while the round it points to is finished, and
/// finish the tournament once the final round is.
///
/// A round holding a match that still waits for a team (its feeder was
/// reverted) is not finished, even if every ready match has been decided.
fn settle_rounds(state: &mut TournamentState) {
    let final_round = match state.locate(&state.final_match_id) {
        Some(MatchRef { round, .. }) => round,
        None => return,
    };
    while !state.is_complete {
        let round = &state.rounds[state.current_round_index];
        if !round.is_complete() || round.has_waiting_matches() {
            break;
        }
        if state.current_round_index == final_round {
            state.champion = state.final_match().and_then(|m| m.winner.clone());
            state.is_complete = state.champion.is_some();
            if let Some(champion) = &state.champion {
                log::info!("Tournament complete: {} is the champion", champion.name);
            }
            break;
        }
        state.current_round_index += 1;
        log::info!(
            "Round {} started: {}",
            state.current_round_index + 1,
            state.rounds[state.current_round_index].name
        );
    }
}

/// True if every match in `round` that has both teams has a winner.
pub fn is_round_complete(round: &Round) -> bool {
    round.is_complete()
}

/// The champion, once the final has been decided.
pub fn get_champion(state: &TournamentState) -> Option<&Team> {
    state.champion.as_ref()
}
