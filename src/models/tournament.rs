//! Round, TournamentState and BracketError.

use crate::models::game::{Match, MatchId, MatchStatus};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Id of the derived third-place match (not part of `rounds`).
pub const THIRD_PLACE_MATCH_ID: &str = "third-place";

/// Errors that can occur while building or advancing a bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Only 8, 16 or 20 teams are supported.
    InvalidTeamCount(usize),
    /// A team name is empty (after trimming).
    EmptyTeamName,
    /// Two teams share a name (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// Two teams share an id.
    DuplicateTeamId(TeamId),
    /// No match with this id exists.
    MatchNotFound(MatchId),
    /// The match does not have both teams yet.
    IncompleteMatch(MatchId),
    /// The named team is not playing in this match.
    InvalidWinner { match_id: MatchId, team_id: TeamId },
    /// The match already has a winner; revert it first.
    AlreadyDecided(MatchId),
    /// Nothing to revert: the match has no winner.
    NotDecided(MatchId),
    /// A downstream result already depends on this match.
    RevertBlocked(MatchId),
    /// The team list could not be read.
    Import(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidTeamCount(n) => {
                write!(f, "A bracket needs 8, 16 or 20 teams (got {})", n)
            }
            BracketError::EmptyTeamName => write!(f, "Team names must not be empty"),
            BracketError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            BracketError::DuplicateTeamId(id) => write!(f, "Duplicate team id {}", id),
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            BracketError::IncompleteMatch(id) => {
                write!(f, "Match {} is still waiting for its teams", id)
            }
            BracketError::InvalidWinner { match_id, team_id } => {
                write!(f, "Team {} is not playing in match {}", team_id, match_id)
            }
            BracketError::AlreadyDecided(id) => write!(f, "Match {} already has a winner", id),
            BracketError::NotDecided(id) => write!(f, "Match {} has no result to undo", id),
            BracketError::RevertBlocked(_) => {
                write!(f, "Cannot undo, downstream result already recorded")
            }
            BracketError::Import(msg) => write!(f, "Could not read team list: {}", msg),
        }
    }
}

impl std::error::Error for BracketError {}

/// One round of the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: usize,
    pub name: String,
    pub matches: Vec<Arc<Match>>,
}

impl Round {
    /// Every match that has both teams also has a winner.
    pub fn is_complete(&self) -> bool {
        self.matches
            .iter()
            .filter(|m| m.has_both_teams())
            .all(|m| m.winner.is_some())
    }

    /// Some match still waits for one or both of its teams.
    pub fn has_waiting_matches(&self) -> bool {
        self.matches
            .iter()
            .any(|m| matches!(m.status(), MatchStatus::Empty | MatchStatus::Partial))
    }
}

/// Location of a match inside `TournamentState::rounds`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MatchRef {
    pub round: usize,
    pub index: usize,
}

/// Full bracket state. Transitions return a new value; unchanged rounds and
/// matches are shared with the previous one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    pub rounds: Vec<Arc<Round>>,
    pub current_round_index: usize,
    pub is_complete: bool,
    pub champion: Option<Team>,
    /// The terminal match, fixed at build time.
    pub final_match_id: MatchId,
    /// Left and right semifinal, fixed at build time.
    pub semi_final_ids: [MatchId; 2],
    /// Consolation match between the semifinal losers, derived from the semifinals.
    pub third_place: Option<Match>,
}

impl TournamentState {
    /// Look up a bracket match by id (the third-place match is not included).
    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.locate(match_id).map(|r| self.match_at(r))
    }

    pub fn final_match(&self) -> Option<&Match> {
        self.find_match(&self.final_match_id)
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.rounds.get(self.current_round_index).map(|r| &**r)
    }

    /// Matches of the current round that can be decided right now.
    pub fn ready_matches(&self) -> impl Iterator<Item = &Match> {
        self.current_round()
            .into_iter()
            .flat_map(|r| r.matches.iter())
            .map(|m| &**m)
            .filter(|m| m.is_ready())
    }

    pub fn is_semi_final(&self, match_id: &str) -> bool {
        self.semi_final_ids.iter().any(|id| id == match_id)
    }

    pub(crate) fn locate(&self, match_id: &str) -> Option<MatchRef> {
        self.rounds.iter().enumerate().find_map(|(round, r)| {
            r.matches
                .iter()
                .position(|m| m.id == match_id)
                .map(|index| MatchRef { round, index })
        })
    }

    pub(crate) fn match_at(&self, at: MatchRef) -> &Match {
        &self.rounds[at.round].matches[at.index]
    }

    /// Copy-on-write access: clones the round and match only if still shared.
    pub(crate) fn match_mut(&mut self, at: MatchRef) -> &mut Match {
        let round = Arc::make_mut(&mut self.rounds[at.round]);
        Arc::make_mut(&mut round.matches[at.index])
    }
}
