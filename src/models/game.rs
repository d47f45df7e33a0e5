//! Match, Side, Slot and MatchStatus for a single bracket game.

use crate::models::team::Team;
use serde::{Deserialize, Serialize};

/// Unique identifier for a match (e.g. `match-2-3`).
pub type MatchId = String;

/// Which half of the bracket a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    /// The final (and the derived third-place match).
    Center,
}

/// One of the two team slots of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "team_a")]
    A,
    #[serde(rename = "team_b")]
    B,
}

impl Slot {
    /// Slot for a side-local position: even positions go to `A`, odd to `B`.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Slot::A
        } else {
            Slot::B
        }
    }
}

/// Lifecycle of a single match, derived from its slots and winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchStatus {
    /// No team assigned yet.
    Empty,
    /// One team waiting for its opponent.
    Partial,
    /// Both teams present, no winner.
    Ready,
    Decided,
}

/// A single match in the bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub round_index: usize,
    /// Position within the round (left-side matches first, then right-side).
    pub position: usize,
    pub team_a: Option<Team>,
    pub team_b: Option<Team>,
    /// None if not yet played.
    pub winner: Option<Team>,
    /// Match the winner advances to; None for the final and the third-place match.
    pub next_match_id: Option<MatchId>,
    /// Slot the winner occupies in `next_match_id`, fixed at build time.
    pub next_slot: Option<Slot>,
    pub side: Side,
    /// True for the wildcard connector, whose winner skips ahead to a fixed slot.
    #[serde(default)]
    pub is_wildcard: bool,
}

impl Match {
    /// An empty match with no teams and no downstream connection.
    pub fn new(id: impl Into<MatchId>, round_index: usize, position: usize, side: Side) -> Self {
        Self {
            id: id.into(),
            round_index,
            position,
            team_a: None,
            team_b: None,
            winner: None,
            next_match_id: None,
            next_slot: None,
            side,
            is_wildcard: false,
        }
    }

    pub fn team(&self, slot: Slot) -> Option<&Team> {
        match slot {
            Slot::A => self.team_a.as_ref(),
            Slot::B => self.team_b.as_ref(),
        }
    }

    /// Overwrite (or clear, with `None`) one slot.
    pub fn set_team(&mut self, slot: Slot, team: Option<Team>) {
        match slot {
            Slot::A => self.team_a = team,
            Slot::B => self.team_b = team,
        }
    }

    /// The assigned team with this id, if any.
    pub fn team_by_id(&self, team_id: &str) -> Option<&Team> {
        self.team_a
            .iter()
            .chain(self.team_b.iter())
            .find(|t| t.id == team_id)
    }

    /// Both teams, if the match is at least ready.
    pub fn teams(&self) -> Option<(&Team, &Team)> {
        Some((self.team_a.as_ref()?, self.team_b.as_ref()?))
    }

    pub fn has_both_teams(&self) -> bool {
        self.team_a.is_some() && self.team_b.is_some()
    }

    /// The non-winning assigned team, once decided.
    pub fn loser(&self) -> Option<&Team> {
        let winner = self.winner.as_ref()?;
        let (a, b) = self.teams()?;
        if a.id == winner.id {
            Some(b)
        } else {
            Some(a)
        }
    }

    pub fn status(&self) -> MatchStatus {
        match (&self.team_a, &self.team_b, &self.winner) {
            (_, _, Some(_)) => MatchStatus::Decided,
            (Some(_), Some(_), None) => MatchStatus::Ready,
            (None, None, None) => MatchStatus::Empty,
            _ => MatchStatus::Partial,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status() == MatchStatus::Ready
    }
}
