//! Bracket construction: seeded team list → initial tournament state.
//!
//! Both halves are built with the same shape. Per side, each round pairs the
//! previous round's matches two by two. When a round has an odd number of
//! matches (20 teams: five first-round matches per side) the last one becomes
//! the side's wildcard: its winner skips ahead into slot `team_b` of the side
//! semifinal, which is added as an extra single-match round.

use crate::models::{
    BracketError, Match, MatchId, Round, Side, Slot, Team, TournamentState,
};
use std::collections::HashSet;
use std::sync::Arc;

/// Team counts the bracket layout supports.
pub const SUPPORTED_TEAM_COUNTS: [usize; 3] = [8, 16, 20];

/// Per-side round sizes shared by both halves of the bracket.
#[derive(Clone, Debug, Eq, PartialEq)]
struct SideLayout {
    /// Matches per side in each round, first round first. The last entry is the side semifinal (1).
    sizes: Vec<usize>,
    /// Round whose last match is the wildcard connector.
    wildcard_round: Option<usize>,
}

impl SideLayout {
    fn new(first_round_matches: usize) -> Self {
        let mut sizes = vec![first_round_matches];
        let mut wildcard_round = None;
        let mut m = first_round_matches;
        while m > 1 {
            if m % 2 == 1 && wildcard_round.is_none() {
                wildcard_round = Some(sizes.len() - 1);
                m -= 1;
            }
            m = m.div_ceil(2);
            sizes.push(m);
        }
        if wildcard_round.is_some() {
            sizes.push(1);
        }
        Self {
            sizes,
            wildcard_round,
        }
    }

    /// Index of the center final round.
    fn final_round(&self) -> usize {
        self.sizes.len()
    }

    /// Round-wide position of a side-local match.
    fn position(&self, round: usize, side: Side, local: usize) -> usize {
        match side {
            Side::Right => self.sizes[round] + local,
            _ => local,
        }
    }

    fn is_wildcard(&self, round: usize, local: usize) -> bool {
        self.wildcard_round == Some(round) && local == self.sizes[round] - 1
    }

    /// Downstream match id and slot for a side-local match.
    fn connector(&self, round: usize, side: Side, local: usize) -> (MatchId, Slot) {
        let side_final = self.sizes.len() - 1;
        if round == side_final {
            let slot = if side == Side::Left { Slot::A } else { Slot::B };
            return (match_id(self.final_round(), 0), slot);
        }
        if self.is_wildcard(round, local) {
            let target = self.position(side_final, side, 0);
            return (match_id(side_final, target), Slot::B);
        }
        let target = self.position(round + 1, side, local / 2);
        (match_id(round + 1, target), Slot::for_position(local))
    }
}

fn match_id(round: usize, position: usize) -> MatchId {
    format!("match-{}-{}", round + 1, position)
}

/// Name of a round counted back from the final.
fn round_name(round: usize, final_round: usize) -> String {
    match final_round - round {
        0 => "Final".to_string(),
        1 => "Semi Finals".to_string(),
        2 => "Quarter Finals".to_string(),
        _ => match round {
            0 => "First Round".to_string(),
            1 => "Second Round".to_string(),
            2 => "Third Round".to_string(),
            n => format!("Round {}", n + 1),
        },
    }
}

/// Team count must be supported, names non-empty and unique (case-insensitive), ids unique.
fn validate_teams(teams: &[Team]) -> Result<(), BracketError> {
    if !SUPPORTED_TEAM_COUNTS.contains(&teams.len()) {
        return Err(BracketError::InvalidTeamCount(teams.len()));
    }
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for team in teams {
        let name = team.name.trim();
        if name.is_empty() {
            return Err(BracketError::EmptyTeamName);
        }
        if !names.insert(name.to_ascii_lowercase()) {
            return Err(BracketError::DuplicateTeamName(name.to_string()));
        }
        if !ids.insert(team.id.as_str()) {
            return Err(BracketError::DuplicateTeamId(team.id.clone()));
        }
    }
    Ok(())
}

/// Build the initial bracket. Teams are seeded in order: the first half plays on
/// the left, the second half on the right, adjacent teams meet in the first round.
pub fn build(teams: Vec<Team>) -> Result<TournamentState, BracketError> {
    validate_teams(&teams)?;

    let half = teams.len() / 2;
    let layout = SideLayout::new(half / 2);
    let final_round = layout.final_round();
    let side_final = final_round - 1;

    let mut rounds = Vec::with_capacity(final_round + 2);
    for (r, &size) in layout.sizes.iter().enumerate() {
        let mut matches = Vec::with_capacity(size * 2);
        for (side, seeds) in [(Side::Left, &teams[..half]), (Side::Right, &teams[half..])] {
            for local in 0..size {
                let position = layout.position(r, side, local);
                let mut m = Match::new(match_id(r, position), r, position, side);
                if r == 0 {
                    m.team_a = Some(seeds[local * 2].clone());
                    m.team_b = Some(seeds[local * 2 + 1].clone());
                }
                let (next_id, next_slot) = layout.connector(r, side, local);
                m.next_match_id = Some(next_id);
                m.next_slot = Some(next_slot);
                m.is_wildcard = layout.is_wildcard(r, local);
                matches.push(Arc::new(m));
            }
        }
        rounds.push(Arc::new(Round {
            id: r,
            name: round_name(r, final_round),
            matches,
        }));
    }

    let final_match = Match::new(match_id(final_round, 0), final_round, 0, Side::Center);
    let final_match_id = final_match.id.clone();
    rounds.push(Arc::new(Round {
        id: final_round,
        name: round_name(final_round, final_round),
        matches: vec![Arc::new(final_match)],
    }));
    // Placeholder for the display layer; never holds matches.
    rounds.push(Arc::new(Round {
        id: final_round + 1,
        name: "Champion".to_string(),
        matches: Vec::new(),
    }));

    log::info!(
        "Built bracket for {} teams: {} rounds, {} wildcard",
        teams.len(),
        final_round + 1,
        if layout.wildcard_round.is_some() { "with" } else { "no" }
    );

    Ok(TournamentState {
        rounds,
        current_round_index: 0,
        is_complete: false,
        champion: None,
        final_match_id,
        semi_final_ids: [
            match_id(side_final, layout.position(side_final, Side::Left, 0)),
            match_id(side_final, layout.position(side_final, Side::Right, 0)),
        ],
        third_place: None,
    })
}
