//! Integration tests for applying decisions: propagation, round advancement, champion.

use bracket_tournament_web::{
    apply, apply_decision, build, get_champion, is_round_complete, teams_from_names,
    BracketError, Decision, MatchStatus, Team, TournamentState,
};
use std::sync::Arc;

fn teams(n: usize) -> Vec<Team> {
    let names: Vec<String> = (1..=n).map(|i| format!("Team {i}")).collect();
    teams_from_names(&names)
}

fn decide(state: &TournamentState, match_id: &str, team_id: &str) -> TournamentState {
    apply_decision(state, match_id, team_id).unwrap()
}

fn team_id<'a>(state: &'a TournamentState, match_id: &str, slot_a: bool) -> Option<&'a str> {
    let m = state.find_match(match_id)?;
    let team = if slot_a { &m.team_a } else { &m.team_b };
    team.as_ref().map(|t| t.id.as_str())
}

/// Decide every ready match in favour of `team_a` until nothing is left; returns decisions made.
fn play_through(mut state: TournamentState) -> (TournamentState, usize) {
    let mut decisions = 0;
    loop {
        let ready: Vec<(String, String)> = state
            .ready_matches()
            .map(|m| (m.id.clone(), m.team_a.clone().unwrap().id))
            .collect();
        if ready.is_empty() {
            return (state, decisions);
        }
        for (match_id, winner) in ready {
            state = decide(&state, &match_id, &winner);
            decisions += 1;
            assert_eq!(state.champion.is_some(), state.is_complete);
        }
    }
}

#[test]
fn eight_team_tournament_end_to_end() {
    let mut s = build(teams(8)).unwrap();
    s = decide(&s, "match-1-0", "team-1");
    s = decide(&s, "match-1-1", "team-3");
    s = decide(&s, "match-1-2", "team-5");
    assert_eq!(s.current_round_index, 0);
    s = decide(&s, "match-1-3", "team-7");
    assert_eq!(s.current_round_index, 1);
    assert!(is_round_complete(&s.rounds[0]));

    assert_eq!(team_id(&s, "match-2-0", true), Some("team-1"));
    assert_eq!(team_id(&s, "match-2-0", false), Some("team-3"));
    assert_eq!(team_id(&s, "match-2-1", true), Some("team-5"));
    assert_eq!(team_id(&s, "match-2-1", false), Some("team-7"));

    s = decide(&s, "match-2-0", "team-1");
    s = decide(&s, "match-2-1", "team-5");
    assert_eq!(s.current_round_index, 2);
    assert!(!s.is_complete);

    s = decide(&s, "match-3-0", "team-1");
    assert!(s.is_complete);
    assert_eq!(get_champion(&s).map(|t| t.id.as_str()), Some("team-1"));
    assert_eq!(s.current_round_index, 2);
}

#[test]
fn winner_fills_slot_by_position_parity() {
    let s = build(teams(8)).unwrap();
    let s = decide(&s, "match-1-1", "team-4");
    assert_eq!(team_id(&s, "match-2-0", true), None);
    assert_eq!(team_id(&s, "match-2-0", false), Some("team-4"));
    assert_eq!(s.find_match("match-2-0").unwrap().status(), MatchStatus::Partial);
    assert_eq!(s.find_match("match-1-1").unwrap().status(), MatchStatus::Decided);
}

#[test]
fn invalid_winner_is_rejected_and_state_unchanged() {
    let s = build(teams(8)).unwrap();
    let before = s.clone();
    let err = apply_decision(&s, "match-1-0", "team-3").unwrap_err();
    assert_eq!(
        err,
        BracketError::InvalidWinner {
            match_id: "match-1-0".to_string(),
            team_id: "team-3".to_string(),
        }
    );
    assert_eq!(s, before);
}

#[test]
fn unknown_incomplete_and_redundant_decisions_are_rejected() {
    let s = build(teams(8)).unwrap();
    assert_eq!(
        apply_decision(&s, "match-9-9", "team-1"),
        Err(BracketError::MatchNotFound("match-9-9".to_string()))
    );
    assert_eq!(
        apply_decision(&s, "match-2-0", "team-1"),
        Err(BracketError::IncompleteMatch("match-2-0".to_string()))
    );
    let s = decide(&s, "match-1-0", "team-1");
    assert_eq!(
        apply_decision(&s, "match-1-0", "team-1"),
        Err(BracketError::AlreadyDecided("match-1-0".to_string()))
    );
}

#[test]
fn decision_only_touches_the_match_and_its_downstream_match() {
    let before = build(teams(16)).unwrap();
    let after = decide(&before, "match-1-5", "team-11");

    for (r_before, r_after) in before.rounds.iter().zip(after.rounds.iter()) {
        for (m_before, m_after) in r_before.matches.iter().zip(r_after.matches.iter()) {
            if m_before.id == "match-1-5" || m_before.id == "match-2-2" {
                assert_ne!(m_before, m_after);
            } else {
                assert_eq!(m_before, m_after);
                // Untouched matches are shared, not copied.
                assert!(Arc::ptr_eq(m_before, m_after));
            }
        }
    }
    // Rounds without changes are shared as a whole.
    assert!(Arc::ptr_eq(&before.rounds[2], &after.rounds[2]));
    assert!(Arc::ptr_eq(&before.rounds[3], &after.rounds[3]));
    assert_eq!(after.current_round_index, before.current_round_index);
}

#[test]
fn tagged_decision_entry_point() {
    let s = build(teams(8)).unwrap();
    let decision: Decision = serde_json::from_str(r#"{"action":"decide","winner":"team-2"}"#).unwrap();
    assert_eq!(decision, Decision::Decide { winner: "team-2".to_string() });
    let s = apply(&s, "match-1-0", &decision).unwrap();
    assert_eq!(team_id(&s, "match-2-0", true), Some("team-2"));

    let revert: Decision = serde_json::from_str(r#"{"action":"revert"}"#).unwrap();
    let s = apply(&s, "match-1-0", &revert).unwrap();
    assert_eq!(team_id(&s, "match-2-0", true), None);
}

#[test]
fn every_supported_size_plays_through_to_a_champion() {
    for n in [8, 16, 20] {
        let (state, decisions) = play_through(build(teams(n)).unwrap());
        assert_eq!(decisions, n - 1, "{n} teams");
        assert!(state.is_complete);
        assert_eq!(state.champion.as_ref().unwrap().id, "team-1");
        assert_eq!(
            state.final_match().unwrap().winner,
            state.champion,
        );
        assert_eq!(state.current_round_index, state.rounds.len() - 2);
    }
}

#[test]
fn wildcard_winner_reaches_its_semifinal() {
    let mut s = build(teams(20)).unwrap();
    s = decide(&s, "match-1-4", "team-10");
    assert_eq!(team_id(&s, "match-4-0", false), Some("team-10"));
    assert_eq!(team_id(&s, "match-4-0", true), None);
    s = decide(&s, "match-1-9", "team-19");
    assert_eq!(team_id(&s, "match-4-1", false), Some("team-19"));
}

#[test]
fn rounds_decided_ahead_of_time_advance_together() {
    let mut s = build(teams(20)).unwrap();
    // Everything in the first round except the left wildcard.
    for (m, w) in [
        ("match-1-0", "team-1"),
        ("match-1-1", "team-3"),
        ("match-1-2", "team-5"),
        ("match-1-3", "team-7"),
        ("match-1-5", "team-11"),
        ("match-1-6", "team-13"),
        ("match-1-7", "team-15"),
        ("match-1-8", "team-17"),
        ("match-1-9", "team-19"),
    ] {
        s = decide(&s, m, w);
    }
    // Second round is fully ready and can be played before the first round closes.
    for (m, w) in [
        ("match-2-0", "team-1"),
        ("match-2-1", "team-5"),
        ("match-2-2", "team-11"),
        ("match-2-3", "team-15"),
    ] {
        s = decide(&s, m, w);
    }
    s = decide(&s, "match-3-0", "team-1");
    assert_eq!(s.current_round_index, 0);

    s = decide(&s, "match-1-4", "team-9");
    // First and second round are both done; the right quarterfinal is still open.
    assert_eq!(s.current_round_index, 2);
    assert!(s.find_match("match-3-1").unwrap().is_ready());
}
