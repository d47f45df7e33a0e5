//! Integration tests for reverting decisions.

use bracket_tournament_web::{
    apply, apply_decision, build, revert, teams_from_names, BracketError, Decision, MatchStatus,
    Team, TournamentState,
};

fn teams(n: usize) -> Vec<Team> {
    let names: Vec<String> = (1..=n).map(|i| format!("Team {i}")).collect();
    teams_from_names(&names)
}

fn decide(state: &TournamentState, match_id: &str, team_id: &str) -> TournamentState {
    apply_decision(state, match_id, team_id).unwrap()
}

/// 8-team bracket with the whole first round decided for the odd-numbered teams.
fn after_first_round() -> TournamentState {
    let mut s = build(teams(8)).unwrap();
    for (m, w) in [
        ("match-1-0", "team-1"),
        ("match-1-1", "team-3"),
        ("match-1-2", "team-5"),
        ("match-1-3", "team-7"),
    ] {
        s = decide(&s, m, w);
    }
    s
}

#[test]
fn revert_reopens_match_and_clears_downstream_slot() {
    let s = build(teams(8)).unwrap();
    let s = decide(&s, "match-1-0", "team-1");
    let s = revert(&s, "match-1-0").unwrap();

    let m = s.find_match("match-1-0").unwrap();
    assert_eq!(m.status(), MatchStatus::Ready);
    assert!(m.winner.is_none());
    let semi = s.find_match("match-2-0").unwrap();
    assert!(semi.team_a.is_none());
    assert_eq!(semi.status(), MatchStatus::Empty);
}

#[test]
fn revert_then_redecide_reproduces_the_same_state() {
    let s = build(teams(8)).unwrap();
    let decided = decide(&s, "match-1-2", "team-6");
    let redone = decide(&revert(&decided, "match-1-2").unwrap(), "match-1-2", "team-6");
    assert_eq!(redone, decided);

    // Also when the decision closed a round.
    let closed = after_first_round();
    assert_eq!(closed.current_round_index, 1);
    let redone = decide(&revert(&closed, "match-1-3").unwrap(), "match-1-3", "team-7");
    assert_eq!(redone, closed);
}

#[test]
fn revert_is_blocked_once_downstream_is_decided() {
    let s = decide(&after_first_round(), "match-2-0", "team-3");
    let before = s.clone();
    assert_eq!(
        revert(&s, "match-1-0"),
        Err(BracketError::RevertBlocked("match-1-0".to_string()))
    );
    assert_eq!(
        apply(&s, "match-1-1", &Decision::Revert),
        Err(BracketError::RevertBlocked("match-1-1".to_string()))
    );
    assert_eq!(s, before);
    // The other half is still free.
    assert!(revert(&s, "match-1-2").is_ok());
}

#[test]
fn revert_requires_a_recorded_winner() {
    let s = build(teams(8)).unwrap();
    assert_eq!(
        revert(&s, "match-1-0"),
        Err(BracketError::NotDecided("match-1-0".to_string()))
    );
    assert_eq!(
        revert(&s, "nope"),
        Err(BracketError::MatchNotFound("nope".to_string()))
    );
}

#[test]
fn revert_does_not_roll_back_the_current_round() {
    let s = revert(&after_first_round(), "match-1-3").unwrap();
    assert_eq!(s.current_round_index, 1);
    assert!(s.find_match("match-2-1").unwrap().team_b.is_none());

    // The semifinal still waiting on the reopened match holds the round open.
    let s = decide(&s, "match-2-0", "team-1");
    assert_eq!(s.current_round_index, 1);

    let s = decide(&s, "match-1-3", "team-8");
    let s = decide(&s, "match-2-1", "team-8");
    assert_eq!(s.current_round_index, 2);
    let fin = s.final_match().unwrap();
    assert_eq!(fin.team_a.as_ref().unwrap().id, "team-1");
    assert_eq!(fin.team_b.as_ref().unwrap().id, "team-8");
}

#[test]
fn reverting_the_final_reopens_the_tournament() {
    let s = decide(&after_first_round(), "match-2-0", "team-1");
    let s = decide(&s, "match-2-1", "team-7");
    let done = decide(&s, "match-3-0", "team-7");
    assert!(done.is_complete);
    assert_eq!(done.champion.as_ref().unwrap().id, "team-7");

    let reopened = revert(&done, "match-3-0").unwrap();
    assert!(!reopened.is_complete);
    assert!(reopened.champion.is_none());
    assert_eq!(reopened.current_round_index, 2);

    let redone = decide(&reopened, "match-3-0", "team-7");
    assert_eq!(redone, done);
}
