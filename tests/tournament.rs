//! Integration tests for tournament setup, result recording and standings.

use round_robin_web::{
    calculate_standings, edit_tournament, record_match_score, regenerate_schedule, Tournament, TournamentEdit,
    TournamentError, TournamentState,
};
use uuid::Uuid;

fn tournament_with_teams(names: &[&str], courts: u32) -> Tournament {
    let mut t = Tournament::with_teams("Test Tournament", names.iter().copied(), courts).unwrap();
    regenerate_schedule(&mut t);
    t
}

fn play_all(t: &mut Tournament) {
    let ids: Vec<_> = t.schedule.iter().filter(|m| !m.is_bye()).map(|m| m.id).collect();
    for id in ids {
        record_match_score(t, id, 21, 15).unwrap();
    }
}

#[test]
fn new_tournament_starts_in_setup() {
    let t = Tournament::with_teams("Test Tournament", ["Team A", "Team B", "Team C"], 1).unwrap();
    assert_eq!(t.teams.len(), 3);
    assert_eq!(t.available_courts, 1);
    assert_eq!(t.state, TournamentState::Setup);
    assert!(t.schedule.is_empty());
    assert_eq!(t.state.progress(), 0.0);
}

#[test]
fn add_team_rejects_blank_and_duplicate_names() {
    let mut t = Tournament::new("Cup");
    assert_eq!(t.add_team("   "), Err(TournamentError::EmptyTeamName));
    t.add_team(" Sharks ").unwrap();
    assert_eq!(t.teams[0].name, "Sharks");
    assert_eq!(t.add_team("sharks"), Err(TournamentError::DuplicateTeamName));
}

#[test]
fn zero_courts_rejected() {
    let mut t = Tournament::new("Cup");
    assert_eq!(t.set_available_courts(0), Err(TournamentError::NoCourts));
    assert_eq!(t.available_courts, 1);
    assert!(matches!(
        Tournament::with_teams("Cup", ["A", "B"], 0),
        Err(TournamentError::NoCourts)
    ));
}

#[test]
fn stored_zero_courts_is_clamped_for_scheduling() {
    let mut t = tournament_with_teams(&["A", "B", "C", "D"], 2);
    t.available_courts = 0;
    assert_eq!(t.courts().get(), 1);
    regenerate_schedule(&mut t);
    assert!(t.schedule.iter().all(|m| m.court == 1));
}

#[test]
fn validate_requires_title_two_teams_and_courts() {
    let mut t = Tournament::new("");
    assert_eq!(t.validate(), Err(TournamentError::EmptyTitle));
    t.set_title("Cup").unwrap();
    t.add_team("A").unwrap();
    assert_eq!(t.validate(), Err(TournamentError::NotEnoughTeams));
    t.add_team("B").unwrap();
    assert_eq!(t.validate(), Ok(()));
}

#[test]
fn remove_team_by_id() {
    let mut t = Tournament::with_teams("Cup", ["A", "B"], 1).unwrap();
    let id = t.teams[0].id;
    t.remove_team(id).unwrap();
    assert_eq!(t.teams.len(), 1);
    assert_eq!(t.remove_team(id), Err(TournamentError::TeamNotFound(id)));
}

#[test]
fn regenerate_keeps_roster_free_of_bye() {
    let t = tournament_with_teams(&["Team A", "Team B", "Team C"], 1);
    assert_eq!(t.teams.len(), 3);
    assert!(t.active_teams().all(|team| !team.is_bye()));
    for team in &t.teams {
        assert_eq!(t.schedule.iter().filter(|m| m.involves(team.id)).count(), 3);
    }
    assert_eq!(
        t.state,
        TournamentState::InProgress {
            completed_matches: 0,
            total_matches: 3
        }
    );
}

#[test]
fn record_score_updates_match_and_progress() {
    let mut t = tournament_with_teams(&["A", "B", "C", "D"], 2);
    let id = t.schedule[0].id;
    record_match_score(&mut t, id, 21, 15).unwrap();

    let m = t.get_match(id).unwrap();
    assert_eq!((m.team_1_score, m.team_2_score), (21, 15));
    assert!(m.completed);
    assert_eq!(
        t.state,
        TournamentState::InProgress {
            completed_matches: 1,
            total_matches: 6
        }
    );
    assert!((t.state.progress() - 1.0 / 6.0).abs() < 1e-9);
}

#[test]
fn record_score_rejects_unknown_and_bye_matches() {
    let mut t = tournament_with_teams(&["A", "B", "C"], 1);
    let missing = Uuid::new_v4();
    assert_eq!(
        record_match_score(&mut t, missing, 1, 0),
        Err(TournamentError::MatchNotFound(missing))
    );
    let bye = t.schedule.iter().find(|m| m.is_bye()).unwrap().id;
    assert_eq!(record_match_score(&mut t, bye, 1, 0), Err(TournamentError::ByeMatch(bye)));
}

#[test]
fn completing_every_match_completes_tournament() {
    let mut t = tournament_with_teams(&["A", "B", "C", "D", "E"], 2);
    play_all(&mut t);
    assert!(t.is_completed());
    match &t.state {
        TournamentState::Completed { winner, standings } => {
            assert_eq!(standings.len(), 5);
            assert_eq!(winner.as_ref(), standings.first());
            assert!(standings.iter().all(|team| !team.is_bye()));
            let total_wins: u32 = standings.iter().map(|team| team.wins).sum();
            assert_eq!(total_wins, 10);
            assert!(standings.windows(2).all(|w| w[0].wins >= w[1].wins));
        }
        other => panic!("expected completed, got {other:?}"),
    }
    assert_eq!(t.state.progress(), 1.0);
}

#[test]
fn ties_credit_nobody() {
    let mut t = tournament_with_teams(&["A", "B"], 1);
    let id = t.schedule[0].id;
    record_match_score(&mut t, id, 21, 21).unwrap();
    assert!(t.is_completed());
    let table = calculate_standings(&t);
    assert!(table.iter().all(|team| team.wins == 0 && team.losses == 0));
}

#[test]
fn standings_tally_without_touching_roster() {
    let mut t = tournament_with_teams(&["A", "B", "C"], 1);
    let first = t.schedule.iter().find(|m| !m.is_bye()).unwrap().clone();
    record_match_score(&mut t, first.id, 10, 21).unwrap();

    let table = calculate_standings(&t);
    assert_eq!(table[0].id, first.team_2.id);
    assert_eq!(table[0].wins, 1);
    let loser = table.iter().find(|team| team.id == first.team_1.id).unwrap();
    assert_eq!(loser.losses, 1);
    assert!(t.teams.iter().all(|team| team.wins == 0 && team.losses == 0));
}

#[test]
fn regeneration_discards_scores() {
    let mut t = tournament_with_teams(&["A", "B", "C", "D"], 1);
    play_all(&mut t);
    assert!(t.is_completed());
    for (i, team) in t.teams.iter_mut().enumerate() {
        team.wins = i as u32 + 1;
        team.losses = 7;
    }
    let counters: Vec<(u32, u32)> = t.teams.iter().map(|team| (team.wins, team.losses)).collect();

    regenerate_schedule(&mut t);
    assert!(t.schedule.iter().all(|m| !m.completed && m.team_1_score == 0));
    let after: Vec<(u32, u32)> = t.teams.iter().map(|team| (team.wins, team.losses)).collect();
    assert_eq!(after, counters);
    assert!(matches!(t.state, TournamentState::InProgress { completed_matches: 0, .. }));
}

#[test]
fn edit_regenerates_and_keeps_team_ids() {
    let mut t = tournament_with_teams(&["A", "B", "C"], 1);
    let a_id = t.teams[0].id;
    let edit = TournamentEdit {
        title: "Renamed".to_string(),
        teams: vec!["A".to_string(), "".to_string(), "B".to_string(), "C".to_string(), "D".to_string()],
        courts: 2,
    };
    edit_tournament(&mut t, edit).unwrap();
    assert_eq!(t.title, "Renamed");
    assert_eq!(t.teams.len(), 4);
    assert_eq!(t.teams[0].id, a_id);
    assert_eq!(t.available_courts, 2);
    assert_eq!(t.schedule.len(), 6);
    assert!(t.schedule.iter().all(|m| !m.is_bye()));
}

#[test]
fn failed_edit_leaves_tournament_unchanged() {
    let mut t = tournament_with_teams(&["A", "B", "C"], 1);
    let before = t.schedule.clone();
    let edit = TournamentEdit {
        title: "Cup".to_string(),
        teams: vec!["A".to_string()],
        courts: 1,
    };
    assert_eq!(edit_tournament(&mut t, edit), Err(TournamentError::NotEnoughTeams));
    assert_eq!(t.title, "Test Tournament");
    assert_eq!(t.schedule, before);
}

#[test]
fn rounds_group_schedule() {
    let t = tournament_with_teams(&["A", "B", "C", "D"], 2);
    let rounds = t.rounds();
    assert_eq!(rounds.iter().map(|(r, _)| *r).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(rounds.iter().all(|(_, matches)| matches.len() == 2));
}

#[test]
fn tournament_round_trips_through_json() {
    let mut t = tournament_with_teams(&["A", "B", "C"], 1);
    play_all(&mut t);
    let json = serde_json::to_string(&t).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back.schedule, t.schedule);
    assert_eq!(back.state, t.state);
}
