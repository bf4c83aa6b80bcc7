//! Tournament state and standings, recomputed from the schedule.

use crate::models::{Match, Team, Tournament, TournamentState};

/// Standings from completed real matches: copies of the active teams with wins and losses
/// tallied, ordered by wins (descending). Ties keep roster order. A drawn match credits nobody.
///
/// The teams stored on the tournament are not modified.
pub fn calculate_standings(tournament: &Tournament) -> Vec<Team> {
    let mut table: Vec<Team> = tournament
        .active_teams()
        .map(|t| Team {
            wins: 0,
            losses: 0,
            ..t.clone()
        })
        .collect();

    for m in tournament.schedule.iter().filter(|m| !m.is_bye()) {
        let Some(winner) = m.winner() else {
            continue;
        };
        let loser = if winner.id == m.team_1.id { &m.team_2 } else { &m.team_1 };
        if let Some(t) = table.iter_mut().find(|t| t.id == winner.id) {
            t.add_win();
        }
        if let Some(t) = table.iter_mut().find(|t| t.id == loser.id) {
            t.add_loss();
        }
    }

    table.sort_by(|a, b| b.wins.cmp(&a.wins));
    table
}

/// Recompute `tournament.state` from its schedule.
///
/// - No real matches: `Setup`.
/// - Every real match completed, and the schedule holds every fixture: `Completed`.
/// - Otherwise: `InProgress`.
pub fn update_state(tournament: &mut Tournament) {
    let real: Vec<&Match> = tournament.schedule.iter().filter(|m| !m.is_bye()).collect();
    let total = real.len();
    let completed = real.iter().filter(|m| m.completed).count();
    let teams = tournament.active_teams().count();
    let expected = teams * teams.saturating_sub(1) / 2;

    tournament.state = if total == 0 {
        TournamentState::Setup
    } else if completed == total && completed == expected {
        let standings = calculate_standings(tournament);
        TournamentState::Completed {
            winner: standings.first().cloned(),
            standings,
        }
    } else {
        TournamentState::InProgress {
            completed_matches: completed,
            total_matches: total,
        }
    };
}
