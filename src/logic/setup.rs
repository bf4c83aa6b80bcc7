//! Setup: editing teams/courts and (re)generating the schedule.

use crate::logic::schedule::generate_schedule;
use crate::logic::standings::update_state;
use crate::models::{Tournament, TournamentError};
use serde::Deserialize;

/// A full edit of a tournament's metadata, as submitted by the editing form.
#[derive(Clone, Debug, Deserialize)]
pub struct TournamentEdit {
    pub title: String,
    pub teams: Vec<String>,
    pub courts: u32,
}

/// Regenerate the schedule from scratch. Recorded scores are discarded;
/// team win/loss counters are left alone.
pub fn regenerate_schedule(tournament: &mut Tournament) {
    tournament.schedule = generate_schedule(&tournament.teams, tournament.courts());
    update_state(tournament);
}

/// Apply an edit and regenerate the schedule. On error the tournament is unchanged.
///
/// Blank team names are skipped. Teams whose name is kept (case-insensitive) keep their id.
pub fn edit_tournament(tournament: &mut Tournament, edit: TournamentEdit) -> Result<(), TournamentError> {
    let mut updated = Tournament {
        teams: Vec::new(),
        ..tournament.clone()
    };
    updated.set_title(edit.title)?;
    updated.set_available_courts(edit.courts)?;
    for name in edit.teams.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        updated.add_team(name)?;
        if let Some(existing) = tournament
            .teams
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        {
            if let Some(added) = updated.teams.last_mut() {
                added.id = existing.id;
            }
        }
    }
    updated.validate()?;
    regenerate_schedule(&mut updated);
    *tournament = updated;
    Ok(())
}
