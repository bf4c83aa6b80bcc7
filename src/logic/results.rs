//! Recording match results.

use crate::logic::standings::update_state;
use crate::models::{MatchId, Tournament, TournamentError};

/// Record the final score of one real match and refresh the tournament state.
///
/// Recording again overwrites the previous score. Bye matches cannot be scored.
pub fn record_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    team_1_score: u32,
    team_2_score: u32,
) -> Result<(), TournamentError> {
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_bye() {
        return Err(TournamentError::ByeMatch(match_id));
    }
    m.team_1_score = team_1_score;
    m.team_2_score = team_2_score;
    m.completed = true;
    update_state(tournament);
    Ok(())
}
