//! Data structures for the round-robin tournament: teams, matches, tournament state.

mod game;
mod team;
mod tournament;

pub use game::{Match, MatchId, NO_COURT};
pub use team::{Team, TeamId, TeamKind, BYE_NAME};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
