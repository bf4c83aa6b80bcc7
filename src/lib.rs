//! Round-robin tournament web app: library with models, schedule generation and storage.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    calculate_standings, edit_tournament, generate_schedule, record_match_score,
    regenerate_schedule, update_state, TournamentEdit,
};
pub use models::{
    Match, MatchId, Team, TeamId, TeamKind, Tournament, TournamentError, TournamentId,
    TournamentState, BYE_NAME, NO_COURT,
};
pub use store::{StoreError, TournamentStore};
