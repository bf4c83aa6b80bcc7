//! Tournament business logic: schedule generation, setup, results, standings.

pub mod schedule;
mod results;
mod setup;
mod standings;

pub use results::record_match_score;
pub use schedule::generate_schedule;
pub use setup::{edit_tournament, regenerate_schedule, TournamentEdit};
pub use standings::{calculate_standings, update_state};
