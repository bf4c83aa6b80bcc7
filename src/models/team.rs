//! Team data structure, including the bye placeholder used for odd rosters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Display name of the bye placeholder.
pub const BYE_NAME: &str = "Bye";

/// Whether a roster entry is a real team or the placeholder that pads an odd roster.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamKind {
    #[default]
    Real,
    Bye,
}

/// A team in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub kind: TeamKind,
}

impl Team {
    /// Create a new real team with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wins: 0,
            losses: 0,
            kind: TeamKind::Real,
        }
    }

    /// The bye placeholder. Its identity is fixed (nil id) so schedules stay reproducible.
    pub fn bye() -> Self {
        Self {
            id: Uuid::nil(),
            name: BYE_NAME.to_string(),
            wins: 0,
            losses: 0,
            kind: TeamKind::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.kind == TeamKind::Bye
    }

    /// Record a win for this team.
    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    /// Record a loss for this team.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }
}
