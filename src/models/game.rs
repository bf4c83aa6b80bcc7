//! Match record: two teams, their scores, and where/when it is played.

use crate::models::team::Team;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Court number carried by bye matches.
pub const NO_COURT: u32 = 0;

/// A single fixture. For bye matches the placeholder sits in `team_1`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub team_1: Team,
    pub team_2: Team,
    pub team_1_score: u32,
    pub team_2_score: u32,
    pub completed: bool,
    /// 1-based court, or [`NO_COURT`] for a bye.
    pub court: u32,
    /// 1-based public round (session) number.
    pub round: u32,
}

impl Match {
    /// New unplayed match. The id is derived from the two team ids, so the same
    /// fixture always gets the same id.
    pub fn new(team_1: Team, team_2: Team, court: u32, round: u32) -> Self {
        Self {
            id: Uuid::new_v5(&team_1.id, team_2.id.as_bytes()),
            team_1,
            team_2,
            team_1_score: 0,
            team_2_score: 0,
            completed: false,
            court,
            round,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.team_1.is_bye() || self.team_2.is_bye()
    }

    /// Whether `team_id` plays in this match (on either side).
    pub fn involves(&self, team_id: Uuid) -> bool {
        self.team_1.id == team_id || self.team_2.id == team_id
    }

    /// The team that sits out, if this is a bye match.
    pub fn resting_team(&self) -> Option<&Team> {
        match (self.team_1.is_bye(), self.team_2.is_bye()) {
            (true, false) => Some(&self.team_2),
            (false, true) => Some(&self.team_1),
            _ => None,
        }
    }

    /// Winner of a completed real match; `None` for ties, byes and unplayed matches.
    pub fn winner(&self) -> Option<&Team> {
        if !self.completed || self.is_bye() {
            return None;
        }
        if self.team_1_score > self.team_2_score {
            Some(&self.team_1)
        } else if self.team_2_score > self.team_1_score {
            Some(&self.team_2)
        } else {
            None
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resting_team() {
            Some(team) => write!(f, "Round {}: {} is on bye", self.round, team.name),
            None => write!(
                f,
                "Round {}, Court {}: {} vs. {}",
                self.round, self.court, self.team_1.name, self.team_2.name
            ),
        }
    }
}
