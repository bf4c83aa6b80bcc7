//! Tournament and TournamentState.

use crate::models::game::{Match, MatchId};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Title is empty or whitespace.
    EmptyTitle,
    /// Team name is empty or whitespace.
    EmptyTeamName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    /// Fewer than 2 teams.
    NotEnoughTeams,
    /// Court count must be at least 1.
    NoCourts,
    /// Team not found in the roster.
    TeamNotFound(TeamId),
    /// Match not found in the schedule.
    MatchNotFound(MatchId),
    /// Bye matches carry no score.
    ByeMatch(MatchId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyTitle => write!(f, "Title cannot be empty"),
            TournamentError::EmptyTeamName => write!(f, "Team name cannot be empty"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::NotEnoughTeams => write!(f, "Tournament must have at least 2 teams"),
            TournamentError::NoCourts => write!(f, "Tournament must have at least 1 court"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::ByeMatch(_) => write!(f, "Bye matches cannot be scored"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Progress of the tournament, derived from its schedule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TournamentState {
    /// No real matches scheduled yet.
    #[default]
    Setup,
    InProgress {
        completed_matches: usize,
        total_matches: usize,
    },
    /// Every fixture has a result. `standings` is ordered by wins, descending.
    Completed {
        winner: Option<Team>,
        standings: Vec<Team>,
    },
}

impl TournamentState {
    pub fn is_completed(&self) -> bool {
        matches!(self, TournamentState::Completed { .. })
    }

    /// Fraction of real matches completed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self {
            TournamentState::Setup => 0.0,
            TournamentState::InProgress {
                completed_matches,
                total_matches,
            } => {
                if *total_matches > 0 {
                    *completed_matches as f64 / *total_matches as f64
                } else {
                    0.0
                }
            }
            TournamentState::Completed { .. } => 1.0,
        }
    }
}

/// Full tournament: roster, court count, schedule and derived state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub title: String,
    /// Real teams only. The bye placeholder lives in the schedule, never here.
    pub teams: Vec<Team>,
    pub schedule: Vec<Match>,
    pub available_courts: u32,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams and one court.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            teams: Vec::new(),
            schedule: Vec::new(),
            available_courts: 1,
            state: TournamentState::Setup,
        }
    }

    /// Create a tournament with initial teams. The schedule is not generated yet.
    pub fn with_teams<I, S>(title: impl Into<String>, names: I, courts: u32) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut t = Self::new(title);
        t.set_available_courts(courts)?;
        for name in names {
            t.add_team(name)?;
        }
        Ok(t)
    }

    /// Teams that take part in matches (the bye placeholder is never one of them).
    pub fn active_teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter().filter(|t| !t.is_bye())
    }

    /// Court capacity handed to the scheduler. A stored 0 is treated as 1.
    pub fn courts(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.available_courts as usize).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    pub fn get_match(&self, id: MatchId) -> Option<&Match> {
        self.schedule.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.schedule.iter_mut().find(|m| m.id == id)
    }

    /// Schedule grouped by public round, in round order.
    pub fn rounds(&self) -> Vec<(u32, Vec<&Match>)> {
        let mut rounds: BTreeMap<u32, Vec<&Match>> = BTreeMap::new();
        for m in &self.schedule {
            rounds.entry(m.round).or_default().push(m);
        }
        rounds.into_iter().collect()
    }

    /// Set the title. Blank titles are rejected.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), TournamentError> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(TournamentError::EmptyTitle);
        }
        self.title = title.to_string();
        Ok(())
    }

    /// Add a team. Names are trimmed and must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>) -> Result<(), TournamentError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::EmptyTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        self.teams.push(Team::new(name_trimmed));
        Ok(())
    }

    /// Remove a team by id.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Set the number of courts available at once. Must be at least 1.
    pub fn set_available_courts(&mut self, courts: u32) -> Result<(), TournamentError> {
        if courts == 0 {
            return Err(TournamentError::NoCourts);
        }
        self.available_courts = courts;
        Ok(())
    }

    /// Check the metadata required before a tournament is stored.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.title.trim().is_empty() {
            return Err(TournamentError::EmptyTitle);
        }
        if self.active_teams().count() < 2 {
            return Err(TournamentError::NotEnoughTeams);
        }
        if self.available_courts == 0 {
            return Err(TournamentError::NoCourts);
        }
        Ok(())
    }
}
