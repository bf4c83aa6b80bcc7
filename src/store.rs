//! JSON-file persistence for tournaments.

use crate::models::{Tournament, TournamentError, TournamentId};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

/// Errors from loading, saving or looking up stored tournaments.
#[derive(Debug)]
pub enum StoreError {
    /// The data file exists but could not be read.
    Load(io::Error),
    /// The data file is not valid tournament JSON.
    Parse(serde_json::Error),
    /// The tournaments could not be encoded as JSON.
    Encode(serde_json::Error),
    /// The data file could not be written.
    Save(io::Error),
    /// The tournament failed validation and was not stored.
    InvalidTournament(TournamentError),
    TournamentNotFound(TournamentId),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Load(e) => write!(f, "Failed to load tournaments data: {}", e),
            StoreError::Parse(e) => write!(f, "Failed to parse tournaments data: {}", e),
            StoreError::Encode(e) => write!(f, "Failed to encode tournaments data: {}", e),
            StoreError::Save(e) => write!(f, "Failed to save tournaments data: {}", e),
            StoreError::InvalidTournament(e) => write!(f, "Invalid tournament: {}", e),
            StoreError::TournamentNotFound(id) => write!(f, "Tournament with ID {} not found", id),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Load(e) | StoreError::Save(e) => Some(e),
            StoreError::Parse(e) | StoreError::Encode(e) => Some(e),
            StoreError::InvalidTournament(_) | StoreError::TournamentNotFound(_) => None,
        }
    }
}

impl From<TournamentError> for StoreError {
    fn from(e: TournamentError) -> Self {
        StoreError::InvalidTournament(e)
    }
}

/// All tournaments, backed by one JSON file. Every mutation is written through.
#[derive(Debug)]
pub struct TournamentStore {
    path: PathBuf,
    tournaments: Vec<Tournament>,
}

impl TournamentStore {
    /// Open the store at `path`. A missing file means an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let tournaments = match fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data).map_err(StoreError::Parse)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::Load(e)),
        };
        Ok(Self { path, tournaments })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn get(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| t.id == id)
    }

    /// Write all tournaments to disk, replacing the file atomically.
    pub fn save(&self) -> Result<(), StoreError> {
        write_tournaments(&self.path, &self.tournaments)
    }

    /// Persist `next` and only then make it the in-memory state, so a failed
    /// write leaves the store as it was.
    fn commit(&mut self, next: Vec<Tournament>) -> Result<(), StoreError> {
        write_tournaments(&self.path, &next)?;
        self.tournaments = next;
        Ok(())
    }

    /// Validate and add a tournament.
    pub fn add(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        tournament.validate()?;
        let mut next = self.tournaments.clone();
        next.push(tournament);
        self.commit(next)
    }

    /// Validate and replace the stored tournament with the same id.
    pub fn update(&mut self, tournament: Tournament) -> Result<(), StoreError> {
        tournament.validate()?;
        let idx = self
            .tournaments
            .iter()
            .position(|t| t.id == tournament.id)
            .ok_or(StoreError::TournamentNotFound(tournament.id))?;
        let mut next = self.tournaments.clone();
        next[idx] = tournament;
        self.commit(next)
    }

    pub fn remove(&mut self, id: TournamentId) -> Result<(), StoreError> {
        let idx = self
            .tournaments
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TournamentNotFound(id))?;
        let mut next = self.tournaments.clone();
        next.remove(idx);
        self.commit(next)
    }

    pub fn remove_all(&mut self) -> Result<(), StoreError> {
        self.commit(Vec::new())
    }
}

/// Write `tournaments` to a sibling temp file and rename it over `path`.
fn write_tournaments(path: &Path, tournaments: &[Tournament]) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(tournaments).map_err(StoreError::Encode)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(StoreError::Save)?;
    fs::rename(&tmp, path).map_err(StoreError::Save)?;
    log::info!("Saved {} tournament(s) to {}", tournaments.len(), path.display());
    Ok(())
}
