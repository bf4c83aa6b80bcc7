//! Round-robin schedule generation (circle method) with bye handling and court-bounded sessions.
//!
//! Stages, each usable on its own:
//! 1. [`working_roster`]: pad an odd roster with the bye placeholder.
//! 2. [`round_pairings`] + [`rotate_pairings`]: index pairs for one theoretical round.
//! 3. [`classify_pairings`]: split real pairings from the bye pairing.
//! 4. [`pack_sessions`]: cut the round into sessions of at most `courts` real matches.
//! 5. [`materialize_session`]: turn a session into [`Match`] records.
//!
//! [`generate_schedule`] folds these over all `n - 1` theoretical rounds.

use crate::models::{Match, Team, NO_COURT};
use std::num::NonZeroUsize;

/// Two roster indices that meet in a round.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Pairing {
    pub first: usize,
    pub second: usize,
}

impl Pairing {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    pub fn swapped(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }
}

/// Pairings of one theoretical round, split by whether the bye takes part.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundPairings {
    pub real: Vec<Pairing>,
    /// At most one per round: the roster holds a single bye entry.
    pub bye: Option<Pairing>,
}

/// One physical time slot: at most `courts` real pairings, plus the round's bye if it is the first slot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Session {
    pub bye: Option<Pairing>,
    pub real: Vec<Pairing>,
}

impl Session {
    /// Whether this session spends a public round number.
    pub fn has_real_matches(&self) -> bool {
        !self.real.is_empty()
    }
}

/// Real teams from `teams`, plus one bye placeholder when their count is odd.
///
/// Bye entries already present in `teams` are dropped first, so resolving a resolved roster is a no-op.
pub fn working_roster(teams: &[Team]) -> Vec<Team> {
    let mut roster: Vec<Team> = teams.iter().filter(|t| !t.is_bye()).cloned().collect();
    if roster.len() % 2 != 0 {
        roster.push(Team::bye());
    }
    roster
}

/// Circle-method pairings for theoretical round `round` given the current index permutation.
///
/// Pairs position `i` with position `n - 1 - i` for `i < n / 2`. On odd rounds each pair is
/// swapped so teams alternate sides across rounds.
pub fn round_pairings(permutation: &[usize], round: usize) -> Vec<Pairing> {
    let n = permutation.len();
    (0..n / 2)
        .map(|i| {
            let pairing = Pairing::new(permutation[i], permutation[n - 1 - i]);
            if round % 2 == 0 {
                pairing
            } else {
                pairing.swapped()
            }
        })
        .collect()
}

/// Rotate a round's pairing list left by `round % len`, so a different fixture leads each round.
pub fn rotate_pairings(mut pairings: Vec<Pairing>, round: usize) -> Vec<Pairing> {
    if !pairings.is_empty() {
        let shift = round % pairings.len();
        pairings.rotate_left(shift);
    }
    pairings
}

/// Circle-method rotation: position 0 stays fixed, the last element moves to position 1.
pub fn rotate(permutation: &[usize]) -> Vec<usize> {
    let mut next = permutation.to_vec();
    if next.len() > 2 {
        if let Some(last) = next.pop() {
            next.insert(1, last);
        }
    }
    next
}

/// Split pairings into real ones and the (single) pairing that involves the bye.
pub fn classify_pairings(pairings: &[Pairing], roster: &[Team]) -> RoundPairings {
    let mut classified = RoundPairings::default();
    for &pairing in pairings {
        let is_bye = roster[pairing.first].is_bye() || roster[pairing.second].is_bye();
        if !is_bye {
            classified.real.push(pairing);
        } else if classified.bye.is_none() {
            classified.bye = Some(pairing);
        }
    }
    classified
}

/// Cut a round into sessions of at most `courts` real pairings.
///
/// The bye pairing joins the first session. A round with only a bye still gets one session.
pub fn pack_sessions(round: RoundPairings, courts: NonZeroUsize) -> Vec<Session> {
    let mut sessions: Vec<Session> = round
        .real
        .chunks(courts.get())
        .map(|chunk| Session {
            bye: None,
            real: chunk.to_vec(),
        })
        .collect();
    if let Some(bye) = round.bye {
        match sessions.first_mut() {
            Some(first) => first.bye = Some(bye),
            None => sessions.push(Session {
                bye: Some(bye),
                real: Vec::new(),
            }),
        }
    }
    sessions
}

/// Build the match records for one session, all tagged with public round `round`.
///
/// The bye match comes first, with the placeholder in `team_1` and court [`NO_COURT`].
/// Real matches get courts `1..=k` in session order.
pub fn materialize_session(session: &Session, roster: &[Team], round: u32) -> Vec<Match> {
    let mut matches = Vec::with_capacity(session.real.len() + 1);
    if let Some(pairing) = session.bye {
        let (a, b) = (&roster[pairing.first], &roster[pairing.second]);
        let (bye, resting) = if a.is_bye() { (a, b) } else { (b, a) };
        matches.push(Match::new(bye.clone(), resting.clone(), NO_COURT, round));
    }
    for (court, pairing) in (1u32..).zip(&session.real) {
        matches.push(Match::new(
            roster[pairing.first].clone(),
            roster[pairing.second].clone(),
            court,
            round,
        ));
    }
    matches
}

/// Materialize a round's sessions starting at public round `first_round`.
/// Returns the matches and the next unused round number.
fn materialize_round(sessions: &[Session], roster: &[Team], first_round: u32) -> (Vec<Match>, u32) {
    sessions
        .iter()
        .fold((Vec::new(), first_round), |(mut matches, round), session| {
            matches.extend(materialize_session(session, roster, round));
            let next = if session.has_real_matches() { round + 1 } else { round };
            (matches, next)
        })
}

/// Generate a complete round-robin schedule for `teams` on `courts` simultaneous courts.
///
/// Every pair of real teams meets exactly once. With an odd count each team sits out exactly
/// once (a bye match on court 0). Round numbers start at 1 and have no gaps. Deterministic:
/// the same input always gives an identical schedule.
pub fn generate_schedule(teams: &[Team], courts: NonZeroUsize) -> Vec<Match> {
    let roster = working_roster(teams);
    if roster.is_empty() {
        return Vec::new();
    }
    let theoretical_rounds = roster.len() - 1;
    let permutation: Vec<usize> = (0..roster.len()).collect();

    let (schedule, _, last_round) = (0..theoretical_rounds).fold(
        (Vec::new(), permutation, 1u32),
        |(mut schedule, permutation, round), r| {
            let pairings = rotate_pairings(round_pairings(&permutation, r), r);
            let sessions = pack_sessions(classify_pairings(&pairings, &roster), courts);
            let (matches, next_round) = materialize_round(&sessions, &roster, round);
            schedule.extend(matches);
            (schedule, rotate(&permutation), next_round)
        },
    );

    log::debug!(
        "Generated {} matches over {} rounds for {} teams on {} court(s)",
        schedule.len(),
        last_round.saturating_sub(1),
        roster.iter().filter(|t| !t.is_bye()).count(),
        courts
    );
    schedule
}
