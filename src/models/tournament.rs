//! Tournament, TournamentType and TournamentStatus.

use crate::models::error::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

pub const MIN_SIZE: u32 = 2;
pub const MAX_SIZE: u32 = 128;
/// Upper bound for an explicit `total_rounds` override.
pub const MAX_TOTAL_ROUNDS: u32 = 20;

/// Which discipline is contested; selects the score card used by every match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentType {
    #[default]
    Kumite,
    Kata,
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Adding players; size and rounds may still change.
    #[default]
    Setup,
    /// Bracket generated, matches being played.
    Active,
    Completed,
}

impl TournamentStatus {
    fn rank(self) -> u8 {
        match self {
            TournamentStatus::Setup => 0,
            TournamentStatus::Active => 1,
            TournamentStatus::Completed => 2,
        }
    }

    /// Status only moves forward.
    pub fn can_advance_to(self, next: TournamentStatus) -> bool {
        next.rank() >= self.rank()
    }
}

/// A single-elimination tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentType,
    /// Exact number of players the bracket is built for.
    pub size: u32,
    pub total_rounds: u32,
    pub status: TournamentStatus,
    pub current_round: u32,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament in Setup. `total_rounds` defaults to the minimum for `size`.
    pub fn new(
        name: impl Into<String>,
        kind: TournamentType,
        size: u32,
        total_rounds: Option<u32>,
    ) -> Result<Self, TournamentError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(TournamentError::InvalidSize {
                size,
                min: MIN_SIZE,
                max: MAX_SIZE,
            });
        }
        let min = min_rounds(size);
        let total_rounds = total_rounds.unwrap_or(min);
        if !(min..=MAX_TOTAL_ROUNDS).contains(&total_rounds) {
            return Err(TournamentError::InvalidTotalRounds {
                total_rounds,
                min,
                max: MAX_TOTAL_ROUNDS,
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            size,
            total_rounds,
            status: TournamentStatus::Setup,
            current_round: 1,
            created_at: Utc::now(),
        })
    }

    /// First round that holds matches. Later than 1 only when `total_rounds` was raised above
    /// the minimum; the leading rounds could never be fed and stay empty.
    pub fn entry_round(&self) -> u32 {
        self.total_rounds - min_rounds(self.size) + 1
    }

    /// Number of bracket positions in `round` (0 outside 1..=total_rounds).
    pub fn matches_in_round(&self, round: u32) -> u32 {
        if round == 0 || round > self.total_rounds {
            return 0;
        }
        1 << (self.total_rounds - round)
    }

    pub fn is_final_round(&self, round: u32) -> bool {
        round == self.total_rounds
    }
}

/// ceil(log2(size)): rounds needed to reduce `size` players to one.
pub fn min_rounds(size: u32) -> u32 {
    size.max(1).next_power_of_two().trailing_zeros()
}

/// Smallest power of two >= size.
pub fn bracket_capacity(size: u32) -> u32 {
    size.max(1).next_power_of_two()
}
