//! TournamentError and its coarse classification.

use crate::models::game::{MatchId, Slot};
use crate::models::player::PlayerId;
use crate::models::tournament::{TournamentId, TournamentStatus, TournamentType};
use thiserror::Error;

/// How a failure should be treated by callers (the HTTP layer maps these to status codes).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input; nothing was changed.
    Validation,
    /// Unknown tournament, player or match id.
    NotFound,
    /// The entity is not in a state that allows the operation.
    Conflict,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Tournament {0} not found")]
    TournamentNotFound(TournamentId),
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),

    #[error("Name must not be empty")]
    EmptyName,
    #[error("Tournament size must be between {min} and {max} (got {size})")]
    InvalidSize { size: u32, min: u32, max: u32 },
    #[error("Total rounds must be between {min} and {max} for this size (got {total_rounds})")]
    InvalidTotalRounds { total_rounds: u32, min: u32, max: u32 },
    #[error("Round {round} is outside 1..={total_rounds}")]
    InvalidRound { round: u32, total_rounds: u32 },
    #[error("Tournament is full ({size} players)")]
    TournamentFull { size: u32 },
    #[error("Need exactly {expected} players to generate bracket (have {actual})")]
    PlayerCountMismatch { expected: u32, actual: usize },
    #[error("Invalid player CSV: {0}")]
    InvalidCsv(String),

    /// Tournament is not in the status this action requires.
    #[error("Tournament is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: TournamentStatus,
        actual: TournamentStatus,
    },
    #[error("Tournament status cannot go from {from:?} to {to:?}")]
    StatusTransition {
        from: TournamentStatus,
        to: TournamentStatus,
    },

    #[error("Score field {0} must be a finite number >= 0")]
    InvalidScore(&'static str),
    #[error("Score fields do not belong to a {expected:?} match")]
    ScoringSchemeMismatch { expected: TournamentType },
    #[error("Match {0} does not have both players assigned yet")]
    MatchNotReady(MatchId),
    #[error("Match {0} is already completed")]
    MatchAlreadyCompleted(MatchId),
    #[error("Player {0} is not playing in this match")]
    WinnerNotInMatch(PlayerId),
    #[error("Winner {given} does not match the scores (expected {decided})")]
    WinnerMismatch { given: PlayerId, decided: PlayerId },
    #[error("Match cannot end in a tie. Please adjust scores or award senshu")]
    UnresolvedTie,
    #[error("Both players have been eliminated by warnings")]
    BothEliminated,
    #[error("Kata score for {slot:?} is incomplete ({given} of 5 judges)")]
    IncompleteKataCard { slot: Slot, given: usize },
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            TournamentNotFound(_) | PlayerNotFound(_) | MatchNotFound(_) => ErrorKind::NotFound,
            TournamentFull { .. }
            | InvalidState { .. }
            | StatusTransition { .. }
            | MatchAlreadyCompleted(_) => ErrorKind::Conflict,
            _ => ErrorKind::Validation,
        }
    }
}
