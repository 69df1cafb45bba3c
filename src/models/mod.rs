//! Data structures for the karate bracket: tournaments, players, matches and score cards.

mod error;
mod game;
mod player;
mod scoring;
mod tournament;

pub use error::{ErrorKind, TournamentError};
pub use game::{Decision, Match, MatchId, MatchStatus, Outcome, Slot};
pub use player::{BeltColor, Player, PlayerId};
pub use scoring::{
    judges_scored, kata_final_score, KataJudgeScores, KumiteTally, ScoreCard,
    ELIMINATION_WARNINGS, KATA_JUDGES,
};
pub use tournament::{
    bracket_capacity, min_rounds, Tournament, TournamentId, TournamentStatus, TournamentType,
    MAX_SIZE, MAX_TOTAL_ROUNDS, MIN_SIZE,
};
