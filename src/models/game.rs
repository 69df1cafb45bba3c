//! Match, Slot and MatchStatus for one bout between two players.

use crate::models::error::TournamentError;
use crate::models::player::PlayerId;
use crate::models::scoring::{judges_scored, ScoreCard, KATA_JUDGES};
use crate::models::tournament::{TournamentId, TournamentType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// One of the two player slots of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Player1,
    Player2,
}

impl Slot {
    /// Slot a winner from bracket position `position` fills in the next round: odd positions
    /// feed player 1, even positions feed player 2.
    pub fn for_position(position: u32) -> Self {
        if position % 2 == 1 {
            Slot::Player1
        } else {
            Slot::Player2
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Slot::Player1 => Slot::Player2,
            Slot::Player2 => Slot::Player1,
        }
    }
}

/// Lifecycle of a match. Only moves forward.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// Why a match was won.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Points,
    /// Tied on points; the senshu holder wins.
    Senshu,
    /// Opponent reached the warning limit.
    Elimination,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Slot,
    pub decision: Decision,
}

/// A bracket match at (round, position).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round: u32,
    /// 1-based position within the round.
    pub position: u32,
    /// None until seeded or fed by advancement.
    pub player1_id: Option<PlayerId>,
    pub player2_id: Option<PlayerId>,
    pub player1_score: f64,
    pub player2_score: f64,
    pub card: ScoreCard,
    pub winner_id: Option<PlayerId>,
    pub status: MatchStatus,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Match {
    /// Empty pending match with a fresh card for `kind`.
    pub fn new(tournament_id: TournamentId, round: u32, position: u32, kind: TournamentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            position,
            player1_id: None,
            player2_id: None,
            player1_score: 0.0,
            player2_score: 0.0,
            card: ScoreCard::for_type(kind),
            winner_id: None,
            status: MatchStatus::Pending,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_players(mut self, player1: PlayerId, player2: PlayerId) -> Self {
        self.player1_id = Some(player1);
        self.player2_id = Some(player2);
        self
    }

    pub fn player(&self, slot: Slot) -> Option<PlayerId> {
        match slot {
            Slot::Player1 => self.player1_id,
            Slot::Player2 => self.player2_id,
        }
    }

    pub fn player_mut(&mut self, slot: Slot) -> &mut Option<PlayerId> {
        match slot {
            Slot::Player1 => &mut self.player1_id,
            Slot::Player2 => &mut self.player2_id,
        }
    }

    pub fn score(&self, slot: Slot) -> f64 {
        match slot {
            Slot::Player1 => self.player1_score,
            Slot::Player2 => self.player2_score,
        }
    }

    /// Which slot `player_id` occupies, if any.
    pub fn slot_of(&self, player_id: PlayerId) -> Option<Slot> {
        if self.player1_id == Some(player_id) {
            Some(Slot::Player1)
        } else if self.player2_id == Some(player_id) {
            Some(Slot::Player2)
        } else {
            None
        }
    }

    /// Both players assigned.
    pub fn is_ready(&self) -> bool {
        self.player1_id.is_some() && self.player2_id.is_some()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Decide who wins with the current scores.
    ///
    /// 1. A kumite player at the warning limit loses regardless of points.
    /// 2. Kata needs all 5 judge scores on both sides.
    /// 3. Strictly higher total wins.
    /// 4. On a tie the senshu holder wins; without one the tie is unresolved.
    pub fn decide_outcome(&self) -> Result<Outcome, TournamentError> {
        if let Some(eliminated) = self.card.eliminated()? {
            return Ok(Outcome {
                winner: eliminated.opponent(),
                decision: Decision::Elimination,
            });
        }
        if let ScoreCard::Kata { player1, player2 } = &self.card {
            for (slot, scores) in [(Slot::Player1, player1), (Slot::Player2, player2)] {
                let given = judges_scored(scores);
                if given != KATA_JUDGES {
                    return Err(TournamentError::IncompleteKataCard { slot, given });
                }
            }
        }
        match self.player1_score.partial_cmp(&self.player2_score) {
            Some(Ordering::Greater) => Ok(Outcome {
                winner: Slot::Player1,
                decision: Decision::Points,
            }),
            Some(Ordering::Less) => Ok(Outcome {
                winner: Slot::Player2,
                decision: Decision::Points,
            }),
            _ => match self.card.senshu() {
                Some(holder) => Ok(Outcome {
                    winner: holder,
                    decision: Decision::Senshu,
                }),
                None => Err(TournamentError::UnresolvedTie),
            },
        }
    }
}
