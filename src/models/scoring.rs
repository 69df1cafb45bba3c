//! Score cards: kumite point tally and 5-judge kata scoring.

use crate::models::error::TournamentError;
use crate::models::game::Slot;
use crate::models::tournament::TournamentType;
use serde::{Deserialize, Serialize};

pub const IPPON_POINTS: u64 = 3;
pub const WAZARI_POINTS: u64 = 2;
pub const YUKO_POINTS: u64 = 1;
/// Warnings at which a kumite player is eliminated.
pub const ELIMINATION_WARNINGS: u32 = 5;
pub const KATA_JUDGES: usize = 5;

/// One score per judge; 0 means the judge has not scored yet.
pub type KataJudgeScores = [f64; KATA_JUDGES];

/// Kumite counts for one player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct KumiteTally {
    pub ippon: u32,
    pub wazari: u32,
    pub yuko: u32,
    pub warnings: u32,
}

impl KumiteTally {
    /// ippon*3 + wazari*2 + yuko, widened so no count can overflow it.
    pub fn total(&self) -> u64 {
        u64::from(self.ippon) * IPPON_POINTS
            + u64::from(self.wazari) * WAZARI_POINTS
            + u64::from(self.yuko) * YUKO_POINTS
    }

    pub fn is_eliminated(&self) -> bool {
        self.warnings >= ELIMINATION_WARNINGS
    }
}

/// Number of judges that have given a score (> 0).
pub fn judges_scored(scores: &KataJudgeScores) -> usize {
    scores.iter().filter(|s| **s > 0.0).count()
}

/// Drop the lowest and highest of the 5 judge scores and sum the middle three, rounded to
/// 2 decimals. `None` until all 5 judges have scored.
pub fn kata_final_score(scores: &KataJudgeScores) -> Option<f64> {
    if judges_scored(scores) != KATA_JUDGES {
        return None;
    }
    let mut sorted = *scores;
    sorted.sort_by(|a, b| a.total_cmp(b));
    let middle: f64 = sorted[1..KATA_JUDGES - 1].iter().sum();
    Some((middle * 100.0).round() / 100.0)
}

/// Per-match scoring state. Exactly one scheme is active, chosen by the tournament type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoreCard {
    Kumite {
        player1: KumiteTally,
        player2: KumiteTally,
        /// Player who scored first, if any. Holding it on one side excludes the other.
        senshu: Option<Slot>,
    },
    Kata {
        player1: KataJudgeScores,
        player2: KataJudgeScores,
    },
}

impl ScoreCard {
    /// Empty card for a tournament of `kind`.
    pub fn for_type(kind: TournamentType) -> Self {
        match kind {
            TournamentType::Kumite => ScoreCard::Kumite {
                player1: KumiteTally::default(),
                player2: KumiteTally::default(),
                senshu: None,
            },
            TournamentType::Kata => ScoreCard::Kata {
                player1: [0.0; KATA_JUDGES],
                player2: [0.0; KATA_JUDGES],
            },
        }
    }

    pub fn kind(&self) -> TournamentType {
        match self {
            ScoreCard::Kumite { .. } => TournamentType::Kumite,
            ScoreCard::Kata { .. } => TournamentType::Kata,
        }
    }

    /// Total implied by the card for `slot`: the kumite tally, or the kata final once complete.
    pub fn derived_total(&self, slot: Slot) -> Option<f64> {
        match (self, slot) {
            (ScoreCard::Kumite { player1, .. }, Slot::Player1) => Some(player1.total() as f64),
            (ScoreCard::Kumite { player2, .. }, Slot::Player2) => Some(player2.total() as f64),
            (ScoreCard::Kata { player1, .. }, Slot::Player1) => kata_final_score(player1),
            (ScoreCard::Kata { player2, .. }, Slot::Player2) => kata_final_score(player2),
        }
    }

    pub fn senshu(&self) -> Option<Slot> {
        match self {
            ScoreCard::Kumite { senshu, .. } => *senshu,
            ScoreCard::Kata { .. } => None,
        }
    }

    /// The side eliminated by warnings, if any.
    pub fn eliminated(&self) -> Result<Option<Slot>, TournamentError> {
        match self {
            ScoreCard::Kumite {
                player1, player2, ..
            } => match (player1.is_eliminated(), player2.is_eliminated()) {
                (true, true) => Err(TournamentError::BothEliminated),
                (true, false) => Ok(Some(Slot::Player1)),
                (false, true) => Ok(Some(Slot::Player2)),
                (false, false) => Ok(None),
            },
            ScoreCard::Kata { .. } => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kumite_total_weights_categories() {
        let tally = KumiteTally {
            ippon: 1,
            wazari: 1,
            yuko: 2,
            warnings: 4,
        };
        assert_eq!(tally.total(), 7);
        assert!(!tally.is_eliminated());
    }

    #[test]
    fn kumite_total_handles_huge_counts() {
        let tally = KumiteTally {
            ippon: u32::MAX,
            wazari: u32::MAX,
            yuko: u32::MAX,
            warnings: 0,
        };
        assert_eq!(tally.total(), 6 * u64::from(u32::MAX));
    }

    #[test]
    fn five_warnings_eliminate() {
        let tally = KumiteTally {
            warnings: 5,
            ..Default::default()
        };
        assert!(tally.is_eliminated());
    }

    #[test]
    fn kata_drops_high_and_low() {
        let scores = [8.5, 9.0, 8.0, 9.5, 8.5];
        assert_eq!(kata_final_score(&scores), Some(26.0));
    }

    #[test]
    fn kata_rounds_to_two_decimals() {
        let scores = [7.1, 7.2, 7.3, 7.4, 7.5];
        // 7.2 + 7.3 + 7.4 = 21.9 (after rounding away float noise)
        assert_eq!(kata_final_score(&scores), Some(21.9));
    }

    #[test]
    fn kata_incomplete_without_all_judges() {
        let scores = [8.5, 9.0, 0.0, 9.5, 8.5];
        assert_eq!(judges_scored(&scores), 4);
        assert_eq!(kata_final_score(&scores), None);
    }

    #[test]
    fn derived_total_follows_card_type() {
        let card = ScoreCard::for_type(TournamentType::Kumite);
        assert_eq!(card.derived_total(Slot::Player1), Some(0.0));

        let card = ScoreCard::Kata {
            player1: [8.5, 9.0, 8.0, 9.5, 8.5],
            player2: [0.0; KATA_JUDGES],
        };
        assert_eq!(card.kind(), TournamentType::Kata);
        assert_eq!(card.derived_total(Slot::Player1), Some(26.0));
        assert_eq!(card.derived_total(Slot::Player2), None);
    }
}
