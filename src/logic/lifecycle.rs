//! Match lifecycle: start, score updates and completion.

use crate::logic::advancement::advance_winner;
use crate::models::{
    KataJudgeScores, Match, MatchId, MatchStatus, PlayerId, ScoreCard, Slot, TournamentError,
    TournamentType,
};
use crate::store::EntityStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Change to the senshu holder of a kumite match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenshuUpdate {
    Player1,
    Player2,
    Clear,
}

/// Score fields supplied by the scoring table. Omitted fields keep their current value.
///
/// Totals are stored as given. An omitted total is recomputed from the card only when this
/// request changes that player's card entries (kata once all five judges have scored);
/// otherwise it keeps its previous value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreFields {
    pub player1_score: Option<f64>,
    pub player2_score: Option<f64>,

    pub player1_ippon: Option<u32>,
    pub player1_wazari: Option<u32>,
    pub player1_yuko: Option<u32>,
    pub player1_warnings: Option<u32>,
    pub player2_ippon: Option<u32>,
    pub player2_wazari: Option<u32>,
    pub player2_yuko: Option<u32>,
    pub player2_warnings: Option<u32>,
    pub senshu: Option<SenshuUpdate>,

    pub player1_kata_scores: Option<KataJudgeScores>,
    pub player2_kata_scores: Option<KataJudgeScores>,
}

impl ScoreFields {
    fn has_kumite_fields(&self) -> bool {
        [
            self.player1_ippon,
            self.player1_wazari,
            self.player1_yuko,
            self.player1_warnings,
            self.player2_ippon,
            self.player2_wazari,
            self.player2_yuko,
            self.player2_warnings,
        ]
        .iter()
        .any(Option::is_some)
            || self.senshu.is_some()
    }

    fn has_kata_fields(&self) -> bool {
        self.player1_kata_scores.is_some() || self.player2_kata_scores.is_some()
    }

    /// Reject negative or non-finite decimals before anything is merged.
    fn validate(&self) -> Result<(), TournamentError> {
        let totals = [
            ("player1_score", self.player1_score),
            ("player2_score", self.player2_score),
        ];
        for (field, value) in totals {
            if value.is_some_and(|v| !is_valid_score(v)) {
                return Err(TournamentError::InvalidScore(field));
            }
        }
        let cards = [
            ("player1_kata_scores", self.player1_kata_scores),
            ("player2_kata_scores", self.player2_kata_scores),
        ];
        for (field, scores) in cards {
            if scores.is_some_and(|s| !s.iter().copied().all(is_valid_score)) {
                return Err(TournamentError::InvalidScore(field));
            }
        }
        Ok(())
    }

    /// Merge into `m`'s card and totals.
    fn apply_to(&self, m: &mut Match) -> Result<(), TournamentError> {
        self.validate()?;
        match &mut m.card {
            ScoreCard::Kumite {
                player1,
                player2,
                senshu,
            } => {
                if self.has_kata_fields() {
                    return Err(TournamentError::ScoringSchemeMismatch {
                        expected: TournamentType::Kumite,
                    });
                }
                merge_count(&mut player1.ippon, self.player1_ippon);
                merge_count(&mut player1.wazari, self.player1_wazari);
                merge_count(&mut player1.yuko, self.player1_yuko);
                merge_count(&mut player1.warnings, self.player1_warnings);
                merge_count(&mut player2.ippon, self.player2_ippon);
                merge_count(&mut player2.wazari, self.player2_wazari);
                merge_count(&mut player2.yuko, self.player2_yuko);
                merge_count(&mut player2.warnings, self.player2_warnings);
                match self.senshu {
                    Some(SenshuUpdate::Player1) => *senshu = Some(Slot::Player1),
                    Some(SenshuUpdate::Player2) => *senshu = Some(Slot::Player2),
                    Some(SenshuUpdate::Clear) => *senshu = None,
                    None => {}
                }
            }
            ScoreCard::Kata { player1, player2 } => {
                if self.has_kumite_fields() {
                    return Err(TournamentError::ScoringSchemeMismatch {
                        expected: TournamentType::Kata,
                    });
                }
                if let Some(scores) = self.player1_kata_scores {
                    *player1 = scores;
                }
                if let Some(scores) = self.player2_kata_scores {
                    *player2 = scores;
                }
            }
        }
        for slot in [Slot::Player1, Slot::Player2] {
            let total = match slot {
                Slot::Player1 => self.player1_score,
                Slot::Player2 => self.player2_score,
            };
            let derived = if self.touches_card(slot) {
                m.card.derived_total(slot)
            } else {
                None
            };
            if let Some(value) = total.or(derived) {
                match slot {
                    Slot::Player1 => m.player1_score = value,
                    Slot::Player2 => m.player2_score = value,
                }
            }
        }
        Ok(())
    }

    /// Whether this request changes the card entries of `slot` (senshu does not count).
    fn touches_card(&self, slot: Slot) -> bool {
        let (counts, kata) = match slot {
            Slot::Player1 => (
                [
                    self.player1_ippon,
                    self.player1_wazari,
                    self.player1_yuko,
                    self.player1_warnings,
                ],
                self.player1_kata_scores,
            ),
            Slot::Player2 => (
                [
                    self.player2_ippon,
                    self.player2_wazari,
                    self.player2_yuko,
                    self.player2_warnings,
                ],
                self.player2_kata_scores,
            ),
        };
        counts.iter().any(Option::is_some) || kata.is_some()
    }
}

fn is_valid_score(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn merge_count(current: &mut u32, update: Option<u32>) {
    if let Some(value) = update {
        *current = value;
    }
}

/// Body of a completion request: the winner the table computed plus the final score fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompleteMatch {
    pub winner_id: PlayerId,
    #[serde(flatten)]
    pub scores: ScoreFields,
}

pub fn get_match(store: &dyn EntityStore, match_id: MatchId) -> Result<Match, TournamentError> {
    store
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))
}

/// Start the clock: pending -> in_progress. Already running matches are left as they are.
pub fn start_match(store: &dyn EntityStore, match_id: MatchId) -> Result<Match, TournamentError> {
    store.update_match(match_id, &mut |m| {
        require_playable(m)?;
        if m.status == MatchStatus::Pending {
            m.status = MatchStatus::InProgress;
            m.start_time.get_or_insert_with(Utc::now);
        }
        Ok(())
    })
}

/// Merge score fields into a match. The first write moves it to in_progress.
///
/// A kumite player reaching the warning limit ends the match on the spot: the opponent wins and
/// is routed into the next round. Both players at the limit is rejected.
pub fn update_match_score(
    store: &dyn EntityStore,
    match_id: MatchId,
    fields: &ScoreFields,
) -> Result<Match, TournamentError> {
    let updated = store.update_match(match_id, &mut |m| {
        require_playable(m)?;
        fields.apply_to(m)?;
        m.status = MatchStatus::InProgress;
        let now = Utc::now();
        m.start_time.get_or_insert(now);
        if let Some(eliminated) = m.card.eliminated()? {
            m.winner_id = m.player(eliminated.opponent());
            m.status = MatchStatus::Completed;
            m.end_time = Some(now);
        }
        Ok(())
    })?;
    if let (true, Some(winner)) = (updated.is_completed(), updated.winner_id) {
        log::info!(
            "Match {} (round {}, position {}) ended by warnings, won by {}",
            updated.id,
            updated.round,
            updated.position,
            winner
        );
        advance_winner(store, &updated);
    }
    Ok(updated)
}

/// Record the final scores and winner, then route the winner into the next round.
///
/// The winner must be one of the two players and must agree with [`Match::decide_outcome`]
/// on the merged scores. Completing a completed match is a conflict and changes nothing.
pub fn complete_match(
    store: &dyn EntityStore,
    match_id: MatchId,
    request: &CompleteMatch,
) -> Result<Match, TournamentError> {
    let winner_id = request.winner_id;
    let completed = store.update_match(match_id, &mut |m| {
        require_playable(m)?;
        let given = m
            .slot_of(winner_id)
            .ok_or(TournamentError::WinnerNotInMatch(winner_id))?;
        request.scores.apply_to(m)?;
        let outcome = m.decide_outcome()?;
        if outcome.winner != given {
            let decided = m
                .player(outcome.winner)
                .ok_or(TournamentError::MatchNotReady(m.id))?;
            return Err(TournamentError::WinnerMismatch {
                given: winner_id,
                decided,
            });
        }
        let now = Utc::now();
        m.winner_id = Some(winner_id);
        m.status = MatchStatus::Completed;
        m.end_time = Some(now);
        m.start_time.get_or_insert(now);
        log::debug!("Match {} decided by {:?}", m.id, outcome.decision);
        Ok(())
    })?;
    log::info!(
        "Match {} (round {}, position {}) won by {} ({} - {})",
        completed.id,
        completed.round,
        completed.position,
        winner_id,
        completed.player1_score,
        completed.player2_score
    );
    advance_winner(store, &completed);
    Ok(completed)
}

fn require_playable(m: &Match) -> Result<(), TournamentError> {
    if m.is_completed() {
        return Err(TournamentError::MatchAlreadyCompleted(m.id));
    }
    if !m.is_ready() {
        return Err(TournamentError::MatchNotReady(m.id));
    }
    Ok(())
}
