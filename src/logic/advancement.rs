//! Winner routing: position p of round r feeds position ceil(p/2) of round r+1, odd positions
//! into the player 1 slot and even positions into player 2.

use crate::models::{Match, Player, Slot, TournamentError, TournamentId};
use crate::store::EntityStore;

/// Where the winner of a match at (round, position) goes next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NextSlot {
    pub round: u32,
    pub position: u32,
    pub slot: Slot,
}

impl NextSlot {
    pub fn after(round: u32, position: u32) -> Self {
        Self {
            round: round + 1,
            position: position.div_ceil(2),
            slot: Slot::for_position(position),
        }
    }
}

/// Write the winner of `completed` into its slot in the next round, if that slot is still
/// empty. Returns the updated downstream match.
///
/// Runs after the completion has been committed, so failures here are logged and never undo
/// it: a missing downstream match is a consistency error, a filled slot is left alone.
pub fn advance_winner(store: &dyn EntityStore, completed: &Match) -> Option<Match> {
    let winner = completed.winner_id?;
    let Some(tournament) = store.get_tournament(completed.tournament_id) else {
        log::error!(
            "Match {} belongs to unknown tournament {}",
            completed.id,
            completed.tournament_id
        );
        return None;
    };
    if tournament.is_final_round(completed.round) {
        log::info!(
            "Final of tournament {} won by {}",
            tournament.id,
            winner
        );
        return None;
    }

    let next = NextSlot::after(completed.round, completed.position);
    let Some(target) = store.find_match(tournament.id, next.round, next.position) else {
        log::error!(
            "Consistency error: tournament {} has no match at round {} position {} to receive the winner of match {}",
            tournament.id,
            next.round,
            next.position,
            completed.id
        );
        return None;
    };

    let mut filled = false;
    let result = store.update_match(target.id, &mut |m| {
        if m.player(next.slot).is_none() {
            *m.player_mut(next.slot) = Some(winner);
            filled = true;
        }
        Ok(())
    });
    let updated = match result {
        Ok(m) => m,
        Err(e) => {
            log::error!("Could not advance winner of match {}: {}", completed.id, e);
            return None;
        }
    };
    if filled {
        log::info!(
            "Advanced {} to round {} position {} ({:?})",
            winner,
            next.round,
            next.position,
            next.slot
        );
    } else if updated.player(next.slot) != Some(winner) {
        log::warn!(
            "Slot {:?} of match {} already taken; not overwriting with {}",
            next.slot,
            updated.id,
            winner
        );
    }

    advance_current_round(store, tournament.id, completed.round);
    Some(updated)
}

/// Move the tournament's current round past `round` once all its matches are completed.
fn advance_current_round(store: &dyn EntityStore, tournament_id: TournamentId, round: u32) {
    let round_done = store
        .list_matches(tournament_id)
        .iter()
        .filter(|m| m.round == round)
        .all(Match::is_completed);
    if !round_done {
        return;
    }
    let result = store.update_tournament(tournament_id, &mut |t| {
        if t.current_round == round && round < t.total_rounds {
            t.current_round = round + 1;
        }
        Ok(())
    });
    match result {
        Ok(t) => log::debug!("Tournament {} now on round {}", t.id, t.current_round),
        Err(e) => log::error!("Could not update current round: {}", e),
    }
}

/// Winner of the final, once it has been played.
pub fn tournament_champion(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
) -> Result<Option<Player>, TournamentError> {
    let tournament = store
        .get_tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    let champion = store
        .find_match(tournament.id, tournament.total_rounds, 1)
        .and_then(|m| m.winner_id)
        .and_then(|id| store.get_player(id));
    Ok(champion)
}
