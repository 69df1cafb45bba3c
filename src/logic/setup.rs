//! Setup phase and tournament-level status changes.

use crate::models::{
    Tournament, TournamentError, TournamentId, TournamentStatus, TournamentType,
};
use crate::store::EntityStore;

/// Create a tournament in Setup. `total_rounds` defaults to ceil(log2(size)).
pub fn create_tournament(
    store: &dyn EntityStore,
    name: &str,
    kind: TournamentType,
    size: u32,
    total_rounds: Option<u32>,
) -> Result<Tournament, TournamentError> {
    let tournament = store.create_tournament(Tournament::new(name, kind, size, total_rounds)?)?;
    log::info!(
        "Created {:?} tournament {} ({}) for {} players over {} rounds",
        tournament.kind,
        tournament.id,
        tournament.name,
        tournament.size,
        tournament.total_rounds
    );
    Ok(tournament)
}

pub fn get_tournament(
    store: &dyn EntityStore,
    id: TournamentId,
) -> Result<Tournament, TournamentError> {
    store
        .get_tournament(id)
        .ok_or(TournamentError::TournamentNotFound(id))
}

/// Explicit status / current-round change. Status never regresses, and Setup -> Active only
/// happens through bracket generation.
pub fn update_tournament_status(
    store: &dyn EntityStore,
    id: TournamentId,
    status: TournamentStatus,
    current_round: Option<u32>,
) -> Result<Tournament, TournamentError> {
    let updated = store.update_tournament(id, &mut |t| {
        let from = t.status;
        let skips_bracket = from == TournamentStatus::Setup && status != TournamentStatus::Setup;
        if !from.can_advance_to(status) || skips_bracket {
            return Err(TournamentError::StatusTransition { from, to: status });
        }
        if let Some(round) = current_round {
            if round == 0 || round > t.total_rounds {
                return Err(TournamentError::InvalidRound {
                    round,
                    total_rounds: t.total_rounds,
                });
            }
            t.current_round = round;
        }
        t.status = status;
        Ok(())
    })?;
    log::info!(
        "Tournament {} is {:?} (round {})",
        updated.id,
        updated.status,
        updated.current_round
    );
    Ok(updated)
}

/// Delete a tournament with its players and matches.
pub fn delete_tournament(store: &dyn EntityStore, id: TournamentId) -> Result<(), TournamentError> {
    store.delete_tournament(id)?;
    log::info!("Deleted tournament {}", id);
    Ok(())
}
