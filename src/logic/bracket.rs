//! Bracket generation: builds every match of the single-elimination tree at once.

use crate::models::{
    bracket_capacity, Match, Player, Slot, Tournament, TournamentError, TournamentId,
    TournamentStatus,
};
use crate::store::EntityStore;

/// Generate the full bracket for a tournament in Setup with exactly `size` players, and mark
/// it Active. Nothing is written when the roster does not match the size.
pub fn generate_bracket(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
) -> Result<Vec<Match>, TournamentError> {
    let matches = store.create_bracket(tournament_id, &mut |t, players| {
        let matches = plan_bracket(t, players)?;
        t.status = TournamentStatus::Active;
        t.current_round = t.entry_round();
        Ok(matches)
    })?;
    log::info!(
        "Generated bracket for tournament {}: {} matches",
        tournament_id,
        matches.len()
    );
    Ok(matches)
}

/// Lay out all matches for `players` (in position order) without touching the store.
///
/// The entry round pairs players consecutively. With a non-power-of-two roster only the first
/// `size - byes` players play there; the bye players are seeded straight into the following
/// round, filling its slots after the ones fed by entry-round matches. Vacated entry-round
/// positions get no match. Later rounds start empty.
pub fn plan_bracket(
    tournament: &Tournament,
    players: &[Player],
) -> Result<Vec<Match>, TournamentError> {
    if tournament.status != TournamentStatus::Setup {
        return Err(TournamentError::InvalidState {
            expected: TournamentStatus::Setup,
            actual: tournament.status,
        });
    }
    if players.len() != tournament.size as usize {
        return Err(TournamentError::PlayerCountMismatch {
            expected: tournament.size,
            actual: players.len(),
        });
    }

    let byes = (bracket_capacity(tournament.size) - tournament.size) as usize;
    let paired = players.len() - byes;
    let entry = tournament.entry_round();
    let new_match =
        |round: u32, position: u32| Match::new(tournament.id, round, position, tournament.kind);

    let mut matches: Vec<Match> = players[..paired]
        .chunks_exact(2)
        .zip(1..)
        .map(|(pair, position)| new_match(entry, position).with_players(pair[0].id, pair[1].id))
        .collect();
    let fed_slots = matches.len();

    for round in entry + 1..=tournament.total_rounds {
        let mut round_matches: Vec<Match> = (1..=tournament.matches_in_round(round))
            .map(|position| new_match(round, position))
            .collect();
        if round == entry + 1 {
            // Slot n of this round is fed by entry-round position n.
            for (slot_index, player) in (fed_slots..).zip(&players[paired..]) {
                let target = &mut round_matches[slot_index / 2];
                *target.player_mut(Slot::for_position(slot_index as u32 + 1)) = Some(player.id);
            }
        }
        matches.extend(round_matches);
    }

    if byes > 0 {
        log::debug!(
            "Tournament {}: {} byes seeded into round {}",
            tournament.id,
            byes,
            entry + 1
        );
    }
    Ok(matches)
}

pub fn get_matches_by_tournament(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
) -> Result<Vec<Match>, TournamentError> {
    if store.get_tournament(tournament_id).is_none() {
        return Err(TournamentError::TournamentNotFound(tournament_id));
    }
    Ok(store.list_matches(tournament_id))
}

/// Matches of one round in position order (empty for rounds without matches).
pub fn get_matches_by_round(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
    round: u32,
) -> Result<Vec<Match>, TournamentError> {
    let mut matches = get_matches_by_tournament(store, tournament_id)?;
    matches.retain(|m| m.round == round);
    Ok(matches)
}
