//! Player registration: single adds, CSV import, renames and removals.

use crate::models::{
    BeltColor, Player, PlayerId, Tournament, TournamentError, TournamentId, TournamentStatus,
};
use crate::store::EntityStore;
use serde::Deserialize;
use std::io::Read;

/// One row of a player import file. `belt_color` may be left empty.
#[derive(Debug, Deserialize)]
struct PlayerRow {
    name: String,
    #[serde(default)]
    belt_color: Option<BeltColor>,
}

/// Register a player at the next position (Setup only, never beyond the tournament size).
pub fn add_player(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
    name: &str,
    belt_color: Option<BeltColor>,
) -> Result<Player, TournamentError> {
    let player = store.add_player(tournament_id, &mut |t, roster| {
        check_room(t, roster.len(), 1)?;
        Player::new(t.id, name, next_position(roster), belt_color)
    })?;
    log::info!(
        "Added player {} ({}) at position {} to tournament {}",
        player.name,
        player.id,
        player.position,
        tournament_id
    );
    Ok(player)
}

/// Register every player of a CSV file with a `name` column and an optional `belt_color`
/// column. Either all rows are added or none.
pub fn import_players_csv<R: Read>(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
    reader: R,
) -> Result<Vec<Player>, TournamentError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows: Vec<PlayerRow> = rdr
        .deserialize()
        .collect::<Result<_, _>>()
        .map_err(|e| TournamentError::InvalidCsv(e.to_string()))?;
    if rows.is_empty() {
        return Err(TournamentError::InvalidCsv("no players in file".to_string()));
    }

    let added = store.add_players(tournament_id, &mut |t, roster| {
        check_room(t, roster.len(), rows.len())?;
        let first = next_position(roster);
        rows.iter()
            .zip(first..)
            .map(|(row, position)| Player::new(t.id, row.name.as_str(), position, row.belt_color))
            .collect()
    })?;
    log::info!(
        "Imported {} players into tournament {}",
        added.len(),
        tournament_id
    );
    Ok(added)
}

/// Players of a tournament in position order.
pub fn list_players(
    store: &dyn EntityStore,
    tournament_id: TournamentId,
) -> Result<Vec<Player>, TournamentError> {
    if store.get_tournament(tournament_id).is_none() {
        return Err(TournamentError::TournamentNotFound(tournament_id));
    }
    Ok(store.list_players(tournament_id))
}

pub fn rename_player(
    store: &dyn EntityStore,
    player_id: PlayerId,
    name: &str,
) -> Result<Player, TournamentError> {
    store.update_player(player_id, &mut |p| p.rename(name))
}

/// Remove a player while the tournament is still in Setup. Positions are not reused.
pub fn remove_player(store: &dyn EntityStore, player_id: PlayerId) -> Result<(), TournamentError> {
    store.delete_player(player_id, &require_setup)?;
    log::info!("Removed player {}", player_id);
    Ok(())
}

fn require_setup(t: &Tournament) -> Result<(), TournamentError> {
    if t.status != TournamentStatus::Setup {
        return Err(TournamentError::InvalidState {
            expected: TournamentStatus::Setup,
            actual: t.status,
        });
    }
    Ok(())
}

fn check_room(t: &Tournament, registered: usize, adding: usize) -> Result<(), TournamentError> {
    require_setup(t)?;
    if registered + adding > t.size as usize {
        return Err(TournamentError::TournamentFull { size: t.size });
    }
    Ok(())
}

fn next_position(roster: &[Player]) -> u32 {
    roster.iter().map(|p| p.position).max().unwrap_or(0) + 1
}
