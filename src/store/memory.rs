//! In-memory store: all tables behind one RwLock. Lives for the process lifetime.

use super::{BracketBuilder, EntityStore, Mutation, PlayerBuilder, RosterBuilder};
use crate::models::{
    Match, MatchId, Player, PlayerId, Tournament, TournamentError, TournamentId,
};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    players: HashMap<PlayerId, Player>,
    matches: HashMap<MatchId, Match>,
}

impl Tables {
    fn roster(&self, tournament_id: TournamentId) -> Vec<Player> {
        let mut players: Vec<_> = self
            .players
            .values()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.position);
        players
    }
}

#[derive(Default)]
pub struct MemStore {
    tables: RwLock<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Mutations only commit on success, so data behind a poisoned lock is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Apply `apply` to a copy of `entity` and swap it in on success.
fn merge<T: Clone>(
    entity: &mut T,
    apply: &mut dyn FnMut(&mut T) -> Result<(), TournamentError>,
) -> Result<T, TournamentError> {
    let mut draft = entity.clone();
    apply(&mut draft)?;
    *entity = draft.clone();
    Ok(draft)
}

impl EntityStore for MemStore {
    fn create_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut g = self.write();
        g.tournaments.insert(tournament.id, tournament.clone());
        Ok(tournament)
    }

    fn get_tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.read().tournaments.get(&id).cloned()
    }

    fn update_tournament(
        &self,
        id: TournamentId,
        apply: Mutation<'_, Tournament>,
    ) -> Result<Tournament, TournamentError> {
        let mut g = self.write();
        let tournament = g
            .tournaments
            .get_mut(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        merge(tournament, apply)
    }

    fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError> {
        let mut g = self.write();
        g.tournaments
            .remove(&id)
            .ok_or(TournamentError::TournamentNotFound(id))?;
        g.players.retain(|_, p| p.tournament_id != id);
        g.matches.retain(|_, m| m.tournament_id != id);
        Ok(())
    }

    fn add_player(
        &self,
        tournament_id: TournamentId,
        build: PlayerBuilder<'_>,
    ) -> Result<Player, TournamentError> {
        let mut g = self.write();
        let tournament = g
            .tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
        let roster = g.roster(tournament_id);
        let player = build(tournament, &roster)?;
        g.players.insert(player.id, player.clone());
        Ok(player)
    }

    fn add_players(
        &self,
        tournament_id: TournamentId,
        build: RosterBuilder<'_>,
    ) -> Result<Vec<Player>, TournamentError> {
        let mut g = self.write();
        let tournament = g
            .tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
        let roster = g.roster(tournament_id);
        let added = build(tournament, &roster)?;
        for p in &added {
            g.players.insert(p.id, p.clone());
        }
        Ok(added)
    }

    fn get_player(&self, id: PlayerId) -> Option<Player> {
        self.read().players.get(&id).cloned()
    }

    fn list_players(&self, tournament_id: TournamentId) -> Vec<Player> {
        self.read().roster(tournament_id)
    }

    fn update_player(
        &self,
        id: PlayerId,
        apply: Mutation<'_, Player>,
    ) -> Result<Player, TournamentError> {
        let mut g = self.write();
        let player = g
            .players
            .get_mut(&id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        merge(player, apply)
    }

    fn delete_player(
        &self,
        id: PlayerId,
        allow: &dyn Fn(&Tournament) -> Result<(), TournamentError>,
    ) -> Result<(), TournamentError> {
        let mut g = self.write();
        let tournament_id = g
            .players
            .get(&id)
            .map(|p| p.tournament_id)
            .ok_or(TournamentError::PlayerNotFound(id))?;
        let tournament = g
            .tournaments
            .get(&tournament_id)
            .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
        allow(tournament)?;
        g.players.remove(&id);
        Ok(())
    }

    fn create_bracket(
        &self,
        tournament_id: TournamentId,
        build: BracketBuilder<'_>,
    ) -> Result<Vec<Match>, TournamentError> {
        let mut g = self.write();
        let mut tournament = g
            .tournaments
            .get(&tournament_id)
            .cloned()
            .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
        let roster = g.roster(tournament_id);
        let mut matches = build(&mut tournament, &roster)?;
        matches.sort_by_key(|m| (m.round, m.position));
        for m in &matches {
            g.matches.insert(m.id, m.clone());
        }
        g.tournaments.insert(tournament_id, tournament);
        Ok(matches)
    }

    fn get_match(&self, id: MatchId) -> Option<Match> {
        self.read().matches.get(&id).cloned()
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Vec<Match> {
        let mut matches: Vec<_> = self
            .read()
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.position));
        matches
    }

    fn find_match(&self, tournament_id: TournamentId, round: u32, position: u32) -> Option<Match> {
        self.read()
            .matches
            .values()
            .find(|m| m.tournament_id == tournament_id && m.round == round && m.position == position)
            .cloned()
    }

    fn update_match(
        &self,
        id: MatchId,
        apply: Mutation<'_, Match>,
    ) -> Result<Match, TournamentError> {
        let mut g = self.write();
        let m = g
            .matches
            .get_mut(&id)
            .ok_or(TournamentError::MatchNotFound(id))?;
        merge(m, apply)
    }
}
