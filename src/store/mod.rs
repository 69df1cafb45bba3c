//! Entity store contract for tournaments, players and matches.
//!
//! Reads return `None` for unknown ids. Every write is an atomic read-modify-write: the
//! mutation runs against a copy while the store holds its write lock and is committed only
//! when it returns `Ok`, so readers never see a half-applied change and a rejected mutation
//! leaves the entity untouched. Mutations must not call back into the store.

mod memory;

pub use memory::MemStore;

use crate::models::{
    Match, MatchId, Player, PlayerId, Tournament, TournamentError, TournamentId,
};

/// Partial update of one entity.
pub type Mutation<'a, T> = &'a mut dyn FnMut(&mut T) -> Result<(), TournamentError>;

/// Builds new players from the tournament and its current roster (ordered by position).
pub type RosterBuilder<'a> =
    &'a mut dyn FnMut(&Tournament, &[Player]) -> Result<Vec<Player>, TournamentError>;

/// Builds one new player from the tournament and its current roster (ordered by position).
pub type PlayerBuilder<'a> =
    &'a mut dyn FnMut(&Tournament, &[Player]) -> Result<Player, TournamentError>;

/// Builds the bracket from the tournament (mutable, committed with the matches) and its roster.
pub type BracketBuilder<'a> =
    &'a mut dyn FnMut(&mut Tournament, &[Player]) -> Result<Vec<Match>, TournamentError>;

pub trait EntityStore: Send + Sync {
    fn create_tournament(&self, tournament: Tournament) -> Result<Tournament, TournamentError>;
    fn get_tournament(&self, id: TournamentId) -> Option<Tournament>;
    fn update_tournament(
        &self,
        id: TournamentId,
        apply: Mutation<'_, Tournament>,
    ) -> Result<Tournament, TournamentError>;
    /// Remove the tournament together with its players and matches.
    fn delete_tournament(&self, id: TournamentId) -> Result<(), TournamentError>;

    /// Append the single player produced by `build`.
    fn add_player(
        &self,
        tournament_id: TournamentId,
        build: PlayerBuilder<'_>,
    ) -> Result<Player, TournamentError>;
    /// Append the players produced by `build`, all or none.
    fn add_players(
        &self,
        tournament_id: TournamentId,
        build: RosterBuilder<'_>,
    ) -> Result<Vec<Player>, TournamentError>;
    fn get_player(&self, id: PlayerId) -> Option<Player>;
    /// Players of a tournament ordered by position.
    fn list_players(&self, tournament_id: TournamentId) -> Vec<Player>;
    fn update_player(
        &self,
        id: PlayerId,
        apply: Mutation<'_, Player>,
    ) -> Result<Player, TournamentError>;
    /// Remove a player once `allow` accepts the owning tournament.
    fn delete_player(
        &self,
        id: PlayerId,
        allow: &dyn Fn(&Tournament) -> Result<(), TournamentError>,
    ) -> Result<(), TournamentError>;

    /// Insert the matches produced by `build` and commit the tournament it mutated, all or none.
    fn create_bracket(
        &self,
        tournament_id: TournamentId,
        build: BracketBuilder<'_>,
    ) -> Result<Vec<Match>, TournamentError>;
    fn get_match(&self, id: MatchId) -> Option<Match>;
    /// Matches of a tournament ordered by (round, position).
    fn list_matches(&self, tournament_id: TournamentId) -> Vec<Match>;
    fn find_match(&self, tournament_id: TournamentId, round: u32, position: u32) -> Option<Match>;
    fn update_match(&self, id: MatchId, apply: Mutation<'_, Match>)
        -> Result<Match, TournamentError>;
}
