//! Karate bracket web app: library with models, store, business logic and HTTP handlers.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    add_player, advance_winner, complete_match, create_tournament, delete_tournament,
    generate_bracket, get_match, get_matches_by_round, get_matches_by_tournament, get_tournament,
    import_players_csv, list_players, plan_bracket, remove_player, rename_player, start_match,
    tournament_champion, update_match_score, update_tournament_status, CompleteMatch, NextSlot,
    ScoreFields, SenshuUpdate,
};
pub use models::{
    BeltColor, Decision, ErrorKind, KumiteTally, Match, MatchId, MatchStatus, Outcome, Player,
    PlayerId, ScoreCard, Slot, Tournament, TournamentError, TournamentId, TournamentStatus,
    TournamentType,
};
pub use store::{EntityStore, MemStore};
