//! Tournament business logic: setup, roster, bracket generation, match lifecycle, advancement.

mod advancement;
mod bracket;
mod lifecycle;
mod roster;
mod setup;

pub use advancement::{advance_winner, tournament_champion, NextSlot};
pub use bracket::{generate_bracket, get_matches_by_round, get_matches_by_tournament, plan_bracket};
pub use lifecycle::{
    complete_match, get_match, start_match, update_match_score, CompleteMatch, ScoreFields,
    SenshuUpdate,
};
pub use roster::{add_player, import_players_csv, list_players, remove_player, rename_player};
pub use setup::{create_tournament, delete_tournament, get_tournament, update_tournament_status};
