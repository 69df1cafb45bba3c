//! Builders shared by the integration tests.
#![allow(dead_code)]

use karate_bracket_web::{
    add_player, complete_match, create_tournament, generate_bracket, CompleteMatch, Match,
    MemStore, Player, ScoreFields, Tournament, TournamentType,
};

/// A tournament in Setup with `n` players named P1..Pn.
pub fn tournament_with_players(
    store: &MemStore,
    kind: TournamentType,
    size: u32,
    total_rounds: Option<u32>,
    n: u32,
) -> (Tournament, Vec<Player>) {
    let t = create_tournament(store, "Regional Open", kind, size, total_rounds).unwrap();
    let players = (1..=n)
        .map(|i| add_player(store, t.id, &format!("P{i}"), None).unwrap())
        .collect();
    (t, players)
}

/// A full kumite bracket for `size` players.
pub fn kumite_bracket(store: &MemStore, size: u32) -> (Tournament, Vec<Player>, Vec<Match>) {
    let (t, players) = tournament_with_players(store, TournamentType::Kumite, size, None, size);
    let matches = generate_bracket(store, t.id).unwrap();
    (t, players, matches)
}

/// Player 1 wins on points (one ippon to nothing).
pub fn player1_wins(store: &MemStore, m: &Match) -> Match {
    let request = CompleteMatch {
        winner_id: m.player1_id.unwrap(),
        scores: ScoreFields {
            player1_ippon: Some(1),
            ..Default::default()
        },
    };
    complete_match(store, m.id, &request).unwrap()
}

/// Player 2 wins on points (one wazari to nothing).
pub fn player2_wins(store: &MemStore, m: &Match) -> Match {
    let request = CompleteMatch {
        winner_id: m.player2_id.unwrap(),
        scores: ScoreFields {
            player2_wazari: Some(1),
            ..Default::default()
        },
    };
    complete_match(store, m.id, &request).unwrap()
}
