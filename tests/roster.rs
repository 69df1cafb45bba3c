//! Integration tests for player registration and tournament-level changes.

mod common;

use common::{kumite_bracket, tournament_with_players};
use karate_bracket_web::{
    add_player, create_tournament, delete_tournament, get_tournament, import_players_csv,
    list_players, remove_player, rename_player, update_tournament_status, BeltColor, EntityStore,
    MemStore, TournamentError, TournamentStatus, TournamentType,
};

#[test]
fn players_get_positions_and_alternating_belts() {
    let store = MemStore::new();
    let (t, players) = tournament_with_players(&store, TournamentType::Kumite, 4, None, 3);

    let positions: Vec<u32> = players.iter().map(|p| p.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert_eq!(players[0].belt_color, BeltColor::Red);
    assert_eq!(players[1].belt_color, BeltColor::Blue);
    assert_eq!(players[2].belt_color, BeltColor::Red);

    let chosen = add_player(&store, t.id, "  Kenji  ", Some(BeltColor::Red)).unwrap();
    assert_eq!(chosen.position, 4);
    assert_eq!(chosen.belt_color, BeltColor::Red);
    assert_eq!(chosen.name, "Kenji");
}

#[test]
fn roster_never_exceeds_size() {
    let store = MemStore::new();
    let (t, _) = tournament_with_players(&store, TournamentType::Kumite, 2, None, 2);
    assert_eq!(
        add_player(&store, t.id, "Late", None),
        Err(TournamentError::TournamentFull { size: 2 })
    );
    assert_eq!(list_players(&store, t.id).unwrap().len(), 2);
}

#[test]
fn roster_is_frozen_once_bracket_exists() {
    let store = MemStore::new();
    let (t, players, _) = kumite_bracket(&store, 2);
    let frozen = Err(TournamentError::InvalidState {
        expected: TournamentStatus::Setup,
        actual: TournamentStatus::Active,
    });
    assert_eq!(add_player(&store, t.id, "Late", None).map(|_| ()), frozen);
    assert_eq!(remove_player(&store, players[0].id), frozen);
    assert_eq!(list_players(&store, t.id).unwrap(), players);
}

#[test]
fn removed_positions_are_not_reused() {
    let store = MemStore::new();
    let (t, players) = tournament_with_players(&store, TournamentType::Kata, 4, None, 3);
    remove_player(&store, players[2].id).unwrap();
    remove_player(&store, players[0].id).unwrap();

    let added = add_player(&store, t.id, "Aiko", None).unwrap();
    assert_eq!(added.position, 4);

    let positions: Vec<u32> = list_players(&store, t.id)
        .unwrap()
        .iter()
        .map(|p| p.position)
        .collect();
    assert_eq!(positions, vec![2, 4]);
    assert_eq!(
        remove_player(&store, players[0].id),
        Err(TournamentError::PlayerNotFound(players[0].id))
    );
}

#[test]
fn rename_trims_and_rejects_blank_names() {
    let store = MemStore::new();
    let (_, players) = tournament_with_players(&store, TournamentType::Kumite, 2, None, 1);
    let renamed = rename_player(&store, players[0].id, " Hana ").unwrap();
    assert_eq!(renamed.name, "Hana");
    assert_eq!(renamed.position, players[0].position);

    assert_eq!(
        rename_player(&store, players[0].id, "   "),
        Err(TournamentError::EmptyName)
    );
    assert_eq!(store.get_player(players[0].id).unwrap().name, "Hana");
}

#[test]
fn csv_import_adds_every_row() {
    let store = MemStore::new();
    let t = create_tournament(&store, "Kata Cup", TournamentType::Kata, 4, None).unwrap();
    let csv = "name,belt_color\nAiko,blue\n Ren ,\nSora,red\n";

    let added = import_players_csv(&store, t.id, csv.as_bytes()).unwrap();
    let summary: Vec<(&str, u32, BeltColor)> = added
        .iter()
        .map(|p| (p.name.as_str(), p.position, p.belt_color))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Aiko", 1, BeltColor::Blue),
            ("Ren", 2, BeltColor::Blue),
            ("Sora", 3, BeltColor::Red),
        ]
    );
}

#[test]
fn csv_import_is_all_or_nothing() {
    let store = MemStore::new();
    let (t, _) = tournament_with_players(&store, TournamentType::Kumite, 4, None, 2);

    let no_name = "player,belt_color\nAiko,red\n";
    assert!(matches!(
        import_players_csv(&store, t.id, no_name.as_bytes()),
        Err(TournamentError::InvalidCsv(_))
    ));

    let blank_row = "name\nAiko\n   \n";
    assert_eq!(
        import_players_csv(&store, t.id, blank_row.as_bytes()),
        Err(TournamentError::EmptyName)
    );

    let too_many = "name\nAiko\nRen\nSora\n";
    assert_eq!(
        import_players_csv(&store, t.id, too_many.as_bytes()),
        Err(TournamentError::TournamentFull { size: 4 })
    );

    assert!(matches!(
        import_players_csv(&store, t.id, "name\n".as_bytes()),
        Err(TournamentError::InvalidCsv(_))
    ));
    assert_eq!(list_players(&store, t.id).unwrap().len(), 2);
}

#[test]
fn status_only_moves_forward() {
    let store = MemStore::new();
    let (t, _) = tournament_with_players(&store, TournamentType::Kumite, 4, None, 4);
    assert_eq!(
        update_tournament_status(&store, t.id, TournamentStatus::Active, None),
        Err(TournamentError::StatusTransition {
            from: TournamentStatus::Setup,
            to: TournamentStatus::Active
        })
    );

    let (t, _, _) = kumite_bracket(&store, 4);
    assert_eq!(
        update_tournament_status(&store, t.id, TournamentStatus::Active, Some(3)),
        Err(TournamentError::InvalidRound {
            round: 3,
            total_rounds: 2
        })
    );
    let moved = update_tournament_status(&store, t.id, TournamentStatus::Active, Some(2)).unwrap();
    assert_eq!(moved.current_round, 2);

    let done = update_tournament_status(&store, t.id, TournamentStatus::Completed, None).unwrap();
    assert_eq!(done.status, TournamentStatus::Completed);
    assert_eq!(
        update_tournament_status(&store, t.id, TournamentStatus::Active, None),
        Err(TournamentError::StatusTransition {
            from: TournamentStatus::Completed,
            to: TournamentStatus::Active
        })
    );
}

#[test]
fn deleting_a_tournament_removes_everything() {
    let store = MemStore::new();
    let (t, players, matches) = kumite_bracket(&store, 4);
    delete_tournament(&store, t.id).unwrap();

    assert_eq!(
        get_tournament(&store, t.id),
        Err(TournamentError::TournamentNotFound(t.id))
    );
    assert!(players.iter().all(|p| store.get_player(p.id).is_none()));
    assert!(matches.iter().all(|m| store.get_match(m.id).is_none()));
    assert_eq!(
        delete_tournament(&store, t.id),
        Err(TournamentError::TournamentNotFound(t.id))
    );
}
