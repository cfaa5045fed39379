use scoreboard_core::store::{BOARDS_KEY, DARK_MODE_KEY, POINT_LABEL_KEY};
use scoreboard_core::{
    CoreConfig, KeyValueStore, MemoryKvStore, ScoreboardService, SqliteKvStore,
};

#[test]
fn every_board_change_writes_through_to_the_store() {
    let mut service = ScoreboardService::open(MemoryKvStore::new(), CoreConfig::default()).unwrap();
    let board = service.active_board_id();
    service.add_person(board, "Alice", "10").unwrap();

    let raw = service.store().backend().get(BOARDS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let boards = value.as_array().unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0]["name"], "Main Scoreboard");
    assert_eq!(boards[0]["people"][0]["name"], "Alice");
    assert_eq!(boards[0]["people"][0]["points"], 10);
    assert!(boards[0]["people"][0]["id"].is_string());
    assert!(boards[0]["created"].is_i64());
}

#[test]
fn session_reopens_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoreboard.sqlite3");

    let (league_id, alice_id) = {
        let store = SqliteKvStore::open(&path).unwrap();
        let mut service = ScoreboardService::open(store, CoreConfig::default()).unwrap();
        let league = service.create_board("League").unwrap();
        let alice = service.add_person(league.id, "Alice", "12").unwrap();
        service.set_dark_mode(true);
        service.set_point_label("goals");
        (league.id, alice.id)
    };

    let store = SqliteKvStore::open(&path).unwrap();
    let mut service = ScoreboardService::open(store, CoreConfig::default()).unwrap();
    let names: Vec<_> = service
        .list_boards()
        .iter()
        .map(|board| board.name.as_str())
        .collect();
    assert_eq!(names, vec!["Main Scoreboard", "League"]);
    assert_ne!(service.active_board_id(), league_id);

    service.set_active_board(league_id);
    assert_eq!(service.active_board().people[0].id, alice_id);
    assert!(service.settings().dark_mode);
    assert_eq!(service.settings().point_label, "goals");
    assert!(!service.can_undo());
    assert!(!service.persistence_degraded());
}

#[test]
fn settings_use_literal_stored_values() {
    let mut service = ScoreboardService::open(MemoryKvStore::new(), CoreConfig::default()).unwrap();
    service.set_dark_mode(false);
    service.set_point_label("");

    let backend = service.store().backend();
    assert_eq!(backend.get(DARK_MODE_KEY).unwrap().as_deref(), Some("false"));
    assert_eq!(backend.get(POINT_LABEL_KEY).unwrap().as_deref(), Some("points"));
    assert_eq!(service.settings().point_label, "points");
}

#[test]
fn empty_board_payload_is_replaced_by_default_board() {
    let backend = MemoryKvStore::new().with_entry(BOARDS_KEY, "[]");
    let service = ScoreboardService::open(backend, CoreConfig::default()).unwrap();
    assert_eq!(service.active_board().name, "Main Scoreboard");
    assert!(!service.persistence_degraded());

    let raw = service.store().backend().get(BOARDS_KEY).unwrap().unwrap();
    assert!(raw.contains("Main Scoreboard"));
}

#[test]
fn unreadable_board_payload_is_never_overwritten() {
    let payload = r#"{"boards": "not an array""#;
    let backend = MemoryKvStore::new().with_entry(BOARDS_KEY, payload);
    let mut service = ScoreboardService::open(backend, CoreConfig::default()).unwrap();
    assert_eq!(service.list_boards().len(), 1);
    assert_eq!(service.active_board().name, "Main Scoreboard");
    assert!(service.persistence_degraded());

    let board = service.active_board_id();
    service.add_person(board, "Alice", "10").unwrap();
    service.create_board("Second").unwrap();
    assert_eq!(service.list_boards().len(), 2);

    let raw = service.store().backend().get(BOARDS_KEY).unwrap().unwrap();
    assert_eq!(raw, payload);
}

#[test]
fn boards_saved_with_iso_timestamps_load_intact() {
    let payload = r#"[{"id":1700000000000,"name":"Office","people":[{"name":"Sam","points":7,"created":1700000000500}],"created":"2023-11-14T22:13:20.000Z"}]"#;
    let backend = MemoryKvStore::new().with_entry(BOARDS_KEY, payload);
    let mut service = ScoreboardService::open(backend, CoreConfig::default()).unwrap();

    assert!(!service.persistence_degraded());
    let board = service.active_board();
    assert_eq!(board.name, "Office");
    assert_eq!(board.created, 1_700_000_000_000);
    assert_eq!(board.people[0].name, "Sam");

    let board_id = board.id;
    service.add_person(board_id, "Kim", "1").unwrap();
    let raw = service.store().backend().get(BOARDS_KEY).unwrap().unwrap();
    assert!(raw.contains("Sam") && raw.contains("Kim"));
    assert!(raw.contains("\"created\":1700000000000"));
}

#[test]
fn legacy_people_without_ids_load_with_fresh_ids() {
    let payload = r#"[{"id":1,"name":"Board A","people":[{"name":"Sam","points":5,"created":1}],"created":1}]"#;
    let backend = MemoryKvStore::new().with_entry(BOARDS_KEY, payload);
    let service = ScoreboardService::open(backend, CoreConfig::default()).unwrap();
    let sam = &service.active_board().people[0];
    assert_eq!(sam.name, "Sam");
    assert_eq!(sam.points, 5);
    assert!(!sam.id.is_nil());
}

#[test]
fn configured_default_board_name_is_used() {
    let config = CoreConfig {
        default_board_name: "Office League".to_string(),
        ..CoreConfig::default()
    };
    let service = ScoreboardService::open(MemoryKvStore::new(), config).unwrap();
    assert_eq!(service.active_board().name, "Office League");
}

#[test]
fn store_failures_degrade_without_losing_in_memory_state() {
    let mut service = ScoreboardService::open(MemoryKvStore::new(), CoreConfig::default()).unwrap();
    service.store_mut().backend_mut().fail_writes(true);

    let board = service.active_board_id();
    service.add_person(board, "Alice", "10").unwrap();
    service.set_dark_mode(true);

    assert!(service.persistence_degraded());
    assert_eq!(service.active_board().people.len(), 1);
    assert!(service.settings().dark_mode);
    assert!(service.can_undo());

    let raw = service.store().backend().get(BOARDS_KEY).unwrap().unwrap();
    assert!(!raw.contains("Alice"));
}

#[test]
fn invalid_dark_mode_text_marks_session_degraded() {
    let backend = MemoryKvStore::new().with_entry(DARK_MODE_KEY, "maybe");
    let service = ScoreboardService::open(backend, CoreConfig::default()).unwrap();
    assert!(!service.settings().dark_mode);
    assert!(service.persistence_degraded());
}
