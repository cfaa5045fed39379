use scoreboard_core::{
    ClampPolicy, CoreConfig, CoreEvent, MemoryKvStore, NotificationKind, RepoError,
    ScoreboardService, ServiceError, ValidationError,
};

fn service() -> ScoreboardService<MemoryKvStore> {
    ScoreboardService::open(MemoryKvStore::new(), CoreConfig::default()).unwrap()
}

fn error_messages(service: &mut ScoreboardService<MemoryKvStore>) -> Vec<String> {
    service
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            CoreEvent::Notification(note) if note.kind == NotificationKind::Error => {
                Some(note.message)
            }
            _ => None,
        })
        .collect()
}

#[test]
fn fresh_session_starts_with_main_scoreboard() {
    let service = service();
    assert_eq!(service.list_boards().len(), 1);
    assert_eq!(service.active_board().name, "Main Scoreboard");
    assert!(service.active_board().people.is_empty());
}

#[test]
fn duplicate_name_is_rejected_case_insensitively() {
    let mut service = service();
    let board = service.active_board_id();
    service.add_person(board, "Alice", "10").unwrap();
    service.drain_events();

    let err = service.add_person(board, "  aLiCe ", "3").unwrap_err();
    assert_eq!(
        err,
        ServiceError::Repo(RepoError::Validation(ValidationError::DuplicateName))
    );
    assert_eq!(service.active_board().people.len(), 1);
    assert_eq!(
        error_messages(&mut service),
        vec!["A person with this name already exists".to_string()]
    );
}

#[test]
fn blank_names_and_bad_points_are_rejected() {
    let mut service = service();
    let board = service.active_board_id();

    assert!(service.add_person(board, "   ", "1").is_err());
    assert!(service.add_person(board, "Bob", "").is_err());
    assert!(service.add_person(board, "Bob", "abc").is_err());
    assert!(service
        .add_person(board, "ThisNameIsWayTooLongToFit", "1")
        .is_err());
    assert!(service.active_board().people.is_empty());
    assert!(!service.can_undo());

    let messages = error_messages(&mut service);
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], "Please fill in all fields correctly");
}

#[test]
fn added_person_is_trimmed_and_timestamped() {
    let mut service = service();
    let board = service.active_board_id();
    let person = service.add_person(board, "  Alice  ", "10").unwrap();
    assert_eq!(person.name, "Alice");
    assert_eq!(person.points, 10);
    assert!(person.created > 0);
}

#[test]
fn create_board_requires_a_name_and_activates_the_new_board() {
    let mut service = service();
    let err = service.create_board("  ").unwrap_err();
    assert_eq!(
        err,
        ServiceError::Repo(RepoError::Validation(ValidationError::BlankBoardName))
    );
    assert_eq!(service.list_boards().len(), 1);

    let board = service.create_board(" League ").unwrap();
    assert_eq!(board.name, "League");
    assert_eq!(service.active_board_id(), board.id);
    assert_eq!(service.list_boards().len(), 2);
}

#[test]
fn deleting_the_last_board_is_an_invariant_violation() {
    let mut service = service();
    let only = service.active_board_id();

    let err = service.delete_board(only).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::InvariantViolation(_))
    ));
    assert_eq!(service.list_boards().len(), 1);
    assert_eq!(
        error_messages(&mut service),
        vec!["Cannot delete the last board".to_string()]
    );
}

#[test]
fn deleting_active_board_falls_back_to_first_remaining() {
    let mut service = service();
    let first = service.active_board_id();
    let second = service.create_board("Second").unwrap().id;
    let third = service.create_board("Third").unwrap().id;
    assert_eq!(service.active_board_id(), third);

    service.delete_board(third).unwrap();
    assert_eq!(service.active_board_id(), first);

    service.set_active_board(second);
    service.delete_board(first).unwrap();
    assert_eq!(service.active_board_id(), second);
    assert_eq!(service.list_boards().len(), 1);
}

#[test]
fn deleting_inactive_board_keeps_active_board_and_history() {
    let mut service = service();
    let main = service.active_board_id();
    let other = service.create_board("Other").unwrap().id;
    service.set_active_board(main);
    service.add_person(main, "Sam", "5").unwrap();
    assert!(service.can_undo());

    service.delete_board(other).unwrap();
    assert_eq!(service.active_board_id(), main);
    assert!(service.can_undo());
}

#[test]
fn update_and_delete_address_people_by_stable_id() {
    let mut service = service();
    let board = service.active_board_id();
    let alice = service.add_person(board, "Alice", "10").unwrap();
    let bob = service.add_person(board, "Bob", "20").unwrap();

    let updated = service.update_person(board, alice.id, "Alicia", "15").unwrap();
    assert_eq!(updated.id, alice.id);
    assert_eq!(updated.created, alice.created);

    service.delete_person(board, alice.id).unwrap();
    let people = &service.active_board().people;
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].id, bob.id);
    assert_eq!(service.person_id_at(0), Some(bob.id));
}

#[test]
fn mutating_an_unknown_person_reports_not_found() {
    let mut service = service();
    let board = service.active_board_id();
    let ghost = uuid::Uuid::new_v4();
    assert_eq!(
        service.adjust_points(board, ghost, 1).unwrap_err(),
        ServiceError::Repo(RepoError::PersonNotFound(ghost))
    );
}

#[test]
fn reset_and_clear_are_silent_on_empty_boards() {
    let mut service = service();
    let board = service.active_board_id();
    service.reset_all_points(board).unwrap();
    service.clear_people(board).unwrap();
    assert!(service.drain_events().is_empty());
    assert!(!service.can_undo());
}

#[test]
fn reset_zeroes_everyone_and_clear_empties_the_board() {
    let mut service = service();
    let board = service.active_board_id();
    service.add_person(board, "Alice", "10").unwrap();
    service.add_person(board, "Bob", "20").unwrap();

    service.reset_all_points(board).unwrap();
    assert!(service.active_board().people.iter().all(|p| p.points == 0));

    service.clear_people(board).unwrap();
    assert!(service.active_board().people.is_empty());
}

#[test]
fn clamp_policy_can_be_switched_at_runtime() {
    let config = CoreConfig {
        clamp_policy: ClampPolicy::Unbounded,
        ..CoreConfig::default()
    };
    let mut service = ScoreboardService::open(MemoryKvStore::new(), config).unwrap();
    assert_eq!(service.clamp_policy(), ClampPolicy::Unbounded);
    service.set_clamp_policy(ClampPolicy::FloorAtZero);
    assert_eq!(service.clamp_policy(), ClampPolicy::FloorAtZero);
}
