use scoreboard_core::{
    Achievement, ClampPolicy, CoreConfig, CoreEvent, MemoryKvStore, NotificationKind,
    ScoreboardService,
};

fn service_with(policy: ClampPolicy) -> ScoreboardService<MemoryKvStore> {
    let config = CoreConfig {
        clamp_policy: policy,
        ..CoreConfig::default()
    };
    ScoreboardService::open(MemoryKvStore::new(), config).unwrap()
}

#[test]
fn plus_ten_then_minus_ten_is_net_zero_under_both_policies() {
    for policy in [ClampPolicy::FloorAtZero, ClampPolicy::Unbounded] {
        let mut service = service_with(policy);
        let board = service.active_board_id();
        let person = service.add_person(board, "Alice", "42").unwrap();

        service.adjust_points(board, person.id, 10).unwrap();
        let after = service.adjust_points(board, person.id, -10).unwrap();
        assert_eq!(after.points, 42);
    }
}

#[test]
fn floor_policy_stops_at_zero() {
    let mut service = service_with(ClampPolicy::FloorAtZero);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "3").unwrap();
    let after = service.adjust_points(board, person.id, -10).unwrap();
    assert_eq!(after.points, 0);
}

#[test]
fn unbounded_policy_goes_negative() {
    let mut service = service_with(ClampPolicy::Unbounded);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "3").unwrap();
    let after = service.adjust_points(board, person.id, -10).unwrap();
    assert_eq!(after.points, -7);
    let after = service.adjust_points(board, person.id, 1).unwrap();
    assert_eq!(after.points, -6);
}

#[test]
fn entered_points_are_floored_regardless_of_policy() {
    let mut service = service_with(ClampPolicy::Unbounded);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "-20").unwrap();
    assert_eq!(person.points, 0);
}

#[test]
fn adjust_announces_signed_delta_with_point_label() {
    let mut service = service_with(ClampPolicy::FloorAtZero);
    service.set_point_label("goals");
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "3").unwrap();
    service.drain_events();

    service.adjust_points(board, person.id, 10).unwrap();
    service.adjust_points(board, person.id, -1).unwrap();
    let messages: Vec<_> = service
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            CoreEvent::Notification(note) => {
                assert_eq!(note.kind, NotificationKind::Info);
                Some(note.message)
            }
            _ => None,
        })
        .collect();
    assert_eq!(messages, vec!["+10 goals".to_string(), "-1 goals".to_string()]);
}

#[test]
fn crossing_one_hundred_unlocks_century_club_once() {
    let mut service = service_with(ClampPolicy::FloorAtZero);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "95").unwrap();
    service.drain_events();

    service.adjust_points(board, person.id, 10).unwrap();
    let events = service.drain_events();
    assert!(events.contains(&CoreEvent::AchievementUnlocked(Achievement::CenturyClub)));
    assert!(events.contains(&CoreEvent::Celebrate));

    service.adjust_points(board, person.id, 10).unwrap();
    assert!(!service
        .drain_events()
        .iter()
        .any(|event| matches!(event, CoreEvent::AchievementUnlocked(_))));
}

#[test]
fn editing_points_past_one_hundred_also_unlocks() {
    let mut service = service_with(ClampPolicy::FloorAtZero);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "50").unwrap();
    service.drain_events();

    service.update_person(board, person.id, "Alice", "150").unwrap();
    assert!(service
        .drain_events()
        .contains(&CoreEvent::AchievementUnlocked(Achievement::CenturyClub)));
}

#[test]
fn achievements_never_change_state() {
    let mut service = service_with(ClampPolicy::FloorAtZero);
    let board = service.active_board_id();
    let person = service.add_person(board, "Alice", "99").unwrap();
    let after = service.adjust_points(board, person.id, 1).unwrap();
    assert_eq!(after.points, 100);
    assert_eq!(service.active_board().people[0].points, 100);
}
