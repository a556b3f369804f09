use activity_domain::{Activity, ActivityStatus, Board, DragOutcome, DropTarget};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum TargetChoice {
    Column(usize),
    Item(usize),
}

fn arb_status() -> impl Strategy<Value = ActivityStatus> {
    prop_oneof![
        Just(ActivityStatus::Pending),
        Just(ActivityStatus::InProgress),
        Just(ActivityStatus::Done),
    ]
}

fn arb_target() -> impl Strategy<Value = TargetChoice> {
    prop_oneof![
        (0usize..3).prop_map(TargetChoice::Column),
        (0usize..16).prop_map(TargetChoice::Item),
    ]
}

fn board_from(statuses: &[ActivityStatus]) -> Board {
    Board::from_activities(
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Activity::new(format!("a{}", i), format!("Task {}", i), "d", *status))
            .collect(),
    )
}

fn resolve(choice: &TargetChoice, len: usize) -> DropTarget {
    match choice {
        TargetChoice::Column(i) => DropTarget::Container(ActivityStatus::ALL[*i]),
        TargetChoice::Item(i) => DropTarget::item(format!("a{}", i % len)),
    }
}

fn assert_invariants(board: &Board, expected_ids: &HashSet<String>) {
    let ids: Vec<&String> = board.activities().iter().map(|a| &a.id).collect();
    let unique: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();
    assert_eq!(ids.len(), unique.len(), "duplicate ids");
    assert_eq!(&unique, expected_ids, "activity set changed");

    let groups = board.groups();
    assert_eq!(groups.total(), board.len());
    for (status, items) in groups.columns() {
        assert!(items.iter().all(|a| a.status == status));
    }
}

fn column_order(board: &Board) -> Vec<Vec<String>> {
    let groups = board.groups();
    groups
        .columns()
        .map(|(_, items)| items.iter().map(|a| a.id.clone()).collect())
        .collect()
}

proptest! {
    #[test]
    fn hover_paths_preserve_membership(
        statuses in prop::collection::vec(arb_status(), 1..8),
        active in 0usize..16,
        path in prop::collection::vec(arb_target(), 0..12),
    ) {
        let mut board = board_from(&statuses);
        let expected: HashSet<String> =
            board.activities().iter().map(|a| a.id.clone()).collect();
        let active_id = format!("a{}", active % statuses.len());
        board.start_drag(&active_id).unwrap();

        for choice in &path {
            let target = resolve(choice, statuses.len());
            let container = board.container_of(&target).unwrap();
            board.hover(target);
            assert_invariants(&board, &expected);
            prop_assert_eq!(board.get(&active_id).unwrap().status, container);
        }
    }

    #[test]
    fn dropping_on_last_moving_hover_keeps_preview(
        statuses in prop::collection::vec(arb_status(), 1..8),
        active in 0usize..16,
        path in prop::collection::vec(arb_target(), 1..12),
    ) {
        let mut board = board_from(&statuses);
        let expected: HashSet<String> =
            board.activities().iter().map(|a| a.id.clone()).collect();
        let active_id = format!("a{}", active % statuses.len());
        board.start_drag(&active_id).unwrap();

        let mut last_moved = false;
        let mut last_target = None;
        for choice in &path {
            let target = resolve(choice, statuses.len());
            last_moved = board.hover(target.clone());
            last_target = Some(target);
        }
        let preview = column_order(&board);
        let target = last_target.unwrap();
        let container = board.container_of(&target).unwrap();

        let outcome = board.end_drag(Some(target));
        assert_invariants(&board, &expected);
        prop_assert!(!board.is_dragging());
        prop_assert_eq!(board.get(&active_id).unwrap().status, container);
        if last_moved {
            prop_assert_eq!(column_order(&board), preview);
        }

        let origin = board_from(&statuses);
        let changed = column_order(&origin) != column_order(&board);
        prop_assert_eq!(outcome.is_committed(), changed);
    }

    #[test]
    fn release_outside_restores_origin(
        statuses in prop::collection::vec(arb_status(), 1..8),
        active in 0usize..16,
        path in prop::collection::vec(arb_target(), 0..12),
    ) {
        let mut board = board_from(&statuses);
        let before = column_order(&board);
        let active_id = format!("a{}", active % statuses.len());
        board.start_drag(&active_id).unwrap();
        for choice in &path {
            board.hover(resolve(choice, statuses.len()));
        }

        prop_assert_eq!(board.end_drag(None), DragOutcome::Cancelled);
        prop_assert_eq!(column_order(&board), before);
    }
}
