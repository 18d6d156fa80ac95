use super::*;

use shared::domain::Entry;

fn seeded(pool: &[&str]) -> AssignmentCoordinator {
    let mut coordinator = AssignmentCoordinator::default();
    for id in pool {
        let _ = coordinator.add_entry(Entry::new(EntryId::from(*id), *id, "data:"));
    }
    coordinator
}

fn laid_out(coordinator: &AssignmentCoordinator, container: &ContainerId) -> Vec<Candidate> {
    coordinator
        .board()
        .items(container)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Candidate::new(entry.id.clone(), Point::new(50.0 + 100.0 * i as f64, 50.0))
        })
        .collect()
}

fn pool_ids(coordinator: &AssignmentCoordinator) -> Vec<String> {
    coordinator
        .board()
        .unassigned()
        .iter()
        .map(|e| e.id.to_string())
        .collect()
}

#[test]
fn drop_outside_containers_is_ignored() {
    let mut coordinator = seeded(&["a"]);
    let session = DragSession::entry(&EntryId::from("a"), ContainerId::Unassigned);
    let outcome = resolve_drop(&mut coordinator, &session, Point::new(0.0, 0.0), None);
    assert_eq!(outcome, Outcome::Unchanged(NoOpReason::OutsideContainers));
    assert_eq!(pool_ids(&coordinator), ["a"]);
}

#[test]
fn entry_dropped_into_tier_lands_before_nearest_item() {
    let mut coordinator = seeded(&["a", "b", "c"]);
    let tier_s = ContainerId::tier("tier-s");
    let _ = coordinator.move_entry(&EntryId::from("a"), &ContainerId::Unassigned, &tier_s, None);
    let _ = coordinator.move_entry(&EntryId::from("b"), &ContainerId::Unassigned, &tier_s, None);

    let candidates = laid_out(&coordinator, &tier_s);
    let session = DragSession::entry(&EntryId::from("c"), ContainerId::Unassigned);
    let target = DropTarget::new(&tier_s, &candidates, Orientation::ColumnMajor);
    // Slightly left of b's center.
    let outcome = resolve_drop(&mut coordinator, &session, Point::new(140.0, 50.0), Some(target));

    assert!(outcome.is_applied());
    let items: Vec<_> = coordinator.board().tiers()[0]
        .items
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(items, ["a", "c", "b"]);
    assert_eq!(coordinator.board().tiers()[0].items[1].rating, Some(5));
}

#[test]
fn reordering_inside_a_tier_moves_entry_forward() {
    let mut coordinator = seeded(&["a", "b", "c"]);
    let tier_b = ContainerId::tier("tier-b");
    for id in ["a", "b", "c"] {
        let _ = coordinator.move_entry(&EntryId::from(id), &ContainerId::Unassigned, &tier_b, None);
    }

    // Rendered a@50, b@150, c@250; drag a and release just left of c.
    let candidates = laid_out(&coordinator, &tier_b);
    let session = DragSession::entry(&EntryId::from("a"), tier_b.clone());
    let target = DropTarget::new(&tier_b, &candidates, Orientation::ColumnMajor);
    let outcome = resolve_drop(&mut coordinator, &session, Point::new(240.0, 50.0), Some(target));

    assert!(outcome.is_applied());
    let items: Vec<_> = coordinator.board().tiers()[2]
        .items
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(items, ["b", "a", "c"]);
}

#[test]
fn pool_appends_entries_arriving_from_tiers() {
    let mut coordinator = seeded(&["a", "b", "c"]);
    let tier_d = ContainerId::tier("tier-d");
    let _ = coordinator.move_entry(&EntryId::from("c"), &ContainerId::Unassigned, &tier_d, None);

    let candidates = laid_out(&coordinator, &ContainerId::Unassigned);
    let session = DragSession::entry(&EntryId::from("c"), tier_d);
    let target = DropTarget::new(
        &ContainerId::Unassigned,
        &candidates,
        Orientation::ColumnMajor,
    );
    let outcome = resolve_drop(&mut coordinator, &session, Point::new(10.0, 50.0), Some(target));

    assert!(outcome.is_applied());
    assert_eq!(pool_ids(&coordinator), ["a", "b", "c"]);
    assert_eq!(coordinator.board().unassigned()[2].rating, Some(1));
}

#[test]
fn pool_reorders_its_own_entries() {
    let mut coordinator = seeded(&["a", "b", "c"]);
    let candidates = laid_out(&coordinator, &ContainerId::Unassigned);
    let session = DragSession::entry(&EntryId::from("c"), ContainerId::Unassigned);
    let target = DropTarget::new(
        &ContainerId::Unassigned,
        &candidates,
        Orientation::ColumnMajor,
    );
    let outcome = resolve_drop(&mut coordinator, &session, Point::new(10.0, 50.0), Some(target));

    assert!(outcome.is_applied());
    assert_eq!(pool_ids(&coordinator), ["c", "a", "b"]);
}

#[test]
fn tier_drag_onto_tier_reorders_registry() {
    let mut coordinator = AssignmentCoordinator::default();
    let tier_c = ContainerId::tier("tier-c");
    let session = DragSession::from_json(r#"{"id":"tier-f","type":"TIER"}"#).expect("payload");
    let outcome = resolve_drop(
        &mut coordinator,
        &session,
        Point::default(),
        Some(DropTarget::new(&tier_c, &[], Orientation::RowMajor)),
    );

    assert!(outcome.is_applied());
    let names: Vec<_> = coordinator
        .board()
        .tiers()
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, ["S", "A", "B", "F", "C", "D"]);
}

#[test]
fn tier_drag_onto_pool_is_ignored() {
    let mut coordinator = AssignmentCoordinator::default();
    let session = DragSession::tier(&TierId::from("tier-s"));
    let outcome = resolve_drop(
        &mut coordinator,
        &session,
        Point::default(),
        Some(DropTarget::new(
            &ContainerId::Unassigned,
            &[],
            Orientation::RowMajor,
        )),
    );
    assert_eq!(outcome, Outcome::Unchanged(NoOpReason::TierOutsideRegistry));
}

#[test]
fn entry_payload_without_source_is_ignored() {
    let mut coordinator = seeded(&["a"]);
    let session = DragSession::from_json(r#"{"id":"a","type":"ENTRY"}"#).expect("payload");
    let tier_s = ContainerId::tier("tier-s");
    let outcome = resolve_drop(
        &mut coordinator,
        &session,
        Point::default(),
        Some(DropTarget::new(&tier_s, &[], Orientation::RowMajor)),
    );
    assert_eq!(outcome, Outcome::Unchanged(NoOpReason::MissingSource));
}

#[test]
fn malformed_payload_yields_no_session() {
    assert!(DragSession::from_json("").is_none());
    assert!(DragSession::from_json(r#"{"id":1}"#).is_none());
}
