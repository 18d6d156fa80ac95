use super::*;

use shared::{domain::ContainerId, error::ErrorCode};
use tier_engine::AssignmentCoordinator;

#[test]
fn parses_records_and_filters_incomplete_ones() {
    let raw = r#"[
        {"id": "a", "title": "Alpha", "coverBase64": "data:a", "rating": 5},
        {"id": "b", "title": "Beta", "cover": "data:b"},
        {"id": "c", "title": "", "cover": "data:c"},
        {"title": "No id", "cover": "data:d"},
        {"id": "e", "title": "Epsilon"},
        {"id": 7, "title": "Numeric id", "cover": "data:f"},
        "not even an object"
    ]"#;

    let entries = parse_import(raw).expect("parse");
    let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(entries[0].rating, Some(5));
    assert_eq!(entries[0].cover, "data:a");
    assert_eq!(entries[1].rating, None);
}

#[test]
fn rejects_non_array_top_level() {
    let err = parse_import(r#"{"bangumis": []}"#).expect_err("object should fail");
    assert_eq!(err.code(), ErrorCode::Validation);
    assert!(err.to_string().contains("expected an array"));
}

#[test]
fn rejects_malformed_json() {
    let err = parse_import("[{").expect_err("truncated json");
    assert_eq!(err.code(), ErrorCode::Validation);
}

#[test]
fn fractional_ratings_are_dropped_but_entry_kept() {
    let entries =
        parse_import(r#"[{"id":"a","title":"A","cover":"c","rating":4.5}]"#).expect("parse");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].rating, None);
}

#[test]
fn export_records_round_trip_membership() {
    let mut coordinator = AssignmentCoordinator::default();
    let _ = coordinator.import_entries(
        parse_import(
            r#"[
                {"id":"a","title":"A","cover":"c","rating":5},
                {"id":"b","title":"B","cover":"c","rating":2},
                {"id":"c","title":"C","cover":"c"}
            ]"#,
        )
        .expect("parse"),
    );
    let _ = coordinator.move_entry(
        &EntryId::from("c"),
        &ContainerId::Unassigned,
        &ContainerId::tier("tier-b"),
        Some(0),
    );

    let json = records_json(coordinator.board()).expect("json");
    let mut reloaded = AssignmentCoordinator::default();
    let _ = reloaded.import_entries(parse_import(&json).expect("reparse"));

    assert_eq!(reloaded.board(), coordinator.board());
}

#[test]
fn ratings_follow_export_positions() {
    let mut coordinator = AssignmentCoordinator::default();
    let _ = coordinator.add_entry(Entry::new(EntryId::from("x"), "X", "c"));
    let _ = coordinator.move_entry(
        &EntryId::from("x"),
        &ContainerId::Unassigned,
        &ContainerId::tier("tier-c"),
        None,
    );
    let ratings = ratings_from_export(&coordinator.board().export());
    assert_eq!(ratings.get(&EntryId::from("x")), Some(&2));
    assert_eq!(ratings.len(), 1);
}

#[test]
fn rerate_from_export_orders_listed_entries_first() {
    let mut coordinator = AssignmentCoordinator::default();
    for id in ["p", "q", "r"] {
        let _ = coordinator.add_entry(Entry::new(EntryId::from(id), id, "c"));
    }
    let _ = coordinator.move_entry(
        &EntryId::from("r"),
        &ContainerId::Unassigned,
        &ContainerId::tier("tier-s"),
        None,
    );
    let snapshot = coordinator.board().export();

    let stale = vec![
        Entry::new(EntryId::from("p"), "p", "c").with_rating(1),
        Entry::new(EntryId::from("r"), "r", "c"),
    ];
    let rerated = rerate_from_export(&snapshot, stale);

    assert_eq!(rerated[0].id.as_str(), "r");
    assert_eq!(rerated[0].rating, Some(5));
    assert_eq!(rerated[1].id.as_str(), "p");
    assert_eq!(rerated[1].rating, Some(1));
}

#[test]
fn export_json_names_tiers_and_entry_ids() {
    let mut coordinator = AssignmentCoordinator::default();
    let z = Entry::new(EntryId::from("z"), "Z", "c").with_rating(0);
    let _ = coordinator.import_entries(vec![z]);

    let json = export_json(&coordinator.board().export()).expect("json");
    let value: Value = serde_json::from_str(&json).expect("valid json");
    let tiers = value["tiers"].as_array().expect("tiers array");
    assert_eq!(tiers.len(), 6);
    assert_eq!(tiers[5]["id"], "tier-f");
    assert_eq!(tiers[5]["name"], "F");
    assert_eq!(tiers[5]["items"][0], "z");
}

#[test]
fn layout_json_lists_pool_members_with_stale_ratings() {
    let mut coordinator = AssignmentCoordinator::default();
    let _ = coordinator.add_entry(Entry::new(EntryId::from("x"), "X", "c").with_rating(4));

    let layout = parse_layout(&layout_json(coordinator.board()).expect("json")).expect("parse");
    assert_eq!(layout.unassigned, vec![EntryId::from("x")]);
    assert!(layout.snapshot.tiers.iter().all(|tier| tier.items.is_empty()));

    let err = parse_layout("[]").expect_err("not a layout");
    assert_eq!(err.code(), ErrorCode::Validation);
}
