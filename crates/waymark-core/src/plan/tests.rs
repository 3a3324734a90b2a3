//! Tests for the plan state model and trip sessions.

use super::*;
use crate::models::{PlanItem, Section, TripDocument};

fn create_test_trip() -> TripDocument {
    let section = |id: &str, title: &str| Section {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        images: vec![],
        location: None,
        subsections: vec![],
    };
    let mut with_subsections = section("s2", "Second");
    with_subsections.subsections = vec![crate::models::Subsection {
        id: "a".to_string(),
        title: "Sub A".to_string(),
        description: None,
        images: vec![],
        location: None,
    }];

    TripDocument {
        id: "alpine-loop".to_string(),
        title: "Alpine Loop".to_string(),
        sections: vec![section("s1", "First"), with_subsections],
        ..Default::default()
    }
}

/// A plan with `counts[d]` custom items on day `d + 1`.
fn create_filled_plan(counts: &[usize]) -> PlanState {
    let mut plan = PlanState::new("alpine-loop");
    plan.set_day_count(counts.len() as u32).unwrap();
    for (day, count) in counts.iter().enumerate() {
        for n in 0..*count {
            plan.add_item(day as u32 + 1, PlanItem::custom(format!("d{}-{n}", day + 1)))
                .unwrap();
        }
    }
    plan
}

#[test]
fn test_new_plan_has_default_days() {
    let plan = PlanState::new("alpine-loop");
    assert_eq!(plan.day_count(), DEFAULT_DAY_COUNT);
    assert!(plan.is_empty());
    assert_eq!(plan.day(1), Some(&[][..]));
    assert_eq!(plan.day(0), None);
    assert_eq!(plan.day(4), None);
}

#[test]
fn test_add_then_serialize_has_item_last() {
    for day in 1..=3 {
        let mut plan = create_filled_plan(&[2, 1, 0]);
        plan.add_item(day, PlanItem::section("s1")).unwrap();

        let snapshot = plan.serialize();
        let items = &snapshot.days[&day];
        assert_eq!(items.last(), Some(&PlanItem::section("s1")));

        let occurrences = snapshot
            .days
            .values()
            .flatten()
            .filter(|item| **item == PlanItem::section("s1"))
            .count();
        assert_eq!(occurrences, 1);
    }
}

#[test]
fn test_duplicate_section_rejected() {
    let mut plan = PlanState::new("alpine-loop");
    plan.add_item(1, PlanItem::section("s1")).unwrap();

    let err = plan.add_item(1, PlanItem::section("s1")).unwrap_err();
    assert!(matches!(err, WaymarkError::DuplicateItem { day: 1, .. }));
    assert_eq!(plan.day(1).unwrap(), &[PlanItem::section("s1")]);
}

#[test]
fn test_duplicate_across_days_rejected() {
    let mut plan = PlanState::new("alpine-loop");
    plan.add_item(1, PlanItem::subsection("s2", "a")).unwrap();

    let timed = PlanItem::subsection("s2", "a").at(Some("10:00".parse().unwrap()));
    let err = plan.add_item(3, timed).unwrap_err();
    assert!(matches!(err, WaymarkError::DuplicateItem { day: 1, .. }));
    assert_eq!(plan.len(), 1);
}

#[test]
fn test_duplicate_custom_items_allowed() {
    let mut plan = PlanState::new("alpine-loop");
    plan.add_item(1, PlanItem::custom("Lunch")).unwrap();
    plan.add_item(1, PlanItem::custom("Lunch")).unwrap();

    assert_eq!(
        plan.day(1).unwrap(),
        &[PlanItem::custom("Lunch"), PlanItem::custom("Lunch")]
    );
}

#[test]
fn test_add_to_unknown_day_rejected() {
    let mut plan = PlanState::new("alpine-loop");
    let err = plan.add_item(4, PlanItem::custom("Late")).unwrap_err();
    assert!(matches!(err, WaymarkError::DayOutOfRange { day: 4, days: 3 }));
    assert!(plan.add_item(0, PlanItem::custom("Early")).is_err());
    assert!(plan.is_empty());
}

#[test]
fn test_remove_item() {
    let mut plan = create_filled_plan(&[3]);

    let removed = plan.remove_item(1, 1);
    assert_eq!(removed, Some(PlanItem::custom("d1-1")));
    assert_eq!(
        plan.day(1).unwrap(),
        &[PlanItem::custom("d1-0"), PlanItem::custom("d1-2")]
    );
}

#[test]
fn test_remove_out_of_range_is_noop() {
    let mut plan = create_filled_plan(&[1, 0]);
    let before = plan.clone();

    assert_eq!(plan.remove_item(1, 1), None);
    assert_eq!(plan.remove_item(2, 0), None);
    assert_eq!(plan.remove_item(9, 0), None);
    assert_eq!(plan, before);
}

#[test]
fn test_move_preserves_total_count() {
    let counts = [2, 0, 3];
    let total: usize = counts.iter().sum();

    for from_day in 1..=3u32 {
        for from_index in 0..counts[from_day as usize - 1] {
            for to_day in 1..=3u32 {
                let to_len = if from_day == to_day {
                    counts[to_day as usize - 1] - 1
                } else {
                    counts[to_day as usize - 1]
                };
                for to_index in 0..=to_len {
                    let mut plan = create_filled_plan(&counts);
                    let moved = plan.day(from_day).unwrap()[from_index].clone();

                    plan.move_item(Slot::new(from_day, from_index), Slot::new(to_day, to_index))
                        .unwrap();

                    assert_eq!(plan.len(), total);
                    assert_eq!(plan.day(to_day).unwrap()[to_index], moved);
                }
            }
        }
    }
}

#[test]
fn test_move_to_empty_day() {
    let mut plan = PlanState::new("alpine-loop");
    plan.add_item(1, PlanItem::section("s1")).unwrap();

    plan.move_item(Slot::new(1, 0), Slot::new(2, 0)).unwrap();

    assert!(plan.day(1).unwrap().is_empty());
    assert_eq!(plan.day(2).unwrap(), &[PlanItem::section("s1")]);
}

#[test]
fn test_move_reorders_within_day() {
    let mut plan = create_filled_plan(&[3]);

    plan.move_item(Slot::new(1, 0), Slot::new(1, 2)).unwrap();

    assert_eq!(
        plan.day(1).unwrap(),
        &[
            PlanItem::custom("d1-1"),
            PlanItem::custom("d1-2"),
            PlanItem::custom("d1-0"),
        ]
    );
}

#[test]
fn test_invalid_move_leaves_state_untouched() {
    let mut plan = create_filled_plan(&[2, 1]);
    let before = plan.clone();

    assert!(plan.move_item(Slot::new(1, 2), Slot::new(2, 0)).is_err());
    assert!(plan.move_item(Slot::new(1, 0), Slot::new(2, 2)).is_err());
    assert!(plan.move_item(Slot::new(1, 0), Slot::new(1, 2)).is_err());
    assert!(plan.move_item(Slot::new(1, 0), Slot::new(5, 0)).is_err());
    assert_eq!(plan, before);
}

#[test]
fn test_shrink_returns_dropped_items() {
    let mut plan = create_filled_plan(&[1, 2, 1]);
    assert_eq!(plan.items_beyond(1), 3);

    let dropped = plan.set_day_count(1).unwrap();

    assert_eq!(plan.day_count(), 1);
    assert_eq!(dropped.len(), 3);
    assert_eq!(dropped[0], PlanItem::custom("d2-0"));
}

#[test]
fn test_grow_after_shrink_preserves_first_days() {
    for n in 1..=4u32 {
        for m in n..=6u32 {
            let mut plan = create_filled_plan(&[2, 1, 3, 1]);
            plan.set_day_count(n).unwrap();
            let kept = plan.serialize();

            plan.set_day_count(m).unwrap();

            for (day, items) in &kept.days {
                assert_eq!(plan.day(*day).unwrap(), items.as_slice());
            }
            assert_eq!(plan.day_count(), m);
        }
    }
}

#[test]
fn test_day_count_bounds() {
    let mut plan = PlanState::new("alpine-loop");
    assert!(plan.set_day_count(0).is_err());
    assert!(plan.set_day_count(MAX_DAY_COUNT + 1).is_err());
    assert!(plan.set_day_count(MAX_DAY_COUNT).is_ok());
}

#[test]
fn test_round_trip() {
    let mut plan = create_filled_plan(&[1, 0, 2]);
    plan.add_item(2, PlanItem::section("s1").at(Some("08:15".parse().unwrap())))
        .unwrap();
    plan.add_item(2, PlanItem::subsection("s2", "a")).unwrap();

    let mut restored = PlanState::new("alpine-loop");
    restored.deserialize(plan.serialize(), "alpine-loop").unwrap();

    assert_eq!(restored, plan);
}

#[test]
fn test_round_trip_through_json() {
    let mut plan = create_filled_plan(&[1, 1]);
    plan.add_item(1, PlanItem::subsection("s2", "a")).unwrap();

    let json = serde_json::to_string(&plan.serialize()).unwrap();
    let snapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(PlanState::from_snapshot(snapshot, "alpine-loop").unwrap(), plan);
}

#[test]
fn test_foreign_snapshot_rejected() {
    let mut plan = create_filled_plan(&[1, 1]);
    let before = plan.clone();
    let foreign = PlanState::new("mazury").serialize();

    let err = plan.deserialize(foreign, "alpine-loop").unwrap_err();

    assert!(matches!(err, WaymarkError::Validation { .. }));
    assert_eq!(plan, before);
}

#[test]
fn test_malformed_snapshots_rejected() {
    let mut plan = PlanState::new("alpine-loop");

    let mut gap = plan.serialize();
    gap.days.remove(&2);
    assert!(plan.clone().deserialize(gap, "alpine-loop").is_err());

    let mut zero = plan.serialize();
    zero.days.insert(0, vec![]);
    assert!(plan.clone().deserialize(zero, "alpine-loop").is_err());

    let mut empty = plan.serialize();
    empty.days.clear();
    assert!(plan.clone().deserialize(empty, "alpine-loop").is_err());

    let mut twice = plan.serialize();
    twice.days.insert(1, vec![PlanItem::section("s1")]);
    twice.days.insert(2, vec![PlanItem::section("s1")]);
    assert!(plan.deserialize(twice, "alpine-loop").is_err());
    assert!(plan.is_empty());
}

#[test]
fn test_non_array_day_is_structural_error() {
    let json = r#"{"tripId":"alpine-loop","days":{"1":"lunch"}}"#;
    assert!(serde_json::from_str::<PlanSnapshot>(json).is_err());
}

#[test]
fn test_apply_reports_outcomes() {
    let mut plan = PlanState::new("alpine-loop");

    let added = plan
        .apply(PlanIntent::Add {
            day: 2,
            item: PlanItem::custom("Hike"),
        })
        .unwrap();
    assert_eq!(added, Outcome::Added { day: 2, index: 0 });
    assert!(added.is_change());

    let noop = plan.apply(PlanIntent::Remove { day: 1, index: 0 }).unwrap();
    assert_eq!(noop, Outcome::Unchanged);
    assert!(!noop.is_change());

    let resized = plan.apply(PlanIntent::SetDayCount { days: 1 }).unwrap();
    assert_eq!(
        resized,
        Outcome::Resized {
            days: 1,
            dropped: vec![PlanItem::custom("Hike")]
        }
    );
}

#[test]
fn test_session_rejects_dangling_reference() {
    let mut session = TripSession::new(create_test_trip());

    let err = session
        .apply(PlanIntent::Add {
            day: 1,
            item: PlanItem::section("nowhere"),
        })
        .unwrap_err();

    assert!(matches!(err, WaymarkError::DanglingReference { .. }));
    assert!(session.plan().is_empty());
}

#[test]
fn test_session_import_prunes_dangling() {
    let mut session = TripSession::new(create_test_trip());
    let mut snapshot = PlanState::new("alpine-loop").serialize();
    snapshot.days.insert(
        1,
        vec![
            PlanItem::section("s1"),
            PlanItem::section("gone"),
            PlanItem::custom("Dinner"),
        ],
    );

    let report = session.import(snapshot).unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.dropped, vec![PlanItem::section("gone")]);
    assert_eq!(
        session.plan().day(1).unwrap(),
        &[PlanItem::section("s1"), PlanItem::custom("Dinner")]
    );
}

#[test]
fn test_session_import_foreign_leaves_plan() {
    let mut session = TripSession::new(create_test_trip());
    session
        .apply(PlanIntent::Add {
            day: 1,
            item: PlanItem::section("s1"),
        })
        .unwrap();

    let result = session.import(PlanState::new("mazury").serialize());

    assert!(result.is_err());
    assert_eq!(session.plan().len(), 1);
}

#[test]
fn test_session_restore_ignores_foreign_snapshot() {
    let session = TripSession::restore(
        create_test_trip(),
        Some(PlanState::new("mazury").serialize()),
    );
    assert_eq!(session.plan().trip_id(), "alpine-loop");
    assert!(session.plan().is_empty());
}

#[test]
fn test_session_snapshot_carries_trip_title() {
    let session = TripSession::new(create_test_trip());
    let snapshot = session.snapshot();

    assert_eq!(snapshot.trip_id, "alpine-loop");
    assert_eq!(snapshot.trip_title.as_deref(), Some("Alpine Loop"));
    assert!(snapshot.exported_at.is_some());
}

#[test]
fn test_session_resolves_live_titles() {
    let mut trip = create_test_trip();
    let mut session = TripSession::new(trip.clone());
    session
        .apply(PlanIntent::Add {
            day: 1,
            item: PlanItem::section("s1"),
        })
        .unwrap();

    trip.sections[0].title = "Renamed".to_string();
    let reloaded = TripSession::restore(trip, Some(session.plan().serialize()));

    let item = &reloaded.plan().day(1).unwrap()[0];
    assert_eq!(reloaded.resolve_title(item), "Renamed");
}
