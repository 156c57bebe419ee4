use chrono::{FixedOffset, NaiveDate};
use hubcal::calendar::{Aggregator, MonthView, Summary, WeekView, select_day, week_start};
use hubcal::color_utils::{ColorMode, HIGH_PRIORITY_COLOR, MEDIUM_PRIORITY_COLOR, SHIFT_COLOR};
use hubcal::export::{export_file, to_ics};
use hubcal::model::{CalendarItem, ItemKind};
use hubcal::storage::Dataset;
use std::collections::HashSet;

const FIXTURE: &str = include_str!("fixtures/community.json");

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn aggregator() -> Aggregator {
    Aggregator::new("user-1").with_offset(FixedOffset::east_opt(0).unwrap())
}

fn schedule() -> Vec<CalendarItem> {
    let data = Dataset::from_json(FIXTURE).unwrap();
    aggregator().aggregate(&data)
}

fn ids(items: &[CalendarItem]) -> Vec<&str> {
    items.iter().map(|i| i.id.as_str()).collect()
}

#[test]
fn fixture_projects_expected_items() {
    let items = schedule();
    assert_eq!(
        ids(&items),
        vec![
            "shift-101",
            "shift-102",
            "event-ev-1",
            "event-ev-2",
            "service-svc-7-2025-07-20-09:00",
            "service-svc-7-2025-07-20-2:30 PM",
            "service-svc-7-2025-07-27-10:00-11:00",
        ]
    );
    let unique: HashSet<&str> = ids(&items).into_iter().collect();
    assert_eq!(unique.len(), items.len());
}

#[test]
fn selecting_a_day_matches_calendar_date() {
    let items = schedule();
    let july_20 = select_day(&items, d(2025, 7, 20));
    assert_eq!(
        ids(&july_20),
        vec![
            "shift-101",
            "service-svc-7-2025-07-20-09:00",
            "service-svc-7-2025-07-20-2:30 PM",
        ]
    );
    assert!(select_day(&items, d(2025, 7, 21)).is_empty());
}

#[test]
fn month_view_holds_only_that_month() {
    let items = schedule();
    let july = MonthView::build(&items, 2025, 7);
    assert_eq!(july.len(), 6);
    assert!(july.days.values().flatten().all(|i| i.id != "event-ev-2"));

    let august = MonthView::build(&items, 2025, 8);
    assert_eq!(ids(august.items_on(2)), vec!["event-ev-2"]);

    let other_year = MonthView::build(&items, 2024, 7);
    assert!(other_year.is_empty());
}

#[test]
fn week_view_is_sunday_aligned() {
    let items = schedule();
    let focus = d(2025, 7, 23);
    assert_eq!(week_start(focus), d(2025, 7, 20));

    let week = WeekView::build(&items, focus);
    let in_week: Vec<&str> = week.items().map(|i| i.id.as_str()).collect();
    assert_eq!(
        in_week,
        vec![
            "shift-101",
            "service-svc-7-2025-07-20-09:00",
            "service-svc-7-2025-07-20-2:30 PM",
            "shift-102",
        ]
    );

    for item in &items {
        let inside = item.day() >= week.start && item.day() <= week.end();
        assert_eq!(week.items().any(|i| i.id == item.id), inside, "{}", item.id);
    }
}

#[test]
fn summary_of_fixture() {
    let s = Summary::of(&schedule());
    assert_eq!((s.shifts, s.events, s.services), (2, 2, 3));
}

#[test]
fn aggregation_is_repeatable() {
    let data = Dataset::from_json(FIXTURE).unwrap();
    let agg = aggregator();
    assert_eq!(agg.aggregate(&data), agg.aggregate(&data));
}

#[test]
fn color_modes() {
    let data = Dataset::from_json(FIXTURE).unwrap();

    let by_type = aggregator().aggregate(&data);
    assert!(
        by_type
            .iter()
            .filter(|i| i.kind == ItemKind::Shift)
            .all(|i| i.color == SHIFT_COLOR)
    );

    let by_priority = aggregator()
        .with_color_mode(ColorMode::Priority)
        .aggregate(&data);
    assert_eq!(by_priority[0].color, HIGH_PRIORITY_COLOR);
    assert_eq!(by_priority[1].color, MEDIUM_PRIORITY_COLOR);
}

#[test]
fn file_load_and_export() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("data.json");
    std::fs::write(&data_path, FIXTURE).unwrap();

    let data = Dataset::load(&data_path).unwrap();
    let items = aggregator().aggregate(&data);
    let out = dir.path().join("schedule.ics");
    export_file(&items, "user-1 schedule", &out).unwrap();

    let body = std::fs::read_to_string(&out).unwrap();
    assert_eq!(body.matches("BEGIN:VEVENT").count(), items.len());
    assert!(body.contains("UID:event-ev-1"));
    assert!(body.contains("DTSTART:20250719T170000"));
}

#[test]
fn ics_carries_every_kind() {
    let ics = to_ics(&schedule(), "user-1 schedule");
    for cat in ["CATEGORIES:SHIFT", "CATEGORIES:EVENT", "CATEGORIES:SERVICE"] {
        assert!(ics.contains(cat), "{}", cat);
    }
    assert_eq!(ics.matches("PRODID").count(), 1);
}

#[test]
fn numeric_member_ids_match_assignments() {
    let data = Dataset::from_json(
        r#"{"shifts": [{"id": 5, "title": "Bins", "deadline": "2025-07-22T08:00:00",
            "assignees": [42, "user-9"]}]}"#,
    )
    .unwrap();
    let items = Aggregator::new("42").aggregate(&data);
    assert_eq!(ids(&items), vec!["shift-5"]);
    assert_eq!(Aggregator::new("user-9").aggregate(&data).len(), 1);
}

#[test]
fn empty_dataset_never_fails() {
    let data = Dataset::from_json("{}").unwrap();
    let items = aggregator().aggregate(&data);
    assert!(items.is_empty());
    assert!(MonthView::build(&items, 2025, 7).is_empty());
    assert!(WeekView::build(&items, d(2025, 7, 20)).is_empty());
}
