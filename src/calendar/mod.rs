// File: ./src/calendar/mod.rs
// Merges shifts, events and service bookings into one schedule
pub mod normalize;
pub mod views;

pub use normalize::{normalize_events, normalize_services, normalize_shifts};
pub use views::{
    MonthView, Summary, WeekView, month_grid, next_month, next_week, prev_month, prev_week,
    select_day, upcoming, week_start,
};

use crate::color_utils::ColorMode;
use crate::model::CalendarItem;
use crate::storage::Dataset;
use chrono::FixedOffset;
use log::warn;
use std::collections::HashSet;

/// Per-viewer aggregation settings.
#[derive(Debug, Clone)]
pub struct Aggregator {
    pub user_id: String,
    pub color_mode: ColorMode,
    /// Pinned viewer offset; `None` follows the system zone, DST included.
    pub offset: Option<FixedOffset>,
}

impl Aggregator {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            color_mode: ColorMode::default(),
            offset: None,
        }
    }

    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Flat schedule: shifts, then events, then services, each in input
    /// order. Ids are unique; a repeated id keeps its first occurrence.
    pub fn aggregate(&self, data: &Dataset) -> Vec<CalendarItem> {
        let merged = normalize_shifts(&data.shifts, &self.user_id, self.color_mode, self.offset)
            .into_iter()
            .chain(normalize_events(&data.events, self.color_mode, self.offset))
            .chain(normalize_services(&data.services, self.color_mode));

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for item in merged {
            if seen.insert(item.id.clone()) {
                items.push(item);
            } else {
                warn!("Duplicate calendar item {} ignored", item.id);
            }
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Event, ItemKind, Priority, ServiceBooking, ServiceListing, Shift, Timeframe};

    fn dataset() -> Dataset {
        Dataset {
            shifts: vec![Shift {
                id: "1".to_string(),
                title: "Garden".to_string(),
                deadline: Some("2025-07-20T14:00:00".to_string()),
                location: String::new(),
                priority: Priority::Low,
                assignees: vec!["me".to_string()],
            }],
            events: vec![Event {
                id: "1".to_string(),
                name: "Picnic".to_string(),
                timeframe: Some(Timeframe {
                    start: Some("2025-07-19T12:00:00".to_string()),
                    end: None,
                }),
                location: None,
            }],
            services: vec![ServiceListing {
                id: "9".to_string(),
                title: "Bike repair".to_string(),
                location: None,
                booking_dates: vec![ServiceBooking {
                    service_id: None,
                    date: "2025-07-18".to_string(),
                    time_slots: vec!["10:00".to_string(), "10:00".to_string()],
                }],
            }],
        }
    }

    fn aggregator() -> Aggregator {
        Aggregator::new("me").with_offset(FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn merge_order_is_shift_event_service() {
        let items = aggregator().aggregate(&dataset());
        let kinds: Vec<ItemKind> = items.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![ItemKind::Shift, ItemKind::Event, ItemKind::Service]);
    }

    #[test]
    fn same_source_id_across_kinds_stays_distinct() {
        let items = aggregator().aggregate(&dataset());
        assert!(items.iter().any(|i| i.id == "shift-1"));
        assert!(items.iter().any(|i| i.id == "event-1"));
    }

    #[test]
    fn duplicate_slots_collapse() {
        let items = aggregator().aggregate(&dataset());
        let services = items.iter().filter(|i| i.kind == ItemKind::Service).count();
        assert_eq!(services, 1);
    }

    #[test]
    fn aggregation_is_deterministic() {
        let agg = aggregator();
        let data = dataset();
        assert_eq!(agg.aggregate(&data), agg.aggregate(&data));
    }

    #[test]
    fn empty_dataset() {
        assert!(aggregator().aggregate(&Dataset::default()).is_empty());
    }

    #[test]
    fn unpinned_offset_follows_zone_of_each_instant() {
        use chrono::{DateTime, Local, Offset, TimeZone};
        let raw = "2026-01-15T22:30:00Z";
        let data = Dataset {
            events: vec![Event {
                id: "winter".to_string(),
                name: "Solstice walk".to_string(),
                timeframe: Some(Timeframe {
                    start: Some(raw.to_string()),
                    end: None,
                }),
                location: None,
            }],
            ..Dataset::default()
        };
        let utc_naive = DateTime::parse_from_rfc3339(raw).unwrap().naive_utc();
        let expected = utc_naive + Local.offset_from_utc_datetime(&utc_naive).fix();

        let items = Aggregator::new("me").aggregate(&data);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].date, expected);
        assert_eq!(select_day(&items, expected.date()).len(), 1);
    }

    #[test]
    fn other_users_see_no_shifts() {
        let items = Aggregator::new("them").aggregate(&dataset());
        assert!(items.iter().all(|i| i.kind != ItemKind::Shift));
    }
}
