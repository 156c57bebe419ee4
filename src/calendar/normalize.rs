// File: ./src/calendar/normalize.rs
// Projects each source record type onto CalendarItem
use crate::color_utils::{ColorMode, item_color};
use crate::model::parser::{compose_slot, parse_timestamp};
use crate::model::{CalendarItem, Event, ItemKind, ServiceListing, Shift};
use chrono::{FixedOffset, NaiveDateTime};
use log::debug;

fn clock(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Shifts assigned to `user_id` that carry a usable deadline.
pub fn normalize_shifts(
    shifts: &[Shift],
    user_id: &str,
    mode: ColorMode,
    offset: Option<FixedOffset>,
) -> Vec<CalendarItem> {
    shifts
        .iter()
        .filter(|s| s.assignees.iter().any(|a| a == user_id))
        .filter_map(|s| {
            let raw = s.deadline.as_deref()?;
            let Some(date) = parse_timestamp(raw, offset) else {
                debug!("Dropping shift {}: unparseable deadline {:?}", s.id, raw);
                return None;
            };
            Some(CalendarItem {
                id: format!("shift-{}", s.id),
                title: s.title.clone(),
                date,
                kind: ItemKind::Shift,
                color: item_color(mode, ItemKind::Shift, Some(s.priority)).to_string(),
                link: format!("{}/{}", ItemKind::Shift.route(), s.id),
                time: Some(clock(&date)),
                location: non_empty(&s.location),
            })
        })
        .collect()
}

/// Events with a usable start.
pub fn normalize_events(
    events: &[Event],
    mode: ColorMode,
    offset: Option<FixedOffset>,
) -> Vec<CalendarItem> {
    events
        .iter()
        .filter_map(|e| {
            let raw = e.timeframe.as_ref()?.start.as_deref()?;
            let Some(date) = parse_timestamp(raw, offset) else {
                debug!("Dropping event {}: unparseable start {:?}", e.id, raw);
                return None;
            };
            Some(CalendarItem {
                id: format!("event-{}", e.id),
                title: e.name.clone(),
                date,
                kind: ItemKind::Event,
                color: item_color(mode, ItemKind::Event, None).to_string(),
                link: format!("{}/{}", ItemKind::Event.route(), e.id),
                time: Some(clock(&date)),
                location: e.location.as_deref().and_then(non_empty),
            })
        })
        .collect()
}

/// One item per booked slot of every listing.
pub fn normalize_services(listings: &[ServiceListing], mode: ColorMode) -> Vec<CalendarItem> {
    let mut items = Vec::new();
    for listing in listings {
        for booking in &listing.booking_dates {
            for slot in &booking.time_slots {
                let Some(date) = compose_slot(&booking.date, slot) else {
                    debug!(
                        "Dropping slot {:?} on {:?} of listing {}",
                        slot, booking.date, listing.id
                    );
                    continue;
                };
                items.push(CalendarItem {
                    id: format!("service-{}-{}-{}", listing.id, booking.date.trim(), slot.trim()),
                    title: listing.title.clone(),
                    date,
                    kind: ItemKind::Service,
                    color: item_color(mode, ItemKind::Service, None).to_string(),
                    link: format!("{}/{}", ItemKind::Service.route(), listing.id),
                    time: Some(slot.trim().to_string()),
                    location: listing.location.as_deref().and_then(non_empty),
                });
            }
        }
    }
    items
}
