// File: ./src/export.rs
// iCalendar export of an aggregated schedule
use crate::model::CalendarItem;
use crate::storage::{LocalStorage, StorageError};
use icalendar::{Calendar, Component, Event, EventLike};
use log::info;
use std::path::Path;

pub fn to_ical_event(item: &CalendarItem) -> Event {
    let mut event = Event::new();
    event.uid(&item.id);
    event.summary(&item.title);
    // Floating time: items are already in the viewer's wall clock.
    event.starts(item.date);
    if let Some(loc) = &item.location {
        event.location(loc);
    }
    event.add_property("URL", &item.link);
    event.add_property("CATEGORIES", item.kind.label().to_uppercase());
    event.add_property("COLOR", &item.color);
    event.done()
}

/// Renders `items` as a VCALENDAR, one VEVENT each. The header, PRODID
/// included, is left to `Calendar`.
pub fn to_ics(items: &[CalendarItem], calendar_name: &str) -> String {
    let mut calendar = Calendar::new();
    calendar.name(calendar_name);
    for item in items {
        calendar.push(to_ical_event(item));
    }
    calendar.done().to_string()
}

pub fn export_file<P: AsRef<Path>>(
    items: &[CalendarItem],
    calendar_name: &str,
    path: P,
) -> Result<(), StorageError> {
    let path = path.as_ref();
    LocalStorage::atomic_write(path, to_ics(items, calendar_name))?;
    info!("Exported {} items to {}", items.len(), path.display());
    Ok(())
}
