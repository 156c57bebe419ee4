// File: ./src/model/parser.rs
// Timestamp parsing for source records
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub const BOOKING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a shift deadline or event start into wall-clock time.
///
/// Timestamps carrying an offset are shifted into `offset` first, or into
/// the system zone at that instant when no offset is pinned. Naive ones are
/// taken as already local. A bare date means midnight.
pub fn parse_timestamp(raw: &str, offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(match offset {
            Some(fixed) => dt.with_timezone(&fixed).naive_local(),
            None => dt.with_timezone(&Local).naive_local(),
        });
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, BOOKING_DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Start time of a booking slot. Ranges ("09:00-10:00", "9 AM – 10 AM")
/// keep only their first half.
pub fn parse_slot_start(slot: &str) -> Option<NaiveTime> {
    let start = slot
        .split(|c: char| c == '-' || c == '–')
        .next()?
        .trim()
        .to_uppercase();
    if start.is_empty() {
        return None;
    }

    let (clock, meridiem) = if let Some(c) = start.strip_suffix("AM") {
        (c.trim_end(), Some("AM"))
    } else if let Some(c) = start.strip_suffix("PM") {
        (c.trim_end(), Some("PM"))
    } else {
        (start.as_str(), None)
    };

    match meridiem {
        Some(m) => {
            let clock = if clock.contains(':') {
                clock.to_string()
            } else {
                format!("{}:00", clock)
            };
            NaiveTime::parse_from_str(&format!("{} {}", clock, m), "%I:%M %p").ok()
        }
        None => NaiveTime::parse_from_str(clock, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
            .ok(),
    }
}

/// Combines a booking date (`YYYY-MM-DD`) with one of its slots.
pub fn compose_slot(date: &str, slot: &str) -> Option<NaiveDateTime> {
    let day = NaiveDate::parse_from_str(date.trim(), BOOKING_DATE_FORMAT).ok()?;
    let time = parse_slot_start(slot)?;
    Some(day.and_time(time))
}
