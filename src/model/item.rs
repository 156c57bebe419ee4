// File: ./src/model/item.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Shift,
    Event,
    Service,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Shift, ItemKind::Event, ItemKind::Service];

    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Shift => "Shift",
            ItemKind::Event => "Event",
            ItemKind::Service => "Service",
        }
    }

    /// Single-cell glyph used in the grid and list views.
    pub fn icon(self) -> char {
        match self {
            ItemKind::Shift => '⚒',
            ItemKind::Event => '★',
            ItemKind::Service => '✚',
        }
    }

    /// Route prefix of the page that owns items of this kind.
    pub fn route(self) -> &'static str {
        match self {
            ItemKind::Shift => "/jobs",
            ItemKind::Event => "/events",
            ItemKind::Service => "/marketplace",
        }
    }
}

/// One entry of the merged schedule. Always derived from a source record,
/// never stored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CalendarItem {
    pub id: String,
    pub title: String,
    pub date: NaiveDateTime,
    pub kind: ItemKind,
    pub color: String,
    pub link: String,
    pub time: Option<String>,
    pub location: Option<String>,
}

impl CalendarItem {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.day() == day
    }

    /// Chronological order, ties broken by kind then id so sorts stay stable
    /// across runs.
    pub fn chronological(a: &CalendarItem, b: &CalendarItem) -> Ordering {
        a.date
            .cmp(&b.date)
            .then(a.kind.cmp(&b.kind))
            .then_with(|| a.id.cmp(&b.id))
    }

    pub fn to_line(&self) -> String {
        let mut s = format!("{} {}", self.kind.icon(), self.title);
        if let Some(t) = &self.time {
            s.push_str(&format!(" @ {}", t));
        }
        if let Some(loc) = &self.location {
            s.push_str(&format!(" ({})", loc));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, kind: ItemKind, date: &str) -> CalendarItem {
        CalendarItem {
            id: id.to_string(),
            title: "x".to_string(),
            date: NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M").unwrap(),
            kind,
            color: String::new(),
            link: String::new(),
            time: None,
            location: None,
        }
    }

    #[test]
    fn chronological_breaks_ties_by_kind() {
        let a = item("b", ItemKind::Event, "2025-07-20T09:00");
        let b = item("a", ItemKind::Shift, "2025-07-20T09:00");
        let c = item("c", ItemKind::Shift, "2025-07-19T23:00");
        let mut v = vec![a.clone(), b.clone(), c.clone()];
        v.sort_by(CalendarItem::chronological);
        assert_eq!(v, vec![c, b, a]);
    }

    #[test]
    fn to_line_includes_time_and_location() {
        let mut i = item("s", ItemKind::Service, "2025-07-20T09:00");
        i.title = "Massage".to_string();
        i.time = Some("09:00".to_string());
        i.location = Some("Hall".to_string());
        assert_eq!(i.to_line(), "✚ Massage @ 09:00 (Hall)");
    }
}
