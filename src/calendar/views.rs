// File: ./src/calendar/views.rs
// Month, week and day slices of an aggregated schedule
use crate::model::{CalendarItem, ItemKind};
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Items of one month grouped by day of month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub days: BTreeMap<u32, Vec<CalendarItem>>,
}

impl MonthView {
    pub fn build(items: &[CalendarItem], year: i32, month: u32) -> Self {
        let mut days: BTreeMap<u32, Vec<CalendarItem>> = BTreeMap::new();
        for item in items
            .iter()
            .filter(|i| i.date.year() == year && i.date.month() == month)
        {
            days.entry(item.date.day()).or_default().push(item.clone());
        }
        Self { year, month, days }
    }

    pub fn containing(items: &[CalendarItem], focus: NaiveDate) -> Self {
        Self::build(items, focus.year(), focus.month())
    }

    pub fn items_on(&self, day: u32) -> &[CalendarItem] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Seven day columns, Sunday first.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekView {
    pub start: NaiveDate,
    pub days: [Vec<CalendarItem>; 7],
}

impl WeekView {
    pub fn build(items: &[CalendarItem], focus: NaiveDate) -> Self {
        let start = week_start(focus);
        let mut days: [Vec<CalendarItem>; 7] = std::array::from_fn(|_| Vec::new());
        for item in items {
            let offset = (item.day() - start).num_days();
            if (0..7).contains(&offset) {
                days[offset as usize].push(item.clone());
            }
        }
        Self { start, days }
    }

    pub fn end(&self) -> NaiveDate {
        self.start.checked_add_days(Days::new(6)).unwrap_or(self.start)
    }

    pub fn dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| {
            self.start
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(self.start)
        })
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    pub fn items(&self) -> impl Iterator<Item = &CalendarItem> {
        self.days.iter().flatten()
    }
}

/// Items whose calendar day is `day`, time of day ignored.
pub fn select_day(items: &[CalendarItem], day: NaiveDate) -> Vec<CalendarItem> {
    items.iter().filter(|i| i.is_on(day)).cloned().collect()
}

/// Sunday-first rows covering `month`; cells outside the month are `None`.
pub fn month_grid(year: i32, month: u32) -> Vec<[Option<NaiveDate>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    cells.extend(first.iter_days().take_while(|d| d.month() == month).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks(7)
        .map(|row| std::array::from_fn(|i| row[i]))
        .collect()
}

/// The next `limit` items at or after `now`, soonest first.
pub fn upcoming(items: &[CalendarItem], now: NaiveDateTime, limit: usize) -> Vec<CalendarItem> {
    let mut future: Vec<CalendarItem> = items.iter().filter(|i| i.date >= now).cloned().collect();
    future.sort_by(CalendarItem::chronological);
    future.truncate(limit);
    future
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

pub fn next_week(date: NaiveDate) -> NaiveDate {
    date.checked_add_days(Days::new(7)).unwrap_or(date)
}

pub fn prev_week(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(7)).unwrap_or(date)
}

/// Per-kind item counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub shifts: usize,
    pub events: usize,
    pub services: usize,
}

impl Summary {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a CalendarItem>) -> Self {
        let mut s = Self::default();
        for item in items {
            match item.kind {
                ItemKind::Shift => s.shifts += 1,
                ItemKind::Event => s.events += 1,
                ItemKind::Service => s.services += 1,
            }
        }
        s
    }

    pub fn total(&self) -> usize {
        self.shifts + self.events + self.services
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} shifts, {} events, {} bookings",
            self.shifts, self.events, self.services
        )
    }
}
