// File: ./src/model/mod.rs
// Source records from the platform data and the calendar items projected from them
pub mod item;
pub mod parser;
pub mod source;

pub use item::{CalendarItem, ItemKind};
pub use source::{Event, Priority, ServiceBooking, ServiceListing, Shift, Timeframe};
