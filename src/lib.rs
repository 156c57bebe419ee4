pub mod calendar;
pub mod color_utils;
pub mod config;
pub mod export;
pub mod model;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
