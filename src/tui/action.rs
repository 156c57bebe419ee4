use crate::color_utils::ColorMode;
use crate::model::CalendarItem;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Action {
    Reload,
    SetColorMode(ColorMode),
    Export(PathBuf),
    Quit,
}

#[derive(Debug)]
pub enum AppEvent {
    ItemsLoaded(Vec<CalendarItem>),
    Error(String),
    Status(String),
}
