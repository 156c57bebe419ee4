// File: src/color_utils.rs
use crate::model::{ItemKind, Priority};
use serde::{Deserialize, Serialize};

pub const SHIFT_COLOR: &str = "#3b82f6";
pub const EVENT_COLOR: &str = "#10b981";
pub const SERVICE_COLOR: &str = "#8b5cf6";

pub const HIGH_PRIORITY_COLOR: &str = "#ef4444";
pub const MEDIUM_PRIORITY_COLOR: &str = "#eab308";
pub const LOW_PRIORITY_COLOR: &str = "#22c55e";

/// How calendar items pick their color.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// One color per item kind.
    #[default]
    Type,
    /// Shifts colored by priority tier; events and services keep their kind color.
    Priority,
}

pub fn kind_color(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Shift => SHIFT_COLOR,
        ItemKind::Event => EVENT_COLOR,
        ItemKind::Service => SERVICE_COLOR,
    }
}

pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => HIGH_PRIORITY_COLOR,
        Priority::Medium => MEDIUM_PRIORITY_COLOR,
        Priority::Low => LOW_PRIORITY_COLOR,
        Priority::Unknown => SHIFT_COLOR,
    }
}

/// Color for an item of `kind`; `priority` only matters for shifts in
/// `ColorMode::Priority`.
pub fn item_color(mode: ColorMode, kind: ItemKind, priority: Option<Priority>) -> &'static str {
    match (mode, kind, priority) {
        (ColorMode::Priority, ItemKind::Shift, Some(p)) => priority_color(p),
        _ => kind_color(kind),
    }
}

/// Legend entries (label, color) matching what `item_color` produces.
pub fn legend(mode: ColorMode) -> Vec<(&'static str, &'static str)> {
    match mode {
        ColorMode::Type => vec![
            ("Shift", SHIFT_COLOR),
            ("Event", EVENT_COLOR),
            ("Service", SERVICE_COLOR),
        ],
        ColorMode::Priority => vec![
            ("High priority shift", HIGH_PRIORITY_COLOR),
            ("Medium priority shift", MEDIUM_PRIORITY_COLOR),
            ("Low priority shift", LOW_PRIORITY_COLOR),
            ("Unprioritized shift", SHIFT_COLOR),
            ("Event", EVENT_COLOR),
            ("Service", SERVICE_COLOR),
        ],
    }
}

/// Parses `#rrggbb` into (r, g, b) in [0.0, 1.0].
pub fn parse_hex(hex: &str) -> Option<(f32, f32, f32)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(hex.get(i..i + 2)?, 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Determines if text on top of this color should be black or white.
pub fn is_dark(r: f32, g: f32, b: f32) -> bool {
    let brightness = 0.299 * r + 0.587 * g + 0.114 * b;
    brightness < 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mode_ignores_priority() {
        assert_eq!(
            item_color(ColorMode::Type, ItemKind::Shift, Some(Priority::High)),
            SHIFT_COLOR
        );
    }

    #[test]
    fn priority_mode_only_touches_shifts() {
        assert_eq!(
            item_color(ColorMode::Priority, ItemKind::Shift, Some(Priority::High)),
            HIGH_PRIORITY_COLOR
        );
        assert_eq!(
            item_color(ColorMode::Priority, ItemKind::Event, None),
            EVENT_COLOR
        );
    }

    #[test]
    fn legend_covers_every_color_in_use() {
        for mode in [ColorMode::Type, ColorMode::Priority] {
            let colors: Vec<&str> = legend(mode).into_iter().map(|(_, c)| c).collect();
            for kind in ItemKind::ALL {
                for p in [Priority::Low, Priority::Medium, Priority::High, Priority::Unknown] {
                    let c = item_color(mode, kind, Some(p));
                    assert!(colors.contains(&c), "{:?} {:?} {:?}", mode, kind, p);
                }
            }
        }
    }

    #[test]
    fn unknown_priority_has_its_own_legend_entry() {
        let entries = legend(ColorMode::Priority);
        assert!(entries.contains(&("Unprioritized shift", SHIFT_COLOR)));
        assert_eq!(
            item_color(ColorMode::Priority, ItemKind::Shift, Some(Priority::Unknown)),
            SHIFT_COLOR
        );
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#ffffff"), Some((1.0, 1.0, 1.0)));
        assert_eq!(parse_hex("ffffff"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
        let (r, g, b) = parse_hex(SHIFT_COLOR).unwrap();
        assert!(is_dark(r, g, b));
    }
}
