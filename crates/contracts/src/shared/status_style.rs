//! Status colors for chips, legends and chart segments.
//!
//! Lookup is three-tiered: exact raw-string match first (so chips for
//! historical records keep the colors they have always had), then the
//! canonical category color, then a fixed default gray. The text color is
//! derived from the chosen background so labels stay legible on both bright
//! and dark chips. Both functions are pure; the aggregation pass and the
//! chip renderer call them independently and must agree.

use crate::enums::project_status::ProjectStatus;

/// Canonical category colors plus legacy vocabulary kept for backward
/// visual compatibility.
const STATUS_COLORS: &[(&str, &str)] = &[
    // Canonical categories
    ("Completed", "#32cd32"),
    ("Ongoing", "#1e90ff"),
    ("Not started", "#9e9e9e"),
    ("Stalled", "#ffa500"),
    ("Under Procurement", "#9370DB"),
    ("Other", "#FF1493"),
    // Legacy statuses
    ("At Risk", "#b22222"),
    ("In Progress", "#1e90ff"),
    ("Initiated", "#6495ED"),
    ("Suspended", "#e00202"),
    ("Delayed", "#e00202"),
    ("Cancelled", "#000000"),
    ("Not Started", "#9e9e9e"),
    ("Closed", "#228B22"),
];

/// Fallback for anything the table does not know.
pub const DEFAULT_STATUS_COLOR: &str = "#757575";

/// Text brightness cutoff: backgrounds brighter than this get black text.
const BRIGHTNESS_THRESHOLD: u32 = 180;

fn exact_color(status: &str) -> Option<&'static str> {
    STATUS_COLORS
        .iter()
        .find(|(key, _)| *key == status)
        .map(|(_, color)| *color)
}

/// Background color for a raw status string.
pub fn background_color_for(raw: &str) -> &'static str {
    let raw = raw.trim();
    if raw.is_empty() {
        return DEFAULT_STATUS_COLOR;
    }
    if let Some(color) = exact_color(raw) {
        return color;
    }
    exact_color(ProjectStatus::normalize(raw).label()).unwrap_or(DEFAULT_STATUS_COLOR)
}

/// Color for a canonical category (legend swatches, chart segments).
pub fn color_for_status(status: ProjectStatus) -> &'static str {
    exact_color(status.label()).unwrap_or(DEFAULT_STATUS_COLOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn css(&self) -> &'static str {
        match self {
            TextColor::Black => "black",
            TextColor::White => "white",
        }
    }
}

/// Text color that stays legible against [`background_color_for`]'s pick.
pub fn text_color_for(raw: &str) -> TextColor {
    text_color_for_background(background_color_for(raw))
}

/// Perceived brightness `(299R + 587G + 114B) / 1000`, black text above the
/// threshold, white below. Unparseable backgrounds fall back to white text.
pub fn text_color_for_background(hex: &str) -> TextColor {
    match hex_rgb(hex) {
        Some((r, g, b)) => {
            let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
            if brightness > BRIGHTNESS_THRESHOLD {
                TextColor::Black
            } else {
                TextColor::White
            }
        }
        None => TextColor::White,
    }
}

/// Inline style for a status chip.
pub fn chip_style(raw: &str) -> String {
    format!(
        "background-color: {}; color: {};",
        background_color_for(raw),
        text_color_for(raw).css()
    )
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_legacy_match_wins_over_normalization() {
        // "At Risk" normalizes to Stalled (orange) but keeps its legacy red.
        assert_eq!(background_color_for("At Risk"), "#b22222");
        assert_eq!(background_color_for("Initiated"), "#6495ED");
        // Variants that are not exact table keys fall through to the
        // canonical color.
        assert_eq!(background_color_for("at risk"), "#ffa500");
    }

    #[test]
    fn canonical_fallback_and_default() {
        assert_eq!(background_color_for("Phase II completed"), "#32cd32");
        assert_eq!(background_color_for("banana"), "#FF1493"); // Other
        assert_eq!(background_color_for(""), DEFAULT_STATUS_COLOR);
    }

    #[test]
    fn text_color_is_only_black_or_white() {
        for raw in ["Completed", "Cancelled", "Not started", "", "banana", "At Risk"] {
            let color = text_color_for(raw);
            assert!(matches!(color, TextColor::Black | TextColor::White));
        }
    }

    #[test]
    fn bright_backgrounds_get_black_text_dark_get_white() {
        assert_eq!(text_color_for_background("#ffffff"), TextColor::Black);
        assert_eq!(text_color_for_background("#ffeb3b"), TextColor::Black);
        assert_eq!(text_color_for_background("#000000"), TextColor::White);
        // Every shipped status color is dark enough for white text.
        for (_, color) in STATUS_COLORS {
            assert_eq!(text_color_for_background(color), TextColor::White);
        }
        // Unparseable input falls back to white rather than panicking.
        assert_eq!(text_color_for_background("teal"), TextColor::White);
    }

    #[test]
    fn presentation_is_pure() {
        assert_eq!(background_color_for("Ongoing"), background_color_for("Ongoing"));
        assert_eq!(text_color_for("Ongoing"), text_color_for("Ongoing"));
    }
}
