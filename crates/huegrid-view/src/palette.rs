use huegrid_core::Rgb;
use serde::Serialize;

/// Backgrounds brighter than this get dark text.
pub const BRIGHTNESS_THRESHOLD: u32 = 120;

/// Text color family drawn on top of a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPalette {
    Light,
    Dark,
}

impl TextPalette {
    pub fn foreground(self) -> Rgb {
        match self {
            Self::Light => Rgb::new(255, 255, 255),
            Self::Dark => Rgb::new(0, 0, 0),
        }
    }

    /// `Y > 120` picks dark text; exactly 120 stays light.
    pub fn for_background(rgb: Rgb) -> Self {
        if weighted_sum(rgb) > BRIGHTNESS_THRESHOLD * 1000 {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

fn weighted_sum(rgb: Rgb) -> u32 {
    299 * u32::from(rgb.r) + 587 * u32::from(rgb.g) + 114 * u32::from(rgb.b)
}

/// `Y = 0.299 R + 0.587 G + 0.114 B`, in `0.0..=255.0`.
pub fn perceived_brightness(rgb: Rgb) -> f64 {
    f64::from(weighted_sum(rgb)) / 1000.0
}
