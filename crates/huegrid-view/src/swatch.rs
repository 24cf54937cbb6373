use huegrid_core::{ColorRecord, HexColor, Rgb};
use serde::Serialize;

use crate::palette::TextPalette;

pub const ACK_MESSAGE: &str = "Hex copied to clipboard!";

/// Everything a renderer needs to draw one color tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwatchView {
    /// Stable identity across re-renders: `{name}-{hue}`.
    pub key: String,
    pub name: String,
    pub hue: u16,
    pub hex: HexColor,
    pub background: Rgb,
    pub palette: TextPalette,
    pub rgb_label: String,
    pub ack_visible: bool,
}

impl SwatchView {
    pub fn from_record(record: &ColorRecord, acknowledged: Option<&HexColor>) -> Self {
        let rgb = record.rgb;
        Self {
            key: format!("{}-{}", record.name, record.hue),
            name: record.name.clone(),
            hue: record.hue,
            hex: record.hex.clone(),
            background: rgb,
            palette: TextPalette::for_background(rgb),
            rgb_label: format!("RGB({}, {}, {})", rgb.r, rgb.g, rgb.b),
            ack_visible: acknowledged == Some(&record.hex),
        }
    }

    pub fn ack_message(&self) -> Option<&'static str> {
        self.ack_visible.then_some(ACK_MESSAGE)
    }
}
