//! Wire format of the color naming service's `/id` endpoint.
//!
//! Only the fields the grid needs are modelled; the service also returns
//! `hsv`, `cmyk`, `XYZ`, `image`, `contrast` and link sections, which serde
//! ignores.

use huegrid_core::{ColorRecord, HexColor, Hsl, HueGridError, Rgb};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ColorApiResponse {
    pub hex: HexField,
    pub rgb: RgbField,
    pub hsl: HslField,
    pub name: NameField,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HexField {
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RgbField {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HslField {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameField {
    pub value: String,
}

impl ColorApiResponse {
    pub fn from_json(body: &str) -> Result<Self, HueGridError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_record(self) -> Result<ColorRecord, HueGridError> {
        if self.name.value.trim().is_empty() {
            return Err(HueGridError::InvalidInput("empty color name".into()));
        }
        let hex: HexColor = self.hex.value.parse()?;
        let hsl = Hsl::new(self.hsl.h, self.hsl.s, self.hsl.l)?;

        Ok(ColorRecord {
            name: self.name.value,
            hue: hsl.h,
            rgb: Rgb::new(self.rgb.r, self.rgb.g, self.rgb.b),
            hsl,
            hex,
        })
    }
}

/// Parses one response body into a record.
pub fn parse_record(body: &str) -> Result<ColorRecord, HueGridError> {
    ColorApiResponse::from_json(body)?.into_record()
}
