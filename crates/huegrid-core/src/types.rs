use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::HueGridError;

/// Number of hue degrees queried by one aggregation.
pub const HUE_COUNT: u16 = 360;

/// An integer percentage in `0..=100`, used for saturation and lightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    pub const MAX: u8 = 100;

    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = HueGridError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
            .ok_or_else(|| HueGridError::InvalidInput(format!("{} is not within 0..=100", value)))
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl FromStr for Percent {
    type Err = HueGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| HueGridError::InvalidInput(format!("'{}' is not an integer", trimmed)))?;
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| HueGridError::InvalidInput(format!("{} is not within 0..=100", value)))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One hue degree in `0..HUE_COUNT`, driving one outbound lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct HueQuery(u16);

impl HueQuery {
    pub const fn new(degrees: u16) -> Option<Self> {
        if degrees < HUE_COUNT {
            Some(Self(degrees))
        } else {
            None
        }
    }

    pub const fn degrees(self) -> u16 {
        self.0
    }

    /// Every degree `0..=359` in ascending order. Never sampled.
    pub fn full_range() -> impl ExactSizeIterator<Item = HueQuery> {
        (0..HUE_COUNT).map(HueQuery)
    }
}

/// The HSL triple sent to the naming service for a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HslQuery {
    pub hue: HueQuery,
    pub saturation: Percent,
    pub lightness: Percent,
}

impl fmt::Display for HslQuery {
    /// Formats as the service's `hsl` query value, e.g. `(215,100%,34%)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{}%,{}%)",
            self.hue.degrees(),
            self.saturation,
            self.lightness
        )
    }
}

/// Saturation and lightness chosen by the user. One aggregation per settled pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SwatchParams {
    pub saturation: Percent,
    pub lightness: Percent,
}

impl SwatchParams {
    pub fn new(saturation: Percent, lightness: Percent) -> Self {
        Self {
            saturation,
            lightness,
        }
    }

    pub fn query(&self, hue: HueQuery) -> HslQuery {
        HslQuery {
            hue,
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub fn new(h: u16, s: u8, l: u8) -> Result<Self, HueGridError> {
        if h >= HUE_COUNT || s > Percent::MAX || l > Percent::MAX {
            return Err(HueGridError::InvalidInput(format!(
                "hsl({}, {}, {}) is out of range",
                h, s, l
            )));
        }
        Ok(Self { h, s, l })
    }
}

/// A hex color canonicalized to `#` followed by six uppercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The six digits without the leading `#`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }
}

impl FromStr for HexColor {
    type Err = HueGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HueGridError::InvalidInput(format!(
                "'{}' is not a 6-digit hex color",
                s
            )));
        }
        Ok(Self(format!("#{}", digits.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for HexColor {
    type Error = HueGridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(hex: HexColor) -> Self {
        hex.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named color as reported by the naming service for one hue lookup.
///
/// Raw lookups and aggregated entries share this shape; an aggregated
/// record is simply the first raw record seen for its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorRecord {
    pub name: String,
    pub hue: u16,
    pub rgb: Rgb,
    pub hsl: Hsl,
    pub hex: HexColor,
}

/// Deduplicated, hue-ordered colors from one aggregation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorCollection {
    records: Arc<[ColorRecord]>,
}

impl ColorCollection {
    /// Builds a collection from raw records given in request order.
    ///
    /// The first record seen for each name (exact, case-sensitive match) is
    /// kept and later ones are dropped. The survivors are then stably sorted
    /// by hue, so equal hues keep their request order.
    pub fn from_batch<I>(batch: I) -> Self
    where
        I: IntoIterator<Item = ColorRecord>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records: Vec<ColorRecord> = batch
            .into_iter()
            .filter(|record| seen.insert(record.name.clone()))
            .collect();
        records.sort_by_key(|record| record.hue);
        Self {
            records: records.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColorRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[ColorRecord] {
        &self.records
    }

    pub fn find_by_hex(&self, hex: &HexColor) -> Option<&ColorRecord> {
        self.records.iter().find(|record| &record.hex == hex)
    }
}

impl<'a> IntoIterator for &'a ColorCollection {
    type Item = &'a ColorRecord;
    type IntoIter = std::slice::Iter<'a, ColorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for ColorCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.records.iter())
    }
}
