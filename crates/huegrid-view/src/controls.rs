use huegrid_core::{Percent, SwatchParams};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Saturation,
    Lightness,
}

/// The two integer controls. Raw text is validated here and anything
/// outside `0..=100` is dropped without reaching the debounce stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    saturation: Percent,
    lightness: Percent,
    disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlsView {
    pub saturation: Percent,
    pub lightness: Percent,
    pub saturation_label: String,
    pub lightness_label: String,
    pub disabled: bool,
}

impl Controls {
    pub fn new(initial: SwatchParams) -> Self {
        Self {
            saturation: initial.saturation,
            lightness: initial.lightness,
            disabled: false,
        }
    }

    pub fn params(&self) -> SwatchParams {
        SwatchParams::new(self.saturation, self.lightness)
    }

    /// Controls are locked while a batch is loading.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Returns the accepted value, or `None` when the input was ignored.
    pub fn apply(&mut self, channel: Channel, raw: &str) -> Option<Percent> {
        if self.disabled {
            debug!("Ignoring {:?} input while controls are disabled", channel);
            return None;
        }
        let value: Percent = match raw.parse() {
            Ok(value) => value,
            Err(e) => {
                debug!("Ignoring {:?} input {:?}: {}", channel, raw, e);
                return None;
            }
        };
        match channel {
            Channel::Saturation => self.saturation = value,
            Channel::Lightness => self.lightness = value,
        }
        Some(value)
    }

    pub fn view(&self) -> ControlsView {
        ControlsView {
            saturation: self.saturation,
            lightness: self.lightness,
            saturation_label: format!("Saturation: {}%", self.saturation),
            lightness_label: format!("Lightness: {}%", self.lightness),
            disabled: self.disabled,
        }
    }
}
