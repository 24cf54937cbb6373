use huegrid_core::HexColor;
use tracing::warn;

use crate::ack::CopyAcknowledgment;
use crate::clipboard::Clipboard;

/// Handles a swatch being activated: copy its hex, then acknowledge.
pub struct SwatchActivator<C> {
    clipboard: C,
    ack: CopyAcknowledgment,
}

impl<C: Clipboard> SwatchActivator<C> {
    pub fn new(clipboard: C, ack: CopyAcknowledgment) -> Self {
        Self { clipboard, ack }
    }

    pub fn acknowledgment(&self) -> &CopyAcknowledgment {
        &self.ack
    }

    /// A clipboard failure is logged and otherwise ignored; the
    /// acknowledgment is shown either way.
    pub fn activate(&self, hex: &HexColor) {
        if let Err(e) = self.clipboard.write_text(hex.as_str()) {
            warn!("Failed to copy {} to clipboard: {:#}", hex, e);
        }
        self.ack.show(hex.clone());
    }
}
