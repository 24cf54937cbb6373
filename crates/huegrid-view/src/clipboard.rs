use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Write-only text sink for copied hex codes.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

/// Sets the terminal's system clipboard with an OSC 52 escape sequence.
pub struct Osc52Clipboard<W> {
    out: Mutex<W>,
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        let mut out = self.out.lock();
        out.write_all(osc52_sequence(text).as_bytes())
            .context("Failed to write clipboard escape sequence")?;
        out.flush().context("Failed to flush clipboard escape sequence")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_payload_as_base64() {
        assert_eq!(osc52_sequence("#0048AD"), "\x1b]52;c;IzAwNDhBRA==\x07");
    }

    #[test]
    fn writes_sequence_to_sink() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("#FFFFFF").unwrap();
        clipboard.write_text("#000000").unwrap();
        let written = String::from_utf8(clipboard.into_inner()).unwrap();
        assert_eq!(
            written,
            format!("{}{}", osc52_sequence("#FFFFFF"), osc52_sequence("#000000"))
        );
    }
}
