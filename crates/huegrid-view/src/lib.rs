//! Presentation adapter for HueGrid.
//!
//! Turns explorer state into renderable view-models, picks readable text
//! colors for each swatch and handles the copy-to-clipboard interaction.

pub mod ack;
pub mod clipboard;
pub mod controls;
pub mod grid;
pub mod interaction;
pub mod palette;
pub mod swatch;

pub use ack::*;
pub use clipboard::*;
pub use controls::*;
pub use grid::*;
pub use interaction::*;
pub use palette::*;
pub use swatch::*;
