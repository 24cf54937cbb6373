//! HueGrid aggregation pipeline
//!
//! Provides:
//! - `ColorFetcher`: the HTTP-like lookup capability, with a reqwest client
//! - `ColorAggregator`: 360-way hue fan-out, all-or-nothing join, name dedupe
//! - `Debouncer` / `ParamsDebouncer`: settle user inputs before aggregating
//! - `Explorer`: generation-guarded state container driving the grid

pub mod aggregate;
pub mod client;
pub mod debounce;
pub mod explorer;
pub mod fetcher;
pub mod response;

pub use aggregate::*;
pub use client::*;
pub use debounce::*;
pub use explorer::*;
pub use fetcher::*;
pub use response::*;
