#![allow(dead_code)]

use async_trait::async_trait;
use huegrid_core::HslQuery;
use huegrid_pipeline::{ColorFetcher, FetchResponse, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// JSON body shaped like the naming service's `/id` response.
pub fn color_body(name: &str, hue: u16, s: u8, l: u8, hex: &str) -> String {
    serde_json::json!({
        "hex": { "value": hex, "clean": hex.trim_start_matches('#') },
        "rgb": { "r": (hue % 256) as u8, "g": s, "b": l, "value": "rgb(...)" },
        "hsl": { "h": hue, "s": s, "l": l, "value": "hsl(...)" },
        "name": {
            "value": name,
            "closest_named_hex": hex,
            "exact_match_name": false,
            "distance": 3
        }
    })
    .to_string()
}

/// Unique hex per (hue, s, l) so tests can tell which lookup a record came from.
pub fn hex_for(query: &HslQuery) -> String {
    format!(
        "#{:03X}{:02X}{:X}",
        query.hue.degrees(),
        query.saturation.get(),
        query.lightness.get() % 16
    )
}

/// Names every hue by its `band`-degree band, reporting the queried hue.
pub fn banded(band: u16) -> impl Fn(HslQuery) -> Result<FetchResponse, TransportError> {
    move |query| {
        let hue = query.hue.degrees();
        let name = format!("Band {}", hue / band);
        Ok(FetchResponse::new(
            200,
            color_body(
                &name,
                hue,
                query.saturation.get(),
                query.lightness.get(),
                &hex_for(&query),
            ),
        ))
    }
}

type DelayFn = Box<dyn Fn(HslQuery) -> Duration + Send + Sync>;

pub struct FnFetcher<H> {
    handler: H,
    delay: Option<DelayFn>,
    calls: AtomicUsize,
}

impl<H> FnFetcher<H>
where
    H: Fn(HslQuery) -> Result<FetchResponse, TransportError> + Send + Sync,
{
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(
        mut self,
        delay: impl Fn(HslQuery) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<H> ColorFetcher for FnFetcher<H>
where
    H: Fn(HslQuery) -> Result<FetchResponse, TransportError> + Send + Sync,
{
    async fn fetch(&self, query: HslQuery) -> Result<FetchResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(query)).await;
        }
        (self.handler)(query)
    }
}
