use async_trait::async_trait;
use huegrid_core::HslQuery;
use thiserror::Error;

/// A lookup that never produced a response: connection refused, timeout, body read failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Status and body of one completed lookup, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP-like capability the aggregation pipeline consumes: one call per hue.
///
/// Non-success statuses are returned as `Ok`; only transport problems are `Err`.
#[async_trait]
pub trait ColorFetcher: Send + Sync {
    async fn fetch(&self, query: HslQuery) -> Result<FetchResponse, TransportError>;
}
