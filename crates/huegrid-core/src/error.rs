use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an aggregation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    NetworkFailure,
    PartialBatchFailure,
    ParseFailure,
}

/// Failure of a whole aggregation batch. Any one lookup failing aborts the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    #[error("Network failure on hue {hue}: {message}")]
    Network { hue: u16, message: String },

    #[error("Failed to fetch {failed} of {total} colors (first failing status {status})")]
    PartialBatch {
        failed: usize,
        total: usize,
        status: u16,
    },

    #[error("Malformed response for hue {hue}: {message}")]
    Parse { hue: u16, message: String },
}

impl AggregationError {
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Network { .. } => FailureReason::NetworkFailure,
            Self::PartialBatch { .. } => FailureReason::PartialBatchFailure,
            Self::Parse { .. } => FailureReason::ParseFailure,
        }
    }
}

#[derive(Error, Debug)]
pub enum HueGridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, HueGridError>;
