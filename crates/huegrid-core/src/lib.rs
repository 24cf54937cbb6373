pub mod config;
pub mod error;
pub mod types;

pub use config::{
    ApiConfig, ConfigManager, DebounceConfig, DefaultsConfig, ErrorPolicy, LoggingConfig,
    Settings, ViewConfig,
};
pub use error::*;
pub use types::*;
