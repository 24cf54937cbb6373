use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config as cfg;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;
use crate::types::{Percent, SwatchParams};

pub const ENV_PREFIX: &str = "HUEGRID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the color naming service; lookups go to `{base_url}/id`.
    #[serde(default = "ApiConfig::default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "ApiConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    fn default_base_url() -> String {
        "https://www.thecolorapi.com".to_string()
    }

    fn default_timeout_secs() -> u64 {
        10
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebounceConfig {
    #[serde(default = "DebounceConfig::default_delay_ms")]
    pub delay_ms: u64,
}

impl DebounceConfig {
    fn default_delay_ms() -> u64 {
        500
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: Self::default_delay_ms(),
        }
    }
}

/// What the grid shows after a failed aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Drop the previous grid so stale colors are never shown under new parameters.
    #[default]
    Clear,
    /// Keep showing the last good grid beneath the error.
    Preserve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_ack_duration_ms")]
    pub ack_duration_ms: u64,
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

impl ViewConfig {
    fn default_ack_duration_ms() -> u64 {
        1000
    }

    pub fn ack_duration(&self) -> Duration {
        Duration::from_millis(self.ack_duration_ms)
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            ack_duration_ms: Self::default_ack_duration_ms(),
            on_error: ErrorPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "DefaultsConfig::default_saturation")]
    pub saturation: u8,
    #[serde(default = "DefaultsConfig::default_lightness")]
    pub lightness: u8,
}

impl DefaultsConfig {
    fn default_saturation() -> u8 {
        100
    }

    fn default_lightness() -> u8 {
        50
    }

    pub fn params(&self) -> Result<SwatchParams, ConfigError> {
        let saturation = Percent::new(self.saturation).ok_or_else(|| {
            ConfigError::Validation("defaults.saturation must be 0..=100".into())
        })?;
        let lightness = Percent::new(self.lightness).ok_or_else(|| {
            ConfigError::Validation("defaults.lightness must be 0..=100".into())
        })?;
        Ok(SwatchParams::new(saturation, lightness))
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            saturation: Self::default_saturation(),
            lightness: Self::default_lightness(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub debounce: DebounceConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Validation(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "api.base_url must be http(s), got '{}'",
                base.scheme()
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be > 0".into(),
            ));
        }
        self.defaults.params()?;
        Ok(())
    }
}

/// Loads [`Settings`] from layered files and `HUEGRID__*` environment variables.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    settings: Settings,
    config_dir: PathBuf,
    env: String,
}

impl ConfigManager {
    pub fn new(config_dir: Option<PathBuf>, env_override: Option<String>) -> Result<Self> {
        let env_name = env_override.unwrap_or_else(Self::default_env);
        let config_dir = config_dir.unwrap_or_else(Self::default_config_dir);
        let settings = Self::load_from_sources(&config_dir, &env_name)?;
        settings
            .validate()
            .with_context(|| format!("validating configuration from {:?}", config_dir))?;
        Ok(Self {
            settings,
            config_dir,
            env: env_name,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    fn default_env() -> String {
        env::var("HUEGRID_ENV").unwrap_or_else(|_| "development".to_string())
    }

    /// Priority order:
    /// 1. ~/.huegrid/
    /// 2. ./config/
    /// 3. Current directory
    pub fn default_config_dir() -> PathBuf {
        if let Some(home_dir) = dirs::home_dir() {
            let user_dir = home_dir.join(".huegrid");
            if user_dir.exists() {
                info!("Using config directory: {:?}", user_dir);
                return user_dir;
            }
        }

        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let project_config = cwd.join("config");
        if project_config.exists() {
            info!("Using config directory: {:?}", project_config);
            return project_config;
        }

        info!("Using config directory: {:?}", cwd);
        cwd
    }

    pub fn load_from_sources(config_dir: &Path, env_name: &str) -> Result<Settings> {
        let settings: Settings = cfg::Config::builder()
            .add_source(cfg::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                cfg::File::from(config_dir.join(format!("{}.toml", env_name))).required(false),
            )
            .add_source(cfg::File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                cfg::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("building configuration")?
            .try_deserialize()
            .context("deserializing configuration")?;
        Ok(settings)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.settings).context("serializing settings to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.debounce.delay(), Duration::from_millis(500));
        assert_eq!(settings.view.ack_duration(), Duration::from_millis(1000));
        assert_eq!(settings.view.on_error, ErrorPolicy::Clear);

        let params = settings.defaults.params().unwrap();
        assert_eq!(params.saturation.get(), 100);
        assert_eq!(params.lightness.get(), 50);
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".into();
        assert!(settings.validate().is_err());

        settings.api.base_url = "ftp://colors.example".into();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_zero_timeout_and_out_of_range_defaults() {
        let mut settings = Settings::default();
        settings.api.timeout_secs = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.defaults.lightness = 101;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [view]
            on_error = "preserve"
            "#,
        )
        .unwrap();
        assert_eq!(settings.view.on_error, ErrorPolicy::Preserve);
        assert_eq!(settings.view.ack_duration_ms, 1000);
        assert_eq!(settings.api, ApiConfig::default());
    }
}
