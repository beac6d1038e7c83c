//! Configuration Loader
//!
//! Loads and validates configuration from TOML files matching config.toml structure.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::application::MIN_DISPLAY_WIDTH;
use crate::domain::{Credentials, RefreshPolicy};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub display: DisplaySection,
    pub robinhood: RobinhoodSection,
    pub ticker: TickerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Display configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySection {
    /// Characters per display line
    pub width: usize,
    /// Serial device path ("/dev/ttyUSB0", "COM3")
    pub com_port: String,
    /// Serial baud rate
    pub baud: u32,
}

/// Robinhood account configuration section
#[derive(Clone, Deserialize)]
pub struct RobinhoodSection {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Base32 TOTP secret shown when enabling app-based two-factor
    #[serde(default)]
    pub multi_factor_secret: String,
    /// API base URL override
    #[serde(default)]
    pub api_url: Option<String>,
    /// Device token registered with the account
    #[serde(default)]
    pub device_token: Option<String>,
}

impl std::fmt::Debug for RobinhoodSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RobinhoodSection")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("multi_factor_secret", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl RobinhoodSection {
    /// Get username with environment variable override
    /// Checks ROBINHOOD_USERNAME env var first, falls back to config value
    pub fn get_username(&self) -> String {
        env_or("ROBINHOOD_USERNAME", &self.username)
    }

    /// Get password with environment variable override
    /// Checks ROBINHOOD_PASSWORD env var first, falls back to config value
    pub fn get_password(&self) -> String {
        env_or("ROBINHOOD_PASSWORD", &self.password)
    }

    /// Get TOTP secret with environment variable override
    /// Checks ROBINHOOD_MFA_SECRET env var first, falls back to config value
    pub fn get_multi_factor_secret(&self) -> String {
        env_or("ROBINHOOD_MFA_SECRET", &self.multi_factor_secret)
    }

    /// Credentials with environment overrides applied
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.get_username(),
            self.get_password(),
            self.get_multi_factor_secret(),
        )
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

/// Ticker refresh section, all rates in seconds
#[derive(Debug, Clone, Deserialize)]
pub struct TickerSection {
    pub market_open_refresh_rate: f64,
    pub market_after_hours_refresh_rate: f64,
    pub not_trading_refresh_rate: f64,
}

/// Logging configuration section (optional)
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate display section
        if self.display.width < MIN_DISPLAY_WIDTH {
            return Err(ConfigError::ValidationError(format!(
                "display width must be at least {} characters, got {}",
                MIN_DISPLAY_WIDTH, self.display.width
            )));
        }

        if self.display.com_port.is_empty() {
            return Err(ConfigError::ValidationError(
                "com_port cannot be empty".to_string(),
            ));
        }

        if self.display.baud == 0 {
            return Err(ConfigError::ValidationError(
                "baud must be > 0".to_string(),
            ));
        }

        // Validate credentials (after environment overrides)
        let credentials = self.robinhood.credentials();
        if credentials.username.is_empty() {
            return Err(ConfigError::ValidationError(
                "username cannot be empty (set it in config or ROBINHOOD_USERNAME)".to_string(),
            ));
        }

        if credentials.password.is_empty() {
            return Err(ConfigError::ValidationError(
                "password cannot be empty (set it in config or ROBINHOOD_PASSWORD)".to_string(),
            ));
        }

        if credentials.mfa_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "multi_factor_secret cannot be empty (set it in config or ROBINHOOD_MFA_SECRET)"
                    .to_string(),
            ));
        }

        // Validate ticker rates
        for (name, rate) in [
            ("market_open_refresh_rate", self.ticker.market_open_refresh_rate),
            ("market_after_hours_refresh_rate", self.ticker.market_after_hours_refresh_rate),
            ("not_trading_refresh_rate", self.ticker.not_trading_refresh_rate),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, rate
                )));
            }
        }

        Ok(())
    }
}

// Conversion from Config to RefreshPolicy
impl From<&TickerSection> for RefreshPolicy {
    fn from(ticker: &TickerSection) -> Self {
        RefreshPolicy::new(
            Duration::from_secs_f64(ticker.market_open_refresh_rate),
            Duration::from_secs_f64(ticker.market_after_hours_refresh_rate),
            Duration::from_secs_f64(ticker.not_trading_refresh_rate),
        )
    }
}
