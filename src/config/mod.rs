//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, DisplaySection, LoggingSection, RobinhoodSection, TickerSection,
    load_config,
};
