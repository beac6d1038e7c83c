//! CLI Arguments
//!
//! The ticker needs no arguments; the flags below only move the config
//! file and raise log verbosity.

use clap::Parser;
use std::path::PathBuf;

/// Equity Ticker - brokerage portfolio value on a serial character display
#[derive(Parser, Debug)]
#[command(
    name = "equity-ticker",
    version = env!("CARGO_PKG_VERSION"),
    about = "Brokerage portfolio ticker for serial character displays",
    long_about = "Logs in to the brokerage with a time-based one-time code, then polls the \
                  account's equity and shows market state, equity, daily change and update \
                  time on a four-line character display."
)]
pub struct CliApp {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliApp {
    /// Config path with `~` expanded to the home directory
    pub fn config_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.config.to_string_lossy()).into_owned())
    }
}
