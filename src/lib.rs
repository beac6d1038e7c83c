//! Equity Ticker - Brokerage portfolio value on a serial character display
//!
//! Logs in to the brokerage with a time-based one-time code, then polls the
//! account and renders market state, equity, daily change and update time
//! on a four-line character-matrix display.
//!
//! # Modules
//!
//! - `domain`: Core logic (PortfolioSnapshot, RefreshPolicy, formatting)
//! - `ports`: Trait abstractions (BrokeragePort, OneTimeCodeSource, Clock)
//! - `adapters`: External implementations (display protocol, Robinhood, TOTP, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Authentication loop, poller and status renderer

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
