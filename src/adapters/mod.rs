//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the
//! device-facing edges:
//! - Display: serial character-display wire protocol
//! - Robinhood: brokerage account API client
//! - TOTP: RFC 6238 one-time code generator
//! - CLI: Command-line interface

pub mod display;
pub mod robinhood;
pub mod totp;
pub mod cli;

pub use display::{open_serial_display, DisplayError, DisplayProtocol};
pub use robinhood::{RobinhoodClient, RobinhoodConfig};
pub use totp::TotpGenerator;
pub use cli::CliApp;
