//! Domain Layer - Core ticker logic
//!
//! Pure types and rules with no I/O:
//! - `portfolio`: snapshot, market session and change derivation
//! - `refresh`: poll interval selection
//! - `format`: currency and clock formatting for the display
//! - `credentials`: login material and one-time codes

pub mod portfolio;
pub mod refresh;
pub mod format;
pub mod credentials;

pub use portfolio::{MarketSession, PortfolioSnapshot, PortfolioView};
pub use refresh::RefreshPolicy;
pub use format::{format_clock, format_currency};
pub use credentials::{Credentials, OneTimeCode};
