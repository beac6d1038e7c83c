//! Robinhood Adapter
//!
//! Implementation of the BrokeragePort for Robinhood accounts.

mod client;
mod types;

pub use client::{RobinhoodClient, RobinhoodConfig, DEFAULT_CLIENT_ID};
pub use types::{PortfolioPage, PortfolioRecord, TokenRequest, TokenResponse};
