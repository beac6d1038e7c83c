//! Robinhood API payloads

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::PortfolioSnapshot;
use crate::ports::brokerage::BrokerageError;

/// OAuth password-grant login body
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub scope: &'static str,
    pub client_id: &'a str,
    pub expires_in: u64,
    pub username: &'a str,
    pub password: &'a str,
    pub mfa_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Paged list returned by `/portfolios/`
#[derive(Debug, Deserialize)]
pub struct PortfolioPage {
    pub results: Vec<PortfolioRecord>,
}

impl PortfolioPage {
    /// Snapshot of the account's first portfolio
    pub fn into_snapshot(self) -> Result<PortfolioSnapshot, BrokerageError> {
        let record = self.results.into_iter().next().ok_or(BrokerageError::NoPortfolio)?;
        PortfolioSnapshot::try_from(record)
    }
}

/// Portfolio fields used by the ticker; amounts arrive as decimal strings
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioRecord {
    pub equity: String,
    pub adjusted_portfolio_equity_previous_close: String,
    #[serde(default)]
    pub extended_hours_portfolio_equity: Option<String>,
}

fn parse_amount(field: &str, value: &str) -> Result<Decimal, BrokerageError> {
    Decimal::from_str(value.trim())
        .map_err(|e| BrokerageError::Parse(format!("{} = {:?}: {}", field, value, e)))
}

impl TryFrom<PortfolioRecord> for PortfolioSnapshot {
    type Error = BrokerageError;

    fn try_from(record: PortfolioRecord) -> Result<Self, Self::Error> {
        let equity = parse_amount("equity", &record.equity)?;
        let previous_close = parse_amount(
            "adjusted_portfolio_equity_previous_close",
            &record.adjusted_portfolio_equity_previous_close,
        )?;
        let extended = record
            .extended_hours_portfolio_equity
            .as_deref()
            .map(|v| parse_amount("extended_hours_portfolio_equity", v))
            .transpose()?;

        Ok(PortfolioSnapshot::new(equity, previous_close, extended))
    }
}
