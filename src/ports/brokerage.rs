use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::domain::{OneTimeCode, PortfolioSnapshot};

#[derive(Debug, Error)]
pub enum BrokerageError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Account has no portfolio")]
    NoPortfolio,
}

/// Authenticated handle returned by a successful login
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
    token_type: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: token_type.into(),
        }
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token_type", &self.token_type)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Remote account service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrokeragePort: Send + Sync {
    /// Log in with username, password and a fresh second-factor code
    async fn login(
        &self,
        username: &str,
        password: &str,
        mfa_code: &OneTimeCode,
    ) -> Result<Session, BrokerageError>;

    /// Fetch the current portfolio equity figures
    async fn fetch_portfolio(&self, session: &Session) -> Result<PortfolioSnapshot, BrokerageError>;
}
