//! Robinhood API Client
//!
//! HTTP client for the Robinhood account endpoints used by the ticker:
//! password-grant login with a second-factor code, and the portfolio
//! summary.

use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::{OneTimeCode, PortfolioSnapshot};
use crate::ports::brokerage::{BrokerageError, BrokeragePort, Session};
use super::types::{PortfolioPage, TokenRequest, TokenResponse};

/// Public OAuth client id of the Robinhood web app
pub const DEFAULT_CLIENT_ID: &str = "c82SH0WZOsabOXGP2sxqcj34FxkvfnWRZBKlBjFS";

/// Robinhood API client configuration
#[derive(Debug, Clone)]
pub struct RobinhoodConfig {
    /// Base URL for the API
    pub api_base_url: String,
    /// OAuth client id sent with the login
    pub client_id: String,
    /// Device token registered with the account, if any
    pub device_token: Option<String>,
    /// Requested token lifetime in seconds
    pub token_expires_in: u64,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RobinhoodConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.robinhood.com".to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            device_token: None,
            token_expires_in: 86_400,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Robinhood account client
#[derive(Debug, Clone)]
pub struct RobinhoodClient {
    config: RobinhoodConfig,
    http: Client,
}

impl RobinhoodClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, BrokerageError> {
        Self::with_config(RobinhoodConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: RobinhoodConfig) -> Result<Self, BrokerageError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrokerageError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Get the configured API base URL
    pub fn api_base_url(&self) -> &str {
        &self.config.api_base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base_url.trim_end_matches('/'), path)
    }

    /// Handle API response and deserialize
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, BrokerageError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BrokerageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BrokerageError::Parse(e.to_string()))
    }
}

#[async_trait]
impl BrokeragePort for RobinhoodClient {
    async fn login(
        &self,
        username: &str,
        password: &str,
        mfa_code: &OneTimeCode,
    ) -> Result<Session, BrokerageError> {
        let body = TokenRequest {
            grant_type: "password",
            scope: "internal",
            client_id: &self.config.client_id,
            expires_in: self.config.token_expires_in,
            username,
            password,
            mfa_code: mfa_code.as_str(),
            device_token: self.config.device_token.as_deref(),
        };

        let response = self.http
            .post(self.url("oauth2/token/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| BrokerageError::Http(e.to_string()))?;

        let token: TokenResponse = self.handle_response(response).await?;
        tracing::debug!("Login accepted, token valid for {:?}s", token.expires_in);

        Ok(Session::new(token.access_token, token.token_type))
    }

    async fn fetch_portfolio(&self, session: &Session) -> Result<PortfolioSnapshot, BrokerageError> {
        let response = self.http
            .get(self.url("portfolios/"))
            .header(reqwest::header::AUTHORIZATION, session.authorization())
            .send()
            .await
            .map_err(|e| BrokerageError::Http(e.to_string()))?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Portfolio request unauthorized, session may have expired");
        }

        let page: PortfolioPage = self.handle_response(response).await?;
        page.into_snapshot()
    }
}
