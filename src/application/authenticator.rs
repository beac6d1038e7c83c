//! Authentication Session
//!
//! Logs in with a freshly generated one-time code and keeps retrying, with
//! a countdown on the display between attempts, until the brokerage
//! accepts. There is no attempt limit: an operator is expected to step in
//! when logins keep failing.
//!
//! States: `Idle -> Attempting -> Authenticated`, or on a rejected login
//! `Attempting -> Failed -> CountingDown -> Attempting`.

use chrono::Utc;
use std::io::Write;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::display::{DisplayError, DisplayProtocol};
use crate::domain::Credentials;
use crate::ports::{BrokeragePort, Clock, CodeError, OneTimeCodeSource, Session};

/// Pause between showing the code and sending the login
pub const SETTLE_DELAY: Duration = Duration::from_secs(3);

/// Countdown start after a failed attempt
pub const RETRY_COUNTDOWN: u32 = 10;

/// Length of one countdown tick
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// Narrowest display that fits every fixed screen text.
///
/// "Authenticating with" and "Exception Occurred." are the longest.
pub const MIN_DISPLAY_WIDTH: usize = 19;

/// Failures that end authentication; rejected logins are retried instead
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
    #[error("Failed to generate one-time code: {0}")]
    CodeGeneration(#[from] CodeError),
}

/// Where the login loop is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Attempting { attempt: u32 },
    Failed { attempt: u32, reason: String },
    CountingDown { attempt: u32 },
    Authenticated(Session),
}

/// Drives login against the brokerage until it succeeds
pub struct Authenticator<'a, B, G, C> {
    brokerage: &'a B,
    codes: &'a G,
    clock: &'a C,
    credentials: Credentials,
    settle_delay: Duration,
    countdown_from: u32,
}

impl<'a, B, G, C> Authenticator<'a, B, G, C>
where
    B: BrokeragePort,
    G: OneTimeCodeSource,
    C: Clock,
{
    pub fn new(brokerage: &'a B, codes: &'a G, clock: &'a C, credentials: Credentials) -> Self {
        Self {
            brokerage,
            codes,
            clock,
            credentials,
            settle_delay: SETTLE_DELAY,
            countdown_from: RETRY_COUNTDOWN,
        }
    }

    /// Log in, retrying forever on rejection.
    ///
    /// Returns only once a session is obtained, or on a display or code
    /// generation failure.
    pub async fn authenticate<W: Write>(
        &self,
        display: &mut DisplayProtocol<W>,
    ) -> Result<Session, AuthError> {
        let mut state = AuthState::Idle;

        loop {
            state = match state {
                AuthState::Idle => AuthState::Attempting { attempt: 1 },
                AuthState::Attempting { attempt } => self.attempt(display, attempt).await?,
                AuthState::Failed { attempt, reason } => {
                    display.clear()?;
                    display.write_line(1, "Exception Occurred.", "")?;
                    tracing::error!("Login attempt {} failed: {}", attempt, reason);
                    AuthState::CountingDown { attempt }
                }
                AuthState::CountingDown { attempt } => {
                    self.count_down(display).await?;
                    AuthState::Attempting { attempt: attempt + 1 }
                }
                AuthState::Authenticated(session) => {
                    display.clear()?;
                    display.write_line(1, "Authentication OK", "")?;
                    return Ok(session);
                }
            };
            tracing::debug!("Authentication state: {:?}", state);
        }
    }

    /// One login with a code generated now
    async fn attempt<W: Write>(
        &self,
        display: &mut DisplayProtocol<W>,
        attempt: u32,
    ) -> Result<AuthState, AuthError> {
        let now = self.clock.now().with_timezone(&Utc);
        let code = self.codes.code_at(&self.credentials.mfa_secret, now)?;

        display.write_line(1, "Authenticating with", "")?;
        display.write_line(2, "Robinhood API...", "")?;
        display.write_line(4, &format!("TOTP CODE: {}", code), "")?;

        self.clock.sleep(self.settle_delay).await;

        tracing::info!("Login attempt {} for {}", attempt, self.credentials.username);
        let result = self
            .brokerage
            .login(&self.credentials.username, &self.credentials.password, &code)
            .await;

        Ok(match result {
            Ok(session) => {
                tracing::info!("Authenticated after {} attempt(s)", attempt);
                AuthState::Authenticated(session)
            }
            Err(e) => AuthState::Failed {
                attempt,
                reason: format!("{:#}", anyhow::Error::from(e)),
            },
        })
    }

    async fn count_down<W: Write>(&self, display: &mut DisplayProtocol<W>) -> Result<(), AuthError> {
        for remaining in (1..=self.countdown_from).rev() {
            display.write_line(2, &format!("Retrying in {}...", remaining), "")?;
            self.clock.sleep(COUNTDOWN_TICK).await;
        }
        Ok(())
    }
}
