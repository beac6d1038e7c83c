//! Recording test doubles for the ports
//!
//! Each double keeps its calls behind `Arc<Mutex<..>>` so a test can hand
//! out `&` references to the components and inspect the calls afterwards.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};

use super::brokerage::{BrokerageError, BrokeragePort, Session};
use super::clock::Clock;
use super::one_time_code::{CodeError, OneTimeCodeSource};
use crate::domain::{OneTimeCode, PortfolioSnapshot};

/// Brokerage that replays queued responses in order
#[derive(Debug, Default)]
pub struct ScriptedBrokerage {
    logins: Arc<Mutex<VecDeque<Result<Session, BrokerageError>>>>,
    portfolios: Arc<Mutex<VecDeque<Result<PortfolioSnapshot, BrokerageError>>>>,
    login_calls: Arc<Mutex<Vec<(String, String)>>>,
    fetch_calls: Arc<Mutex<usize>>,
}

impl ScriptedBrokerage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next login
    pub fn with_login(self, result: Result<Session, BrokerageError>) -> Self {
        self.logins.lock().unwrap().push_back(result);
        self
    }

    /// Queue the result of the next portfolio fetch
    pub fn with_portfolio(self, result: Result<PortfolioSnapshot, BrokerageError>) -> Self {
        self.portfolios.lock().unwrap().push_back(result);
        self
    }

    /// Recorded (username, code) pairs
    pub fn login_calls(&self) -> Vec<(String, String)> {
        self.login_calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }
}

#[async_trait]
impl BrokeragePort for ScriptedBrokerage {
    async fn login(
        &self,
        username: &str,
        _password: &str,
        mfa_code: &OneTimeCode,
    ) -> Result<Session, BrokerageError> {
        self.login_calls
            .lock()
            .unwrap()
            .push((username.to_string(), mfa_code.to_string()));
        self.logins
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BrokerageError::Http("No response configured".to_string())))
    }

    async fn fetch_portfolio(&self, _session: &Session) -> Result<PortfolioSnapshot, BrokerageError> {
        *self.fetch_calls.lock().unwrap() += 1;
        self.portfolios
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BrokerageError::Http("No response configured".to_string())))
    }
}

/// Clock that only moves when slept on
#[derive(Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Local>>>,
    sleeps: Arc<Mutex<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
            sleeps: Arc::default(),
        }
    }

    /// Clock starting at the given Unix timestamp
    pub fn at_timestamp(secs: i64) -> Self {
        let start = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or_default()
            .with_timezone(&Local);
        Self::new(start)
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn total_slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::zero());
    }
}

/// Code source deriving the code from the request time alone
///
/// Two requests at different instants yield different codes, which lets
/// tests see that a code was regenerated.
#[derive(Debug, Default)]
pub struct TimestampCodes {
    requests: Arc<Mutex<Vec<DateTime<Utc>>>>,
}

impl TimestampCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<DateTime<Utc>> {
        self.requests.lock().unwrap().clone()
    }
}

impl OneTimeCodeSource for TimestampCodes {
    fn code_at(&self, _secret: &str, at: DateTime<Utc>) -> Result<OneTimeCode, CodeError> {
        self.requests.lock().unwrap().push(at);
        let secs = u32::try_from(at.timestamp()).map_err(|_| CodeError::BeforeEpoch(at))?;
        Ok(OneTimeCode::from_value(secs))
    }
}
