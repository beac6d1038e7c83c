use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::OneTimeCode;

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("Shared secret is not valid base32: {0}")]
    InvalidSecret(String),
    #[error("Time {0} is before the Unix epoch")]
    BeforeEpoch(DateTime<Utc>),
}

/// Generator of time-based second-factor codes
pub trait OneTimeCodeSource: Send + Sync {
    /// Code valid at `at` for the given shared secret
    fn code_at(&self, secret: &str, at: DateTime<Utc>) -> Result<OneTimeCode, CodeError>;
}
