use std::fmt;

/// Account login material, loaded once at startup
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Base32 shared secret for the one-time code
    pub mfa_secret: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        mfa_secret: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            mfa_secret: mfa_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("mfa_secret", &"<redacted>")
            .finish()
    }
}

/// Six-digit second-factor code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Zero-padded code from the low six digits of `value`
    pub fn from_value(value: u32) -> Self {
        Self(format!("{:06}", value % 1_000_000))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
