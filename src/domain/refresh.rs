use std::time::Duration;

use super::portfolio::{MarketSession, PortfolioView};

/// Poll intervals for each market state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    pub market_open: Duration,
    pub after_hours: Duration,
    pub not_trading: Duration,
}

impl RefreshPolicy {
    pub fn new(market_open: Duration, after_hours: Duration, not_trading: Duration) -> Self {
        Self {
            market_open,
            after_hours,
            not_trading,
        }
    }

    /// Pick the sleep before the next poll.
    ///
    /// A flat change overrides the session rate.
    pub fn interval_for(&self, view: &PortfolioView) -> Duration {
        if !view.is_trading() {
            return self.not_trading;
        }
        match view.session {
            MarketSession::Open => self.market_open,
            MarketSession::AfterHours => self.after_hours,
        }
    }
}
