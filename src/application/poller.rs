//! Portfolio Poller
//!
//! Main ticker loop: fetches the portfolio, renders it, and sleeps for an
//! interval picked from the market state. A failed fetch ends the loop;
//! it is not retried here.

use std::io::Write;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::display::{DisplayError, DisplayProtocol};
use crate::application::renderer;
use crate::domain::{PortfolioView, RefreshPolicy};
use crate::ports::{BrokerageError, BrokeragePort, Clock, Session};

#[derive(Debug, Error)]
pub enum PollError {
    #[error("Portfolio fetch failed: {0}")]
    Fetch(#[from] BrokerageError),
    #[error("Display error: {0}")]
    Display(#[from] DisplayError),
}

/// Outcome of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCycle {
    pub view: PortfolioView,
    pub next_poll_in: Duration,
}

/// Polls the account through an authenticated session
pub struct PortfolioPoller<'a, B, C> {
    brokerage: &'a B,
    clock: &'a C,
    session: Session,
    policy: RefreshPolicy,
}

impl<'a, B, C> PortfolioPoller<'a, B, C>
where
    B: BrokeragePort,
    C: Clock,
{
    pub fn new(brokerage: &'a B, clock: &'a C, session: Session, policy: RefreshPolicy) -> Self {
        Self {
            brokerage,
            clock,
            session,
            policy,
        }
    }

    /// Poll until a fetch or display error occurs.
    pub async fn run<W: Write>(&self, display: &mut DisplayProtocol<W>) -> Result<(), PollError> {
        tracing::info!(
            "Starting portfolio poller - open {:?}, after hours {:?}, not trading {:?}",
            self.policy.market_open,
            self.policy.after_hours,
            self.policy.not_trading
        );

        loop {
            let cycle = self.poll_once(display).await?;
            self.clock.sleep(cycle.next_poll_in).await;
        }
    }

    /// Fetch, render, and pick the next interval, without sleeping.
    pub async fn poll_once<W: Write>(
        &self,
        display: &mut DisplayProtocol<W>,
    ) -> Result<PollCycle, PollError> {
        let snapshot = self.brokerage.fetch_portfolio(&self.session).await?;
        let view = snapshot.view();
        let next_poll_in = self.policy.interval_for(&view);

        tracing::info!(
            "{} | Equity ${} | Change ${} | next poll in {:?}",
            view.session,
            view.displayed_equity,
            view.change,
            next_poll_in
        );

        renderer::render(display, &view, self.clock.now().time())?;

        Ok(PollCycle { view, next_poll_in })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketSession, PortfolioSnapshot};
    use crate::ports::brokerage::MockBrokeragePort;
    use crate::ports::mocks::ManualClock;
    use rust_decimal_macros::dec;

    fn policy() -> RefreshPolicy {
        RefreshPolicy::new(
            Duration::from_secs(5),
            Duration::from_secs(30),
            Duration::from_secs(300),
        )
    }

    fn session() -> Session {
        Session::new("token", "Bearer")
    }

    #[tokio::test]
    async fn test_poll_once_open_market() {
        let mut brokerage = MockBrokeragePort::new();
        brokerage
            .expect_fetch_portfolio()
            .times(1)
            .returning(|_| Ok(PortfolioSnapshot::new(dec!(1010), dec!(1000), None)));
        let clock = ManualClock::at_timestamp(1_700_000_000);
        let mut display = DisplayProtocol::new(Vec::new(), 20);

        let poller = PortfolioPoller::new(&brokerage, &clock, session(), policy());
        let cycle = poller.poll_once(&mut display).await.unwrap();

        assert_eq!(cycle.view.session, MarketSession::Open);
        assert_eq!(cycle.next_poll_in, Duration::from_secs(5));
        assert_eq!(display.get_ref().len(), 4 * 24);
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_flat_day_uses_not_trading_rate() {
        let mut brokerage = MockBrokeragePort::new();
        brokerage
            .expect_fetch_portfolio()
            .returning(|_| Ok(PortfolioSnapshot::new(dec!(1000.00), dec!(1000.00), None)));
        let clock = ManualClock::at_timestamp(1_700_000_000);
        let mut display = DisplayProtocol::new(Vec::new(), 20);

        let poller = PortfolioPoller::new(&brokerage, &clock, session(), policy());
        let cycle = poller.poll_once(&mut display).await.unwrap();

        assert_eq!(cycle.next_poll_in, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_fetch_error_is_not_retried() {
        let mut brokerage = MockBrokeragePort::new();
        brokerage
            .expect_fetch_portfolio()
            .times(1)
            .returning(|_| Err(BrokerageError::NoPortfolio));
        let clock = ManualClock::at_timestamp(1_700_000_000);
        let mut display = DisplayProtocol::new(Vec::new(), 20);

        let poller = PortfolioPoller::new(&brokerage, &clock, session(), policy());
        let err = poller.run(&mut display).await.unwrap_err();

        assert!(matches!(err, PollError::Fetch(BrokerageError::NoPortfolio)));
        assert!(display.get_ref().is_empty());
        assert!(clock.sleeps().is_empty());
    }

    #[tokio::test]
    async fn test_session_is_passed_to_every_fetch() {
        let mut brokerage = MockBrokeragePort::new();
        brokerage
            .expect_fetch_portfolio()
            .withf(|s: &Session| s.authorization() == "Bearer token")
            .times(1)
            .returning(|_| Ok(PortfolioSnapshot::new(dec!(1), dec!(2), None)));
        let clock = ManualClock::at_timestamp(1_700_000_000);
        let mut display = DisplayProtocol::new(Vec::new(), 20);

        let poller = PortfolioPoller::new(&brokerage, &clock, session(), policy());
        assert!(poller.poll_once(&mut display).await.is_ok());
    }
}
