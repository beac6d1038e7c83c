use rust_decimal::Decimal;
use std::fmt;

/// Trading session the account's equity figure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketSession {
    /// Regular trading hours
    Open,
    /// Extended-hours trading
    AfterHours,
}

impl MarketSession {
    /// Label shown on the right side of the status line
    pub fn label(&self) -> &'static str {
        match self {
            MarketSession::Open => "Open",
            MarketSession::AfterHours => "After Hours",
        }
    }
}

impl fmt::Display for MarketSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Account equity as reported by the brokerage for one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSnapshot {
    pub equity: Decimal,
    pub previous_close_equity: Decimal,
    pub extended_hours_equity: Option<Decimal>,
}

impl PortfolioSnapshot {
    pub fn new(
        equity: Decimal,
        previous_close_equity: Decimal,
        extended_hours_equity: Option<Decimal>,
    ) -> Self {
        Self {
            equity,
            previous_close_equity,
            extended_hours_equity,
        }
    }

    /// After hours iff the brokerage reports an extended-hours figure
    pub fn market_session(&self) -> MarketSession {
        match self.extended_hours_equity {
            Some(_) => MarketSession::AfterHours,
            None => MarketSession::Open,
        }
    }

    /// Equity for the current session
    pub fn displayed_equity(&self) -> Decimal {
        self.extended_hours_equity.unwrap_or(self.equity)
    }

    /// Change from the previous close
    pub fn change(&self) -> Decimal {
        self.displayed_equity() - self.previous_close_equity
    }

    pub fn view(&self) -> PortfolioView {
        PortfolioView {
            session: self.market_session(),
            displayed_equity: self.displayed_equity(),
            change: self.change(),
        }
    }
}

/// Derived figures handed to the renderer each cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortfolioView {
    pub session: MarketSession,
    pub displayed_equity: Decimal,
    pub change: Decimal,
}

impl PortfolioView {
    /// A change of exactly zero reads as a market that is not trading,
    /// whatever the session says.
    pub fn is_trading(&self) -> bool {
        !self.change.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_regular_session() {
        let snapshot = PortfolioSnapshot::new(dec!(1010.25), dec!(1000.00), None);

        assert_eq!(snapshot.market_session(), MarketSession::Open);
        assert_eq!(snapshot.displayed_equity(), dec!(1010.25));
        assert_eq!(snapshot.change(), dec!(10.25));
        assert!(snapshot.view().is_trading());
    }

    #[test]
    fn test_extended_hours_equity_wins() {
        let snapshot = PortfolioSnapshot::new(dec!(1010.25), dec!(1000.00), Some(dec!(998.50)));

        assert_eq!(snapshot.market_session(), MarketSession::AfterHours);
        assert_eq!(snapshot.displayed_equity(), dec!(998.50));
        assert_eq!(snapshot.change(), dec!(-1.50));
    }

    #[test]
    fn test_flat_equity_is_not_trading() {
        let snapshot = PortfolioSnapshot::new(dec!(1000.00), dec!(1000), None);
        let view = snapshot.view();

        assert_eq!(view.session, MarketSession::Open);
        assert!(view.change.is_zero());
        assert!(!view.is_trading());
    }

    #[test]
    fn test_flat_after_hours_is_not_trading() {
        let snapshot = PortfolioSnapshot::new(dec!(900), dec!(1000), Some(dec!(1000)));
        let view = snapshot.view();

        assert_eq!(view.session, MarketSession::AfterHours);
        assert!(!view.is_trading());
    }

    #[test]
    fn test_session_labels() {
        assert_eq!(MarketSession::Open.to_string(), "Open");
        assert_eq!(MarketSession::AfterHours.to_string(), "After Hours");
    }
}
