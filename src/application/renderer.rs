//! Status Renderer
//!
//! Maps a portfolio view onto the four display lines.

use chrono::NaiveTime;
use std::io::Write;

use crate::adapters::display::{DisplayError, DisplayProtocol};
use crate::domain::{format_clock, format_currency, MarketSession, PortfolioView};

/// Text for one display line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub line: u8,
    pub left: String,
    pub right: String,
}

impl StatusLine {
    fn new(line: u8, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            line,
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Lines for the view as of `updated_at`, top to bottom
pub fn status_lines(view: &PortfolioView, updated_at: NaiveTime) -> [StatusLine; 4] {
    let market = match view.session {
        MarketSession::Open => StatusLine::new(1, "Market Status", view.session.label()),
        MarketSession::AfterHours => StatusLine::new(1, "Market", view.session.label()),
    };

    // Trading is decided on the exact change, so a sub-cent move reads as a
    // gain or loss next to "$0.00".
    let change = if !view.is_trading() {
        StatusLine::new(3, "Not Trading", "")
    } else {
        let motion = if view.change.is_sign_negative() { "Loss" } else { "Gain" };
        StatusLine::new(3, format!("Daily {}", motion), format_currency(view.change))
    };

    [
        market,
        StatusLine::new(2, "Equity", format_currency(view.displayed_equity)),
        change,
        StatusLine::new(4, "Updated", format_clock(updated_at)),
    ]
}

/// Write the status lines to the display.
///
/// Stops at the first failing line; lines already written stay on screen.
pub fn render<W: Write>(
    display: &mut DisplayProtocol<W>,
    view: &PortfolioView,
    updated_at: NaiveTime,
) -> Result<(), DisplayError> {
    for status in status_lines(view, updated_at) {
        display.write_line(status.line, &status.left, &status.right)?;
    }
    Ok(())
}
