//! Fixed, locale-free formatting for the status lines.

use chrono::NaiveTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as dollars with exactly two decimals.
///
/// Negative amounts keep their sign after the currency symbol (`$-1.50`).
pub fn format_currency(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // drop the sign of a rounded-away negative
        rounded = Decimal::ZERO;
    }
    format!("${:.2}", rounded)
}

/// Format a wall-clock time on a 12-hour clock, e.g. `03:04:05 PM`.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_two_decimals() {
        assert_eq!(format_currency(dec!(123.45)), "$123.45");
        assert_eq!(format_currency(dec!(1000)), "$1000.00");
        assert_eq!(format_currency(dec!(1000.5)), "$1000.50");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn test_currency_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(1.005)), "$1.01");
        assert_eq!(format_currency(dec!(1.0049)), "$1.00");
        assert_eq!(format_currency(dec!(-1.005)), "$-1.01");
        assert_eq!(format_currency(dec!(12345.678900)), "$12345.68");
    }

    #[test]
    fn test_currency_negative_sign_after_symbol() {
        assert_eq!(format_currency(dec!(-1.50)), "$-1.50");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_clock_twelve_hour() {
        let afternoon = NaiveTime::from_hms_opt(15, 4, 5).unwrap();
        assert_eq!(format_clock(afternoon), "03:04:05 PM");

        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
        assert_eq!(format_clock(midnight), "12:00:00 AM");

        let noon = NaiveTime::from_hms_opt(12, 30, 59).unwrap();
        assert_eq!(format_clock(noon), "12:30:59 PM");
    }
}
