//! Money display helpers.
//!
//! All money values in the system are [`rust_decimal::Decimal`] amounts in
//! the currency's standard unit (dollars, not cents). Stored totals keep full
//! precision; only display output is rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a decimal amount as a dollar string, e.g. `$37.97`.
///
/// Rounds half-away-from-zero to two decimal places, matching how totals are
/// presented to customers (`29.97 + 2.997 + 5` displays as `$37.97`).
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rounds_half_up() {
        assert_eq!(format_usd(Decimal::new(37_967, 3)), "$37.97");
        assert_eq!(format_usd(Decimal::new(2_997, 3)), "$3.00");
    }

    #[test]
    fn test_format_keeps_two_places() {
        assert_eq!(format_usd(Decimal::new(27, 0)), "$27.00");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }
}
