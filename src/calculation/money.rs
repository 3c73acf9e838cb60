//! Currency display formatting.
//!
//! Amounts are stored at full precision and rounded only here, when they
//! are rendered onto a payslip.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for every amount.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Formats an amount as `<symbol> <amount>` with exactly two decimal places.
///
/// Midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use payslip_dispatch::calculation::format_amount;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("975.5").unwrap();
/// assert_eq!(format_amount("$", amount), "$ 975.50");
/// ```
pub fn format_amount(currency_symbol: &str, amount: Decimal) -> String {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_DECIMAL_PLACES);
    format!("{} {}", currency_symbol, rounded)
}
