//! Monetary rounding for a single-currency system.
//!
//! All monetary amounts are `rust_decimal::Decimal` rounded to 2 decimal
//! places with round-half-to-even (banker's rounding). Every computed
//! monetary field (line totals, subtotal, tax, shipping, grand total) passes
//! through [`round_money`] at the point it is computed, so repeated
//! add/subtract cycles cannot drift.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places carried by every monetary amount.
pub const MONEY_SCALE: u32 = 2;

/// Round an amount to [`MONEY_SCALE`] places, half-to-even.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointNearestEven)
}
