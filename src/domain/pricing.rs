//! Pure pricing computation over a cart line snapshot.
//!
//! Tax and shipping amounts come from external collaborators; this module
//! only combines them with the line snapshot. No I/O, no clock.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::money::round_money;
use crate::error::{CheckoutError, Result};

/// The monetary breakdown of a priced cart snapshot.
///
/// `grand_total = subtotal + shipping_cost + tax_amount`, computed once here
/// and copied verbatim into the quote and later the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
}

/// Price a line snapshot with externally supplied shipping and tax.
///
/// Fails with a validation error for an empty snapshot; a quote cannot be
/// created for an empty cart.
pub fn price_lines(
    lines: &[CartLine],
    shipping_cost: Decimal,
    tax_amount: Decimal,
) -> Result<PriceBreakdown> {
    if lines.is_empty() {
        return Err(CheckoutError::validation("cart", "cart is empty"));
    }

    let subtotal = round_money(lines.iter().map(CartLine::line_total).sum());
    let shipping_cost = round_money(shipping_cost);
    let tax_amount = round_money(tax_amount);
    let grand_total = round_money(subtotal + shipping_cost + tax_amount);

    Ok(PriceBreakdown {
        subtotal,
        shipping_cost,
        tax_amount,
        grand_total,
    })
}
