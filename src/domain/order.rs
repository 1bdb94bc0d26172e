//! Immutable order records, the terminal state of the checkout pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::{BuyerId, OrderId, QuoteId, SellerId};
use super::quote::Quote;

/// An order materialized from an accepted quote after payment capture.
///
/// The monetary fields are copied verbatim from the quote; there is no
/// repricing at order time. `quote_id` is a weak back-reference for lookup,
/// not ownership, and exactly one order may ever exist per quote id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub quote_id: QuoteId,
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
    #[serde(rename = "items")]
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
    pub payment_method: String,
    pub transaction_id: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Materialize an order from a quote and a completed capture.
    #[must_use]
    pub fn from_quote(
        quote: &Quote,
        payment_method: impl Into<String>,
        transaction_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OrderId::new(),
            quote_id: quote.id.clone(),
            buyer_id: quote.buyer_id.clone(),
            seller_id: quote.seller_id.clone(),
            lines: quote.lines.clone(),
            subtotal: quote.subtotal,
            shipping_cost: quote.shipping_cost,
            tax_amount: quote.tax_amount,
            grand_total: quote.grand_total,
            payment_method: payment_method.into(),
            transaction_id: transaction_id.into(),
            created_at,
        }
    }
}
