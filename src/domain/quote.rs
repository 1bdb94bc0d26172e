//! Immutable, time-bounded price snapshots.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::{BuyerId, QuoteId, SellerId};
use super::pricing::PriceBreakdown;

/// Lifecycle state of a quote, derived rather than stored.
///
/// `Active -> Expired` happens by clock alone; `Active -> Consumed` happens
/// when an order referencing the quote exists. Neither transition reverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Active,
    Expired,
    Consumed,
}

/// A frozen price snapshot of a cart, valid until `expires_at`.
///
/// Quotes are never mutated after creation; a re-quote is a new quote id.
/// The line data is an independent copy: editing the cart after quoting
/// cannot affect the quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: QuoteId,
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
    #[serde(rename = "items")]
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax_amount: Decimal,
    pub grand_total: Decimal,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Quote {
    /// Freeze a priced line snapshot into a new quote with the given TTL.
    #[must_use]
    pub fn new(
        buyer_id: BuyerId,
        seller_id: SellerId,
        lines: Vec<CartLine>,
        breakdown: PriceBreakdown,
        created_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: QuoteId::new(),
            buyer_id,
            seller_id,
            lines,
            subtotal: breakdown.subtotal,
            shipping_cost: breakdown.shipping_cost,
            tax_amount: breakdown.tax_amount,
            grand_total: breakdown.grand_total,
            created_at,
            expires_at: created_at + ttl,
        }
    }

    /// Whether the quote is past its TTL at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Derive the lifecycle state at `now`, given whether an order already
    /// references this quote.
    #[must_use]
    pub fn status_at(&self, now: DateTime<Utc>, consumed: bool) -> QuoteStatus {
        if consumed {
            QuoteStatus::Consumed
        } else if self.is_expired_at(now) {
            QuoteStatus::Expired
        } else {
            QuoteStatus::Active
        }
    }
}
