//! Persistence ports for carts, quotes, and orders.
//!
//! These are the only shared mutable resources in the system; every access
//! goes through the owning service, never directly into another component's
//! storage.

use async_trait::async_trait;

use crate::domain::{BuyerId, Cart, Order, OrderId, Quote, QuoteId, SellerId};
use crate::error::Result;

/// Storage operations for carts, keyed by `(buyer, seller)`.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Get the cart for a pair, if one exists.
    async fn get(&self, buyer_id: &BuyerId, seller_id: &SellerId) -> Result<Option<Cart>>;

    /// Save a cart, replacing any existing row for its pair.
    async fn put(&self, cart: &Cart) -> Result<()>;
}

/// Storage operations for quotes. Quotes are insert-only.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Persist a new quote.
    async fn insert(&self, quote: &Quote) -> Result<()>;

    /// Get a quote by ID.
    async fn get(&self, id: &QuoteId) -> Result<Option<Quote>>;
}

/// Filter for order listings.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub buyer_id: Option<BuyerId>,
    pub seller_id: Option<SellerId>,
}

/// Storage operations for orders. Orders are insert-only.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order.
    ///
    /// Fails with [`CheckoutError::DuplicateOrder`] if an order for the same
    /// quote id already exists. The existence check and the insertion are a
    /// single atomic step, not a read-then-write.
    ///
    /// [`CheckoutError::DuplicateOrder`]: crate::error::CheckoutError::DuplicateOrder
    async fn insert(&self, order: &Order) -> Result<()>;

    /// Get an order by ID.
    async fn get(&self, id: &OrderId) -> Result<Option<Order>>;

    /// Get the order consuming a quote, if any.
    async fn find_by_quote(&self, quote_id: &QuoteId) -> Result<Option<Order>>;

    /// List orders matching the filter, newest first.
    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>>;
}
