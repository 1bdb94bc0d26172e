//! In-memory store implementation.
//!
//! The reference implementation of the persistence ports; a database-backed
//! adapter slots behind the same traits.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{BuyerId, Cart, Order, OrderId, Quote, QuoteId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::store::{CartStore, OrderFilter, OrderStore, QuoteStore};

type CartKey = (BuyerId, SellerId);

#[derive(Debug, Default)]
struct OrderTable {
    by_id: HashMap<OrderId, Order>,
    /// Uniqueness index enforcing exactly one order per quote.
    by_quote: HashMap<QuoteId, OrderId>,
    insertion_order: Vec<OrderId>,
}

/// In-memory store backing all three persistence ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    carts: RwLock<HashMap<CartKey, Cart>>,
    quotes: RwLock<HashMap<QuoteId, Quote>>,
    orders: RwLock<OrderTable>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn get(&self, buyer_id: &BuyerId, seller_id: &SellerId) -> Result<Option<Cart>> {
        let key = (buyer_id.clone(), seller_id.clone());
        Ok(self.carts.read().get(&key).cloned())
    }

    async fn put(&self, cart: &Cart) -> Result<()> {
        let key = (cart.buyer_id.clone(), cart.seller_id.clone());
        self.carts.write().insert(key, cart.clone());
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MemoryStore {
    async fn insert(&self, quote: &Quote) -> Result<()> {
        self.quotes.write().insert(quote.id.clone(), quote.clone());
        Ok(())
    }

    async fn get(&self, id: &QuoteId) -> Result<Option<Quote>> {
        Ok(self.quotes.read().get(id).cloned())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert(&self, order: &Order) -> Result<()> {
        // Uniqueness check and insertion happen under one write lock; two
        // concurrent inserts for the same quote cannot both pass the check.
        let mut table = self.orders.write();
        if table.by_quote.contains_key(&order.quote_id) {
            return Err(CheckoutError::DuplicateOrder {
                quote_id: order.quote_id.clone(),
            });
        }
        table
            .by_quote
            .insert(order.quote_id.clone(), order.id.clone());
        table.by_id.insert(order.id.clone(), order.clone());
        table.insertion_order.push(order.id.clone());
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().by_id.get(id).cloned())
    }

    async fn find_by_quote(&self, quote_id: &QuoteId) -> Result<Option<Order>> {
        let table = self.orders.read();
        Ok(table
            .by_quote
            .get(quote_id)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let table = self.orders.read();
        Ok(table
            .insertion_order
            .iter()
            .rev()
            .filter_map(|id| table.by_id.get(id))
            .filter(|order| {
                filter
                    .buyer_id
                    .as_ref()
                    .map_or(true, |b| &order.buyer_id == b)
                    && filter
                        .seller_id
                        .as_ref()
                        .map_or(true, |s| &order.seller_id == s)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{price_lines, CartLine, LineId, ProductId};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn make_quote(buyer: &str, seller: &str) -> Quote {
        let lines = vec![CartLine {
            id: LineId::new(),
            product_id: ProductId::new("apple"),
            quantity: 2,
            name: "Apple".into(),
            unit_price: dec!(5.00),
        }];
        let breakdown = price_lines(&lines, dec!(2.00), dec!(1.50)).unwrap();
        Quote::new(
            BuyerId::new(buyer),
            SellerId::new(seller),
            lines,
            breakdown,
            Utc::now(),
            Duration::minutes(30),
        )
    }

    #[tokio::test]
    async fn cart_roundtrip_per_pair() {
        let store = MemoryStore::new();
        let mut cart = Cart::empty(BuyerId::new("b1"), SellerId::new("s1"));
        cart.add_line(ProductId::new("apple"), 1, "Apple".into(), dec!(5.00));

        CartStore::put(&store, &cart).await.unwrap();

        let loaded = CartStore::get(&store, &BuyerId::new("b1"), &SellerId::new("s1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, cart);

        let other = CartStore::get(&store, &BuyerId::new("b1"), &SellerId::new("s2"))
            .await
            .unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn quote_roundtrip() {
        let store = MemoryStore::new();
        let quote = make_quote("b1", "s1");

        QuoteStore::insert(&store, &quote).await.unwrap();

        let loaded = QuoteStore::get(&store, &quote.id).await.unwrap().unwrap();
        assert_eq!(loaded, quote);
    }

    #[tokio::test]
    async fn duplicate_order_for_quote_is_rejected() {
        let store = MemoryStore::new();
        let quote = make_quote("b1", "s1");

        let first = Order::from_quote(&quote, "stripe", "tx1", Utc::now());
        let second = Order::from_quote(&quote, "stripe", "tx2", Utc::now());

        OrderStore::insert(&store, &first).await.unwrap();
        let err = OrderStore::insert(&store, &second).await.unwrap_err();
        assert!(matches!(err, CheckoutError::DuplicateOrder { .. }));

        let found = OrderStore::find_by_quote(&store, &quote.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, first.id);
        assert_eq!(found.transaction_id, "tx1");
    }

    #[tokio::test]
    async fn list_filters_by_buyer_and_seller() {
        let store = MemoryStore::new();
        for (buyer, seller, tx) in [("b1", "s1", "t1"), ("b1", "s2", "t2"), ("b2", "s1", "t3")] {
            let order = Order::from_quote(&make_quote(buyer, seller), "stripe", tx, Utc::now());
            OrderStore::insert(&store, &order).await.unwrap();
        }

        let all = OrderStore::list(&store, &OrderFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let b1 = OrderStore::list(
            &store,
            &OrderFilter {
                buyer_id: Some(BuyerId::new("b1")),
                seller_id: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(b1.len(), 2);

        let s1 = OrderStore::list(
            &store,
            &OrderFilter {
                buyer_id: None,
                seller_id: Some(SellerId::new("s1")),
            },
        )
        .await
        .unwrap();
        assert_eq!(s1.len(), 2);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = MemoryStore::new();
        let first = Order::from_quote(&make_quote("b1", "s1"), "stripe", "t1", Utc::now());
        let second = Order::from_quote(&make_quote("b1", "s2"), "stripe", "t2", Utc::now());
        OrderStore::insert(&store, &first).await.unwrap();
        OrderStore::insert(&store, &second).await.unwrap();

        let all = OrderStore::list(&store, &OrderFilter::default()).await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }
}
