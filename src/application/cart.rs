//! Cart operations: validated, per-key serialized mutations.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::locks::KeyedLock;
use crate::domain::{BuyerId, Cart, LineId, ProductId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::store::CartStore;

/// Validated input for an add-to-cart call. The name and price are captured
/// from the client as-is and frozen later at quote time.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub name: String,
    pub unit_price: Decimal,
}

/// Cart operations scoped to a `(buyer, seller)` pair.
///
/// Every mutating operation on one pair is serialized through a keyed lock
/// (single writer at a time per key), so concurrent adds or removes cannot
/// lose updates. Reads bypass the lock; the store itself is consistent.
pub struct CartService {
    store: Arc<dyn CartStore>,
    locks: KeyedLock,
}

fn cart_key(buyer_id: &BuyerId, seller_id: &SellerId) -> String {
    format!("cart:{buyer_id}:{seller_id}")
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            store,
            locks: KeyedLock::new(),
        }
    }

    /// Add units of a product, creating the cart row if absent. Lines for
    /// the same product merge additively; the stored name and price win.
    pub async fn add_item(
        &self,
        buyer_id: &BuyerId,
        seller_id: &SellerId,
        item: NewItem,
    ) -> Result<Cart> {
        validate_ids(buyer_id, seller_id)?;
        if item.product_id.as_str().is_empty() {
            return Err(CheckoutError::validation("productId", "must not be empty"));
        }
        if item.quantity < 1 {
            return Err(CheckoutError::validation("quantity", "must be at least 1"));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(CheckoutError::validation("price", "must not be negative"));
        }

        let _guard = self.locks.acquire(&cart_key(buyer_id, seller_id)).await;

        let mut cart = self
            .store
            .get(buyer_id, seller_id)
            .await?
            .unwrap_or_else(|| Cart::empty(buyer_id.clone(), seller_id.clone()));
        cart.add_line(item.product_id, item.quantity, item.name, item.unit_price);
        self.store.put(&cart).await?;

        debug!(
            buyer_id = %buyer_id,
            seller_id = %seller_id,
            lines = cart.lines.len(),
            total = %cart.total_price,
            "Cart updated"
        );
        Ok(cart)
    }

    /// Fetch the cart, synthesizing an empty one when no row exists. An
    /// empty cart is a valid state, never an error.
    pub async fn get_cart(&self, buyer_id: &BuyerId, seller_id: &SellerId) -> Result<Cart> {
        validate_ids(buyer_id, seller_id)?;
        Ok(self
            .store
            .get(buyer_id, seller_id)
            .await?
            .unwrap_or_else(|| Cart::empty(buyer_id.clone(), seller_id.clone())))
    }

    /// Set the quantity of an existing line.
    pub async fn update_quantity(
        &self,
        buyer_id: &BuyerId,
        seller_id: &SellerId,
        line_id: &LineId,
        quantity: u32,
    ) -> Result<Cart> {
        validate_ids(buyer_id, seller_id)?;
        if quantity < 1 {
            return Err(CheckoutError::validation("quantity", "must be at least 1"));
        }

        let _guard = self.locks.acquire(&cart_key(buyer_id, seller_id)).await;

        let mut cart = self
            .store
            .get(buyer_id, seller_id)
            .await?
            .ok_or_else(|| line_not_found(line_id))?;
        if !cart.update_quantity(line_id, quantity) {
            return Err(line_not_found(line_id));
        }
        self.store.put(&cart).await?;
        Ok(cart)
    }

    /// Delete a line from the cart.
    pub async fn remove_line(
        &self,
        buyer_id: &BuyerId,
        seller_id: &SellerId,
        line_id: &LineId,
    ) -> Result<Cart> {
        validate_ids(buyer_id, seller_id)?;

        let _guard = self.locks.acquire(&cart_key(buyer_id, seller_id)).await;

        let mut cart = self
            .store
            .get(buyer_id, seller_id)
            .await?
            .ok_or_else(|| line_not_found(line_id))?;
        if !cart.remove_line(line_id) {
            return Err(line_not_found(line_id));
        }
        self.store.put(&cart).await?;
        Ok(cart)
    }

    /// Remove every line. Idempotent: clearing an empty or nonexistent cart
    /// succeeds and returns the empty cart.
    pub async fn clear(&self, buyer_id: &BuyerId, seller_id: &SellerId) -> Result<Cart> {
        validate_ids(buyer_id, seller_id)?;

        let _guard = self.locks.acquire(&cart_key(buyer_id, seller_id)).await;

        let mut cart = self
            .store
            .get(buyer_id, seller_id)
            .await?
            .unwrap_or_else(|| Cart::empty(buyer_id.clone(), seller_id.clone()));
        cart.clear();
        self.store.put(&cart).await?;
        Ok(cart)
    }
}

fn validate_ids(buyer_id: &BuyerId, seller_id: &SellerId) -> Result<()> {
    if buyer_id.as_str().is_empty() {
        return Err(CheckoutError::validation("buyerId", "must not be empty"));
    }
    if seller_id.as_str().is_empty() {
        return Err(CheckoutError::validation("sellerId", "must not be empty"));
    }
    Ok(())
}

fn line_not_found(line_id: &LineId) -> CheckoutError {
    CheckoutError::NotFound {
        entity: "cart line",
        id: line_id.to_string(),
    }
}
