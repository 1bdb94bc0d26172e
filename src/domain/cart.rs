//! Mutable per-(buyer, seller) cart and its line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{BuyerId, LineId, ProductId, SellerId};
use super::money::round_money;

/// A single line item in a cart.
///
/// Owned exclusively by one [`Cart`]. The unit price and display name are
/// captured at add time and never overwritten by later adds of the same
/// product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Stable line identifier, assigned when the line is first appended.
    pub id: LineId,
    /// The catalog product this line refers to.
    pub product_id: ProductId,
    /// Units of the product; never below 1 for a stored line.
    pub quantity: u32,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price captured at add time.
    pub unit_price: Decimal,
}

impl CartLine {
    /// Price contribution of this line: `unit_price * quantity`, rounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        round_money(self.unit_price * Decimal::from(self.quantity))
    }
}

/// A buyer's cart for one seller.
///
/// At most one live cart exists per `(buyer, seller)` pair. `total_price` is
/// a cached projection of the lines, recomputed on every mutation; it is
/// never an independent source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub buyer_id: BuyerId,
    pub seller_id: SellerId,
    #[serde(rename = "items")]
    pub lines: Vec<CartLine>,
    pub total_price: Decimal,
}

impl Cart {
    /// An empty cart for the given pair. Also the synthesized value returned
    /// when no cart row exists; an empty cart is a valid state, not an error.
    #[must_use]
    pub fn empty(buyer_id: BuyerId, seller_id: SellerId) -> Self {
        Self {
            buyer_id,
            seller_id,
            lines: Vec::new(),
            total_price: Decimal::ZERO,
        }
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add units of a product.
    ///
    /// If a line for `product_id` already exists the quantity accumulates
    /// and the stored name/price are left as originally captured; otherwise
    /// a new line is appended. Returns the id of the affected line.
    pub fn add_line(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        name: String,
        unit_price: Decimal,
    ) -> LineId {
        let id = match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(existing) => {
                existing.quantity += quantity;
                existing.id.clone()
            }
            None => {
                let line = CartLine {
                    id: LineId::new(),
                    product_id,
                    quantity,
                    name,
                    unit_price,
                };
                let id = line.id.clone();
                self.lines.push(line);
                id
            }
        };
        self.recompute_total();
        id
    }

    /// Set the quantity of an existing line. Returns `false` if no line with
    /// that id belongs to this cart.
    pub fn update_quantity(&mut self, line_id: &LineId, quantity: u32) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| &l.id == line_id) else {
            return false;
        };
        line.quantity = quantity;
        self.recompute_total();
        true
    }

    /// Delete a line. Returns `false` if no line with that id belongs to
    /// this cart.
    pub fn remove_line(&mut self, line_id: &LineId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.id != line_id);
        if self.lines.len() == before {
            return false;
        }
        self.recompute_total();
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_price = round_money(self.lines.iter().map(CartLine::line_total).sum());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cart() -> Cart {
        Cart::empty(BuyerId::new("b1"), SellerId::new("s1"))
    }

    #[test]
    fn add_line_appends_and_totals() {
        let mut cart = cart();
        cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));
        cart.add_line(ProductId::new("pear"), 1, "Pear".into(), dec!(10.00));

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.total_price, dec!(20.00));
    }

    #[test]
    fn same_product_merges_additively() {
        let mut cart = cart();
        let first = cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));
        let second = cart.add_line(ProductId::new("apple"), 3, "Apple".into(), dec!(5.00));

        assert_eq!(first, second);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.total_price, dec!(25.00));
    }

    #[test]
    fn merge_keeps_originally_stored_name_and_price() {
        let mut cart = cart();
        cart.add_line(ProductId::new("apple"), 1, "Apple".into(), dec!(5.00));
        cart.add_line(ProductId::new("apple"), 1, "APPLE v2".into(), dec!(9.99));

        assert_eq!(cart.lines[0].name, "Apple");
        assert_eq!(cart.lines[0].unit_price, dec!(5.00));
        assert_eq!(cart.total_price, dec!(10.00));
    }

    #[test]
    fn update_quantity_recomputes_total() {
        let mut cart = cart();
        let id = cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));

        assert!(cart.update_quantity(&id, 4));
        assert_eq!(cart.total_price, dec!(20.00));
    }

    #[test]
    fn update_quantity_unknown_line_is_refused() {
        let mut cart = cart();
        cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));

        assert!(!cart.update_quantity(&LineId::from("missing"), 4));
        assert_eq!(cart.total_price, dec!(10.00));
    }

    #[test]
    fn remove_line_deletes_not_zeroes() {
        let mut cart = cart();
        let id = cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));
        cart.add_line(ProductId::new("pear"), 1, "Pear".into(), dec!(10.00));

        assert!(cart.remove_line(&id));
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.total_price, dec!(10.00));
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = cart();
        cart.add_line(ProductId::new("apple"), 2, "Apple".into(), dec!(5.00));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_price, Decimal::ZERO);
    }
}
