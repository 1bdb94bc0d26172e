//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Buyer (customer account) identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuyerId(String);

impl BuyerId {
    /// Create a new `BuyerId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the buyer ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuyerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BuyerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BuyerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Seller (company account) identifier - newtype for type safety.
///
/// Carts and quotes are scoped per `(buyer, seller)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SellerId(String);

impl SellerId {
    /// Create a new `SellerId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the seller ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SellerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SellerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SellerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Catalog product identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new `ProductId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the product ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Unique identifier for a cart line.
///
/// Generated as UUID v4 when a line is appended, or constructed from an
/// existing string for persistence/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineId(String);

impl LineId {
    /// Create a new `LineId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the line ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a quote.
///
/// Generated as UUID v4 for new quotes, or constructed from an existing
/// string for persistence/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(String);

impl QuoteId {
    /// Create a new `QuoteId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the quote ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for QuoteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for QuoteId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an order.
///
/// Generated as UUID v4 for new orders, or constructed from an existing
/// string for persistence/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new `OrderId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the order ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buyer_id_new_and_as_str() {
        let id = BuyerId::new("buyer-1");
        assert_eq!(id.as_str(), "buyer-1");
    }

    #[test]
    fn seller_id_display() {
        let id = SellerId::new("seller-1");
        assert_eq!(format!("{}", id), "seller-1");
    }

    #[test]
    fn product_id_from_str() {
        let id = ProductId::from("prod-9");
        assert_eq!(id.as_str(), "prod-9");
    }

    #[test]
    fn line_id_generates_unique_ids() {
        let id1 = LineId::new();
        let id2 = LineId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn quote_id_as_str_returns_uuid_format() {
        let id = QuoteId::new();
        // UUID v4 format: 8-4-4-4-12 hex chars
        assert_eq!(id.as_str().len(), 36);
        assert!(id.as_str().chars().filter(|c| *c == '-').count() == 4);
    }

    #[test]
    fn quote_id_from_string_preserves_value() {
        let id = QuoteId::from("existing-quote".to_string());
        assert_eq!(id.as_str(), "existing-quote");
    }

    #[test]
    fn order_id_default_generates_new() {
        let id1 = OrderId::default();
        let id2 = OrderId::default();
        assert_ne!(id1, id2);
    }
}
