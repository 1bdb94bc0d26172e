//! Catalog collaborator port: product lookup.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ProductId;
use crate::error::Result;

/// Current catalog data for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// Fetches current product data from the catalog collaborator.
///
/// Only consulted at quote creation when `quote.reprice_on_create` is set;
/// by default the line price captured at add-to-cart time is authoritative.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Look up a product by id.
    async fn product(&self, product_id: &ProductId) -> Result<CatalogProduct>;
}
