//! Static catalog fake.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::ProductId;
use crate::error::{CheckoutError, Result};
use crate::port::outbound::catalog::{CatalogClient, CatalogProduct};

/// Serves product data from a fixed map.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    products: HashMap<ProductId, CatalogProduct>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, builder style.
    #[must_use]
    pub fn with_product(mut self, product_id: &str, name: &str, price: Decimal) -> Self {
        let id = ProductId::new(product_id);
        self.products.insert(
            id.clone(),
            CatalogProduct {
                product_id: id,
                name: name.to_string(),
                price,
            },
        );
        self
    }
}

#[async_trait]
impl CatalogClient for StaticCatalog {
    async fn product(&self, product_id: &ProductId) -> Result<CatalogProduct> {
        self.products
            .get(product_id)
            .cloned()
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "product",
                id: product_id.to_string(),
            })
    }
}
