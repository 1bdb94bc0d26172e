//! REST adapter for the catalog collaborator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::domain::ProductId;
use crate::error::{CheckoutError, Result};
use crate::port::outbound::catalog::{CatalogClient, CatalogProduct};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductResponse {
    name: String,
    price: Decimal,
}

/// Calls the catalog collaborator over HTTP.
pub struct RestCatalogClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RestCatalogClient {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait]
impl CatalogClient for RestCatalogClient {
    async fn product(&self, product_id: &ProductId) -> Result<CatalogProduct> {
        let url = self
            .base_url
            .join(&format!("products/{product_id}"))
            .map_err(|err| CheckoutError::Collaborator(format!("bad catalog url: {err}")))?;

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| CheckoutError::Collaborator(format!("catalog: {err}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CheckoutError::NotFound {
                entity: "product",
                id: product_id.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(CheckoutError::Collaborator(format!(
                "catalog: provider returned {}",
                response.status()
            )));
        }

        let parsed: ProductResponse = response
            .json()
            .await
            .map_err(|err| CheckoutError::Collaborator(format!("catalog: {err}")))?;

        Ok(CatalogProduct {
            product_id: product_id.clone(),
            name: parsed.name,
            price: parsed.price,
        })
    }
}
