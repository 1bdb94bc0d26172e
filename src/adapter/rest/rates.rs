//! REST adapters for the tax and shipping collaborators.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::error::{CheckoutError, Result};
use crate::port::outbound::rates::{RateRequest, ShippingClient, TaxClient};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxResponse {
    tax_amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShippingResponse {
    shipping_cost: Decimal,
}

/// Calls the tax collaborator over HTTP.
pub struct RestTaxClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RestTaxClient {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait]
impl TaxClient for RestTaxClient {
    async fn tax_amount(&self, request: &RateRequest) -> Result<Decimal> {
        let response: TaxResponse = post_json(
            &self.client,
            &self.base_url,
            "tax",
            self.timeout,
            request,
        )
        .await?;
        Ok(response.tax_amount)
    }
}

/// Calls the shipping collaborator over HTTP.
pub struct RestShippingClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RestShippingClient {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait]
impl ShippingClient for RestShippingClient {
    async fn shipping_cost(&self, request: &RateRequest) -> Result<Decimal> {
        let response: ShippingResponse = post_json(
            &self.client,
            &self.base_url,
            "shipping",
            self.timeout,
            request,
        )
        .await?;
        Ok(response.shipping_cost)
    }
}

async fn post_json<T: for<'de> Deserialize<'de>>(
    client: &Client,
    base_url: &Url,
    path: &str,
    timeout: Duration,
    request: &RateRequest,
) -> Result<T> {
    let url = base_url
        .join(path)
        .map_err(|err| CheckoutError::Collaborator(format!("bad {path} url: {err}")))?;

    let response = client
        .post(url)
        .timeout(timeout)
        .json(request)
        .send()
        .await
        .map_err(|err| CheckoutError::Collaborator(format!("{path}: {err}")))?;

    if !response.status().is_success() {
        return Err(CheckoutError::Collaborator(format!(
            "{path}: provider returned {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|err| CheckoutError::Collaborator(format!("{path}: {err}")))
}
