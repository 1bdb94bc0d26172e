//! Tax and shipping collaborator ports.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{CartLine, SellerId};
use crate::error::Result;

/// The inputs both rate collaborators price against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub seller_id: SellerId,
    pub items: Vec<CartLine>,
    /// Destination address, when the caller has one on file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<String>,
}

/// Computes the tax contribution for a quote.
#[async_trait]
pub trait TaxClient: Send + Sync {
    /// Tax amount for the given seller and items.
    async fn tax_amount(&self, request: &RateRequest) -> Result<Decimal>;
}

/// Computes the shipping contribution for a quote.
#[async_trait]
pub trait ShippingClient: Send + Sync {
    /// Shipping cost for the given seller and items.
    async fn shipping_cost(&self, request: &RateRequest) -> Result<Decimal>;
}
