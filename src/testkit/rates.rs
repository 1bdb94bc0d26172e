//! Fixed-amount tax and shipping fakes.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::port::outbound::rates::{RateRequest, ShippingClient, TaxClient};

/// Returns the same tax amount for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedTaxClient(pub Decimal);

#[async_trait]
impl TaxClient for FixedTaxClient {
    async fn tax_amount(&self, _request: &RateRequest) -> Result<Decimal> {
        Ok(self.0)
    }
}

/// Returns the same shipping cost for every request.
#[derive(Debug, Clone, Copy)]
pub struct FixedShippingClient(pub Decimal);

#[async_trait]
impl ShippingClient for FixedShippingClient {
    async fn shipping_cost(&self, _request: &RateRequest) -> Result<Decimal> {
        Ok(self.0)
    }
}
