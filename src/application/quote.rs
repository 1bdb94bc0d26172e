//! Quote lifecycle: creation, lookup, and the usability gate.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tracing::{debug, info};

use super::cart::CartService;
use crate::config::QuoteConfig;
use crate::domain::{price_lines, BuyerId, Quote, QuoteId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::catalog::CatalogClient;
use crate::port::outbound::identity::{Principal, Role};
use crate::port::outbound::rates::{RateRequest, ShippingClient, TaxClient};
use crate::port::outbound::store::{OrderStore, QuoteStore};

/// Creates, fetches, and gates quotes.
///
/// A quote is a snapshot: creating one reads the cart through the cart
/// service and never mutates it, and the snapshot is an independent copy of
/// the line data.
pub struct QuoteService {
    carts: Arc<CartService>,
    quotes: Arc<dyn QuoteStore>,
    orders: Arc<dyn OrderStore>,
    tax: Arc<dyn TaxClient>,
    shipping: Arc<dyn ShippingClient>,
    catalog: Arc<dyn CatalogClient>,
    config: QuoteConfig,
    collaborator_timeout: StdDuration,
}

impl QuoteService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carts: Arc<CartService>,
        quotes: Arc<dyn QuoteStore>,
        orders: Arc<dyn OrderStore>,
        tax: Arc<dyn TaxClient>,
        shipping: Arc<dyn ShippingClient>,
        catalog: Arc<dyn CatalogClient>,
        config: QuoteConfig,
        collaborator_timeout: StdDuration,
    ) -> Self {
        Self {
            carts,
            quotes,
            orders,
            tax,
            shipping,
            catalog,
            config,
            collaborator_timeout,
        }
    }

    /// Price the current cart and freeze it into a new quote.
    ///
    /// Fails with a validation error for an empty cart. The cart itself is
    /// left untouched and stays editable; a later re-quote is a new quote.
    pub async fn create_quote(&self, buyer_id: &BuyerId, seller_id: &SellerId) -> Result<Quote> {
        let cart = self.carts.get_cart(buyer_id, seller_id).await?;
        if cart.is_empty() {
            return Err(CheckoutError::validation("cart", "cart is empty"));
        }

        let mut lines = cart.lines;
        if self.config.reprice_on_create {
            for line in &mut lines {
                let product = self
                    .with_timeout("catalog", self.catalog.product(&line.product_id))
                    .await?;
                line.unit_price = product.price;
            }
        }

        let rate_request = RateRequest {
            seller_id: seller_id.clone(),
            items: lines.clone(),
            buyer_address: None,
        };
        let (shipping_cost, tax_amount) = tokio::try_join!(
            self.with_timeout("shipping", self.shipping.shipping_cost(&rate_request)),
            self.with_timeout("tax", self.tax.tax_amount(&rate_request)),
        )?;

        let breakdown = price_lines(&lines, shipping_cost, tax_amount)?;
        let quote = Quote::new(
            buyer_id.clone(),
            seller_id.clone(),
            lines,
            breakdown,
            Utc::now(),
            Duration::minutes(self.config.ttl_minutes),
        );
        self.quotes.insert(&quote).await?;

        info!(
            quote_id = %quote.id,
            buyer_id = %buyer_id,
            seller_id = %seller_id,
            grand_total = %quote.grand_total,
            expires_at = %quote.expires_at,
            "Quote created"
        );
        Ok(quote)
    }

    /// Fetch a quote for its owner.
    ///
    /// Does not fail merely because the quote expired; callers needing
    /// freshness check `expires_at` or go through [`Self::assert_usable`].
    pub async fn get_quote(&self, principal: &Principal, quote_id: &QuoteId) -> Result<Quote> {
        let quote = self.fetch(quote_id).await?;
        if principal.role != Role::Admin && quote.buyer_id != principal.buyer_id {
            return Err(CheckoutError::Unauthorized(
                "quote belongs to another buyer".into(),
            ));
        }
        Ok(quote)
    }

    /// The gate called before payment: the quote must exist, be unexpired,
    /// and not already be consumed by an order.
    pub async fn assert_usable(&self, quote_id: &QuoteId) -> Result<Quote> {
        let quote = self.fetch(quote_id).await?;

        let now = Utc::now();
        if quote.is_expired_at(now) {
            debug!(quote_id = %quote_id, expired_at = %quote.expires_at, "Quote expired");
            return Err(CheckoutError::QuoteExpired {
                quote_id: quote_id.clone(),
                expired_at: quote.expires_at,
            });
        }

        if let Some(order) = self.orders.find_by_quote(quote_id).await? {
            return Err(CheckoutError::QuoteConsumed {
                quote_id: quote_id.clone(),
                order_id: order.id,
            });
        }

        Ok(quote)
    }

    async fn fetch(&self, quote_id: &QuoteId) -> Result<Quote> {
        self.quotes
            .get(quote_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "quote",
                id: quote_id.to_string(),
            })
    }

    async fn with_timeout<T>(
        &self,
        collaborator: &'static str,
        call: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.collaborator_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CheckoutError::Collaborator(format!(
                "{collaborator} request timed out"
            ))),
        }
    }
}
