//! Application assembly: wire config, stores, adapters, and services into a
//! running HTTP boundary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;
use url::Url;

use crate::adapter::http::{serve, Router};
use crate::adapter::jwt::HmacTokenVerifier;
use crate::adapter::rest::{
    RestCatalogClient, RestPaymentGateway, RestShippingClient, RestTaxClient,
};
use crate::application::{CartService, CheckoutService, QuoteService};
use crate::config::Config;
use crate::store::MemoryStore;

/// Build the request router from configuration.
///
/// The reference store is in-memory; a database-backed store slots in behind
/// the same ports without touching this wiring.
pub fn build_router(config: &Config) -> anyhow::Result<Arc<Router>> {
    let secret = config
        .auth
        .jwt_secret
        .as_deref()
        .context("JWT_SECRET must be set")?;
    let verifier = Arc::new(HmacTokenVerifier::new(secret.as_bytes()));

    let timeout = config.request_timeout();
    let catalog_url = Url::parse(&config.collaborators.catalog_url)?;
    let tax_url = Url::parse(&config.collaborators.tax_url)?;
    let shipping_url = Url::parse(&config.collaborators.shipping_url)?;
    let payment_url = Url::parse(&config.collaborators.payment_url)?;

    let store = Arc::new(MemoryStore::new());

    let carts = Arc::new(CartService::new(store.clone()));
    let quotes = Arc::new(QuoteService::new(
        Arc::clone(&carts),
        store.clone(),
        store.clone(),
        Arc::new(RestTaxClient::new(tax_url, timeout)),
        Arc::new(RestShippingClient::new(shipping_url, timeout)),
        Arc::new(RestCatalogClient::new(catalog_url, timeout)),
        config.quote.clone(),
        timeout,
    ));
    let checkout = Arc::new(CheckoutService::new(
        Arc::clone(&quotes),
        store.clone(),
        Arc::new(RestPaymentGateway::new(payment_url, timeout)),
        timeout,
    ));

    Ok(Arc::new(Router::new(carts, quotes, checkout, verifier)))
}

/// Run the service until the socket loop exits.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let router = build_router(&config)?;
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .context("invalid bind address")?;

    info!(
        quote_ttl_minutes = config.quote.ttl_minutes,
        reprice_on_create = config.quote.reprice_on_create,
        "Checkout service configured"
    );
    serve(addr, router).await?;
    Ok(())
}
