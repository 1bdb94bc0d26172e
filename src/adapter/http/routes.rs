//! Route dispatch from parsed request parts to application services.
//!
//! Dispatch is separated from the socket loop so it can be exercised
//! directly in tests without a listener.

use std::sync::Arc;

use bytes::Bytes;
use hyper::{Method, StatusCode};
use tracing::debug;

use super::request::{
    optional_seller_id_query, parse_json, seller_id_query, AddItemRequest, CreateQuoteRequest,
    PlaceOrderRequest, UpdateQuantityRequest,
};
use super::response::{error, json, HttpResponse};
use crate::application::{CartService, CheckoutService, NewItem, QuoteService};
use crate::domain::{LineId, OrderId, ProductId, QuoteId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::identity::{Principal, Role, TokenVerifier};

/// The HTTP boundary: authenticates every request, authorizes by role, and
/// forwards to the services. Validation and authorization failures are
/// rejected here, before any store is touched.
pub struct Router {
    carts: Arc<CartService>,
    quotes: Arc<QuoteService>,
    checkout: Arc<CheckoutService>,
    verifier: Arc<dyn TokenVerifier>,
}

impl Router {
    pub fn new(
        carts: Arc<CartService>,
        quotes: Arc<QuoteService>,
        checkout: Arc<CheckoutService>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            carts,
            quotes,
            checkout,
            verifier,
        }
    }

    /// Dispatch one request. Never panics; every failure becomes a
    /// kind-carrying error response.
    pub async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        bearer: Option<&str>,
        body: Bytes,
    ) -> HttpResponse {
        debug!(%method, path, "Request received");
        match self.route(method, path, query, bearer, body).await {
            Ok(response) => response,
            Err(err) => error(&err),
        }
    }

    async fn route(
        &self,
        method: &Method,
        path: &str,
        query: &str,
        bearer: Option<&str>,
        body: Bytes,
    ) -> Result<HttpResponse> {
        let principal = self.authenticate(bearer).await?;

        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        match (method, segments.as_slice()) {
            (&Method::POST, ["cart"]) => self.add_item(&principal, &body).await,
            (&Method::GET, ["cart"]) => self.get_cart(&principal, query).await,
            (&Method::PUT, ["cart", line_id]) => {
                self.update_quantity(&principal, line_id, query, &body).await
            }
            (&Method::DELETE, ["cart", line_id]) => {
                self.remove_line(&principal, line_id, query).await
            }
            (&Method::DELETE, ["cart"]) => self.clear_cart(&principal, query).await,
            (&Method::POST, ["quotes"]) => self.create_quote(&principal, &body).await,
            (&Method::GET, ["quotes", quote_id]) => self.get_quote(&principal, quote_id).await,
            (&Method::POST, ["orders"]) => self.place_order(&principal, &body).await,
            (&Method::GET, ["orders"]) => self.list_orders(&principal, query).await,
            (&Method::GET, ["orders", order_id]) => self.get_order(&principal, order_id).await,
            _ => Err(CheckoutError::NotFound {
                entity: "route",
                id: format!("{method} {path}"),
            }),
        }
    }

    async fn authenticate(&self, bearer: Option<&str>) -> Result<Principal> {
        let token =
            bearer.ok_or_else(|| CheckoutError::Unauthenticated("missing bearer token".into()))?;
        self.verifier.verify(token).await
    }

    /// Cart and quote mutations belong to customers.
    fn require_customer(principal: &Principal) -> Result<()> {
        if principal.role != Role::Customer {
            return Err(CheckoutError::Unauthorized(
                "customer role required".into(),
            ));
        }
        Ok(())
    }

    async fn add_item(&self, principal: &Principal, body: &Bytes) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let request: AddItemRequest = parse_json(body)?;
        let seller_id = SellerId::new(request.seller_id);
        let cart = self
            .carts
            .add_item(
                &principal.buyer_id,
                &seller_id,
                NewItem {
                    product_id: ProductId::new(request.product_id),
                    quantity: request.quantity,
                    name: request.name,
                    unit_price: request.price,
                },
            )
            .await?;
        Ok(json(StatusCode::OK, &cart))
    }

    async fn get_cart(&self, principal: &Principal, query: &str) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let seller_id = seller_id_query(query)?;
        let cart = self.carts.get_cart(&principal.buyer_id, &seller_id).await?;
        Ok(json(StatusCode::OK, &cart))
    }

    async fn update_quantity(
        &self,
        principal: &Principal,
        line_id: &str,
        query: &str,
        body: &Bytes,
    ) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let seller_id = seller_id_query(query)?;
        let request: UpdateQuantityRequest = parse_json(body)?;
        let cart = self
            .carts
            .update_quantity(
                &principal.buyer_id,
                &seller_id,
                &LineId::from(line_id),
                request.quantity,
            )
            .await?;
        Ok(json(StatusCode::OK, &cart))
    }

    async fn remove_line(
        &self,
        principal: &Principal,
        line_id: &str,
        query: &str,
    ) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let seller_id = seller_id_query(query)?;
        let cart = self
            .carts
            .remove_line(&principal.buyer_id, &seller_id, &LineId::from(line_id))
            .await?;
        Ok(json(StatusCode::OK, &cart))
    }

    async fn clear_cart(&self, principal: &Principal, query: &str) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let seller_id = seller_id_query(query)?;
        let cart = self.carts.clear(&principal.buyer_id, &seller_id).await?;
        Ok(json(StatusCode::OK, &cart))
    }

    async fn create_quote(&self, principal: &Principal, body: &Bytes) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let request: CreateQuoteRequest = parse_json(body)?;
        let seller_id = SellerId::new(request.seller_id);
        let quote = self
            .quotes
            .create_quote(&principal.buyer_id, &seller_id)
            .await?;
        Ok(json(StatusCode::OK, &quote))
    }

    async fn get_quote(&self, principal: &Principal, quote_id: &str) -> Result<HttpResponse> {
        let quote = self
            .quotes
            .get_quote(principal, &QuoteId::from(quote_id))
            .await?;
        Ok(json(StatusCode::OK, &quote))
    }

    async fn place_order(&self, principal: &Principal, body: &Bytes) -> Result<HttpResponse> {
        Self::require_customer(principal)?;
        let request: PlaceOrderRequest = parse_json(body)?;
        let order = self
            .checkout
            .place_order(
                principal,
                &QuoteId::from(request.quote_id.as_str()),
                &request.payment_method,
                &request.payment_token,
            )
            .await?;
        Ok(json(StatusCode::OK, &order))
    }

    async fn list_orders(&self, principal: &Principal, query: &str) -> Result<HttpResponse> {
        let seller_filter = optional_seller_id_query(query)?;
        let orders = self.checkout.list_orders(principal, seller_filter).await?;
        Ok(json(StatusCode::OK, &orders))
    }

    async fn get_order(&self, principal: &Principal, order_id: &str) -> Result<HttpResponse> {
        let order = self
            .checkout
            .get_order(principal, &OrderId::from(order_id))
            .await?;
        Ok(json(StatusCode::OK, &order))
    }
}
