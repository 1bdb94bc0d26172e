//! The checkout orchestrator: quote -> capture -> order, exactly once.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tracing::{error, info, warn};

use super::locks::KeyedLock;
use super::quote::QuoteService;
use crate::domain::{Order, OrderId, Quote, QuoteId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::identity::{Principal, Role};
use crate::port::outbound::payment::{CaptureRequest, PaymentGateway};
use crate::port::outbound::store::{OrderFilter, OrderStore};

/// Drives the quote-to-order state machine and owns the order read paths.
pub struct CheckoutService {
    quotes: Arc<QuoteService>,
    orders: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
    /// Per-quote lock held from before capture until the order is recorded,
    /// so two concurrent submits cannot both reach the gateway.
    capture_locks: KeyedLock,
    capture_timeout: StdDuration,
}

impl CheckoutService {
    pub fn new(
        quotes: Arc<QuoteService>,
        orders: Arc<dyn OrderStore>,
        gateway: Arc<dyn PaymentGateway>,
        capture_timeout: StdDuration,
    ) -> Self {
        Self {
            quotes,
            orders,
            gateway,
            capture_locks: KeyedLock::new(),
            capture_timeout,
        }
    }

    /// Convert an accepted quote into an order via a payment capture.
    ///
    /// Exactly one order may ever exist per quote, and a capture is never
    /// double-submitted: the whole sequence runs under a per-quote lock, the
    /// order store enforces quote-id uniqueness as the second line of
    /// defense, and a duplicate submit returns the already-created order
    /// instead of charging again.
    ///
    /// Failure semantics: gate failures have no side effects; a declined or
    /// unavailable capture leaves the quote usable for retry until expiry;
    /// a store failure after a successful capture surfaces as
    /// [`CheckoutError::PostPaymentInconsistency`] for manual
    /// reconciliation.
    pub async fn place_order(
        &self,
        principal: &Principal,
        quote_id: &QuoteId,
        payment_method: &str,
        payment_token: &str,
    ) -> Result<Order> {
        if payment_method.is_empty() {
            return Err(CheckoutError::validation(
                "paymentMethod",
                "must not be empty",
            ));
        }
        if payment_token.is_empty() {
            return Err(CheckoutError::validation(
                "paymentToken",
                "must not be empty",
            ));
        }

        let _guard = self
            .capture_locks
            .acquire(&format!("capture:{quote_id}"))
            .await;

        let quote = match self.quotes.assert_usable(quote_id).await {
            Ok(quote) => quote,
            // Submitting an already-converted quote again returns the order
            // that consumed it; payment happened exactly once, and a retry
            // must not become a second charge.
            Err(CheckoutError::QuoteConsumed { order_id, .. }) => {
                let existing = self.existing_order(&order_id).await?;
                if existing.buyer_id != principal.buyer_id {
                    return Err(CheckoutError::Unauthorized(
                        "quote belongs to another buyer".into(),
                    ));
                }
                return Ok(existing);
            }
            Err(other) => return Err(other),
        };
        if quote.buyer_id != principal.buyer_id {
            return Err(CheckoutError::Unauthorized(
                "quote belongs to another buyer".into(),
            ));
        }

        let capture = self.capture(&quote, payment_method, payment_token).await?;

        let order = Order::from_quote(
            &quote,
            payment_method,
            capture.transaction_id.clone(),
            chrono::Utc::now(),
        );
        match self.orders.insert(&order).await {
            Ok(()) => {
                info!(
                    order_id = %order.id,
                    quote_id = %quote_id,
                    transaction_id = %order.transaction_id,
                    grand_total = %order.grand_total,
                    "Order placed"
                );
                Ok(order)
            }
            // Another request (possibly on another instance, where the
            // capture lock cannot reach) already consumed this quote. The
            // work is done; surface its order rather than a
            // charge-without-order state.
            Err(CheckoutError::DuplicateOrder { .. }) => {
                warn!(quote_id = %quote_id, "Duplicate order creation absorbed");
                match self.orders.find_by_quote(quote_id).await {
                    Ok(Some(existing)) => Ok(existing),
                    _ => Err(self.inconsistency(quote_id, &capture.transaction_id, "duplicate insert but no stored order")),
                }
            }
            Err(other) => Err(self.inconsistency(quote_id, &capture.transaction_id, &other.to_string())),
        }
    }

    /// Fetch one order, scoped to the caller's role.
    pub async fn get_order(&self, principal: &Principal, order_id: &OrderId) -> Result<Order> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })?;

        let visible = match principal.role {
            Role::Admin => true,
            Role::Customer => order.buyer_id == principal.buyer_id,
            Role::Seller => Some(&order.seller_id) == principal.seller_id.as_ref(),
        };
        if !visible {
            return Err(CheckoutError::Unauthorized(
                "order belongs to another account".into(),
            ));
        }
        Ok(order)
    }

    /// List orders visible to the caller, newest first.
    ///
    /// Customers see their own orders, sellers the orders placed against
    /// their seller id, admins everything; `seller_filter` narrows further
    /// where allowed.
    pub async fn list_orders(
        &self,
        principal: &Principal,
        seller_filter: Option<SellerId>,
    ) -> Result<Vec<Order>> {
        let filter = match principal.role {
            Role::Customer => OrderFilter {
                buyer_id: Some(principal.buyer_id.clone()),
                seller_id: seller_filter,
            },
            Role::Seller => OrderFilter {
                buyer_id: None,
                seller_id: principal.seller_id.clone(),
            },
            Role::Admin => OrderFilter {
                buyer_id: None,
                seller_id: seller_filter,
            },
        };
        self.orders.list(&filter).await
    }

    async fn capture(
        &self,
        quote: &Quote,
        payment_method: &str,
        payment_token: &str,
    ) -> Result<crate::port::outbound::payment::PaymentCapture> {
        let request = CaptureRequest {
            amount: quote.grand_total,
            method: payment_method.to_string(),
            token: payment_token.to_string(),
        };
        // A timed-out capture is treated as provider-unavailable; it is
        // never assumed successful.
        match tokio::time::timeout(self.capture_timeout, self.gateway.capture(&request)).await {
            Ok(result) => result,
            Err(_) => Err(CheckoutError::PaymentUnavailable {
                reason: "capture timed out".into(),
            }),
        }
    }

    async fn existing_order(&self, order_id: &OrderId) -> Result<Order> {
        self.orders
            .get(order_id)
            .await?
            .ok_or_else(|| CheckoutError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }

    fn inconsistency(
        &self,
        quote_id: &QuoteId,
        transaction_id: &str,
        reason: &str,
    ) -> CheckoutError {
        // The one condition that must page an operator: money moved but no
        // order record exists.
        error!(
            quote_id = %quote_id,
            transaction_id = %transaction_id,
            reason = %reason,
            "Payment captured but order not recorded"
        );
        CheckoutError::PostPaymentInconsistency {
            quote_id: quote_id.clone(),
            transaction_id: transaction_id.to_string(),
            reason: reason.to_string(),
        }
    }
}
