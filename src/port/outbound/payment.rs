//! Payment collaborator port: the capture contract.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;

/// A request to charge a payment method for a fixed amount.
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    pub amount: Decimal,
    /// Gateway selector ("stripe", "amazon_pay", ...); opaque to the core.
    pub method: String,
    /// Single-use payment token supplied by the client.
    pub token: String,
}

/// A completed capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentCapture {
    /// Transaction id issued by the payment collaborator.
    pub transaction_id: String,
}

/// Charges a payment method through the payment collaborator.
///
/// Implementations map collaborator failures to exactly two error kinds:
/// [`PaymentDeclined`] when the collaborator definitively refused the charge
/// (no retry will succeed with the same token), and [`PaymentUnavailable`]
/// when the collaborator was unreachable or timed out (no capture occurred,
/// safe to retry). Implementations must not retry internally; retry policy
/// belongs to the caller.
///
/// [`PaymentDeclined`]: crate::error::CheckoutError::PaymentDeclined
/// [`PaymentUnavailable`]: crate::error::CheckoutError::PaymentUnavailable
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture the given amount. At most one capture attempt per call.
    async fn capture(&self, request: &CaptureRequest) -> Result<PaymentCapture>;
}
