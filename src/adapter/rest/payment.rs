//! REST adapter for the payment collaborator's capture contract.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{CheckoutError, Result};
use crate::port::outbound::payment::{CaptureRequest, PaymentCapture, PaymentGateway};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CaptureBody<'a> {
    amount: Decimal,
    method: &'a str,
    token: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptureResponse {
    captured: bool,
    #[serde(default)]
    transaction_id: String,
}

/// Calls the payment collaborator over HTTP.
///
/// Maps a definitive refusal to [`PaymentDeclined`] and transport failures
/// or timeouts to [`PaymentUnavailable`] (no capture occurred, safe to
/// retry). Never retries on its own.
///
/// [`PaymentDeclined`]: CheckoutError::PaymentDeclined
/// [`PaymentUnavailable`]: CheckoutError::PaymentUnavailable
pub struct RestPaymentGateway {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RestPaymentGateway {
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }
}

#[async_trait]
impl PaymentGateway for RestPaymentGateway {
    async fn capture(&self, request: &CaptureRequest) -> Result<PaymentCapture> {
        let url = join(&self.base_url, "payments/capture")?;
        debug!(amount = %request.amount, method = %request.method, "Submitting capture");

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .json(&CaptureBody {
                amount: request.amount,
                method: &request.method,
                token: &request.token,
            })
            .send()
            .await
            .map_err(unavailable)?;

        let status = response.status();
        if status.is_client_error() {
            return Err(CheckoutError::PaymentDeclined {
                reason: format!("provider returned {status}"),
            });
        }
        if !status.is_success() {
            return Err(CheckoutError::PaymentUnavailable {
                reason: format!("provider returned {status}"),
            });
        }

        let parsed: CaptureResponse = response.json().await.map_err(unavailable)?;
        if !parsed.captured {
            return Err(CheckoutError::PaymentDeclined {
                reason: "capture refused by provider".into(),
            });
        }

        info!(transaction_id = %parsed.transaction_id, "Capture succeeded");
        Ok(PaymentCapture {
            transaction_id: parsed.transaction_id,
        })
    }
}

fn unavailable(err: reqwest::Error) -> CheckoutError {
    CheckoutError::PaymentUnavailable {
        reason: err.to_string(),
    }
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|err| CheckoutError::Collaborator(format!("bad payment url: {err}")))
}
