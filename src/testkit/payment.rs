//! Payment gateway fakes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::error::{CheckoutError, Result};
use crate::port::outbound::payment::{CaptureRequest, PaymentCapture, PaymentGateway};

/// One scripted capture outcome.
#[derive(Debug, Clone)]
pub enum CaptureScript {
    Approve { transaction_id: String },
    Decline { reason: String },
    Unavailable { reason: String },
}

/// Counts every capture attempt and replays scripted outcomes, falling back
/// to a fixed outcome once the script runs dry.
///
/// The call counter is what exactly-once tests assert against: a quote must
/// never produce two capture attempts for two successful submits.
#[derive(Debug)]
pub struct ScriptedGateway {
    script: Mutex<VecDeque<CaptureScript>>,
    fallback: CaptureScript,
    calls: AtomicUsize,
    amounts: Mutex<Vec<Decimal>>,
}

impl ScriptedGateway {
    /// A gateway that approves every capture with the given transaction id.
    #[must_use]
    pub fn approving(transaction_id: &str) -> Self {
        Self::with_fallback(CaptureScript::Approve {
            transaction_id: transaction_id.to_string(),
        })
    }

    /// A gateway that declines every capture.
    #[must_use]
    pub fn declining(reason: &str) -> Self {
        Self::with_fallback(CaptureScript::Decline {
            reason: reason.to_string(),
        })
    }

    /// A gateway that is unreachable for every capture.
    #[must_use]
    pub fn unavailable(reason: &str) -> Self {
        Self::with_fallback(CaptureScript::Unavailable {
            reason: reason.to_string(),
        })
    }

    fn with_fallback(fallback: CaptureScript) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback,
            calls: AtomicUsize::new(0),
            amounts: Mutex::new(Vec::new()),
        }
    }

    /// Queue an outcome ahead of the fallback.
    pub fn push(&self, outcome: CaptureScript) {
        self.script.lock().push_back(outcome);
    }

    /// Number of capture attempts seen so far.
    #[must_use]
    pub fn captures(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Amounts submitted for capture, in call order.
    #[must_use]
    pub fn amounts(&self) -> Vec<Decimal> {
        self.amounts.lock().clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn capture(&self, request: &CaptureRequest) -> Result<PaymentCapture> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.amounts.lock().push(request.amount);

        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match outcome {
            CaptureScript::Approve { transaction_id } => Ok(PaymentCapture { transaction_id }),
            CaptureScript::Decline { reason } => Err(CheckoutError::PaymentDeclined { reason }),
            CaptureScript::Unavailable { reason } => {
                Err(CheckoutError::PaymentUnavailable { reason })
            }
        }
    }
}

/// Never answers; used to exercise the capture timeout path.
#[derive(Debug, Default)]
pub struct HangingGateway {
    calls: AtomicUsize,
}

impl HangingGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of capture attempts seen so far.
    #[must_use]
    pub fn captures(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for HangingGateway {
    async fn capture(&self, _request: &CaptureRequest) -> Result<PaymentCapture> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::future::pending::<()>().await;
        unreachable!("pending future resolved")
    }
}
