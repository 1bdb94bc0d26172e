use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::id::{OrderId, QuoteId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Checkout pipeline errors.
///
/// Every variant maps to a stable machine-readable [`ErrorKind`] carried in
/// boundary responses, so callers branch on kind rather than on HTTP status
/// (three distinct business conditions share 409).
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("forbidden: {0}")]
    Unauthorized(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("quote {quote_id} expired at {expired_at}")]
    QuoteExpired {
        quote_id: QuoteId,
        expired_at: DateTime<Utc>,
    },

    #[error("quote {quote_id} already consumed by order {order_id}")]
    QuoteConsumed {
        quote_id: QuoteId,
        order_id: OrderId,
    },

    #[error("payment declined: {reason}")]
    PaymentDeclined { reason: String },

    #[error("payment provider unavailable: {reason}")]
    PaymentUnavailable { reason: String },

    #[error("an order already exists for quote {quote_id}")]
    DuplicateOrder { quote_id: QuoteId },

    /// Payment was captured but no order record exists. The one true
    /// partial-failure window; always logged with quote id + transaction id
    /// for manual reconciliation.
    #[error(
        "payment captured but order not recorded: quote {quote_id}, \
         transaction {transaction_id}: {reason}"
    )]
    PostPaymentInconsistency {
        quote_id: QuoteId,
        transaction_id: String,
        reason: String,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("collaborator error: {0}")]
    Collaborator(String),
}

/// Machine-readable error discriminator carried in every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    Unauthorized,
    NotFound,
    QuoteExpired,
    QuoteConsumed,
    PaymentDeclined,
    PaymentUnavailable,
    DuplicateOrder,
    PostPaymentInconsistency,
    Store,
    Collaborator,
}

impl ErrorKind {
    /// Stable wire name for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Unauthenticated => "unauthenticated",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::QuoteExpired => "quote_expired",
            Self::QuoteConsumed => "quote_consumed",
            Self::PaymentDeclined => "payment_declined",
            Self::PaymentUnavailable => "payment_unavailable",
            Self::DuplicateOrder => "duplicate_order",
            Self::PostPaymentInconsistency => "post_payment_inconsistency",
            Self::Store => "store_error",
            Self::Collaborator => "collaborator_error",
        }
    }
}

impl CheckoutError {
    /// The machine-readable kind for this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unauthenticated(_) => ErrorKind::Unauthenticated,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::QuoteExpired { .. } => ErrorKind::QuoteExpired,
            Self::QuoteConsumed { .. } => ErrorKind::QuoteConsumed,
            Self::PaymentDeclined { .. } => ErrorKind::PaymentDeclined,
            Self::PaymentUnavailable { .. } => ErrorKind::PaymentUnavailable,
            Self::DuplicateOrder { .. } => ErrorKind::DuplicateOrder,
            Self::PostPaymentInconsistency { .. } => ErrorKind::PostPaymentInconsistency,
            Self::Store(_) => ErrorKind::Store,
            Self::Collaborator(_) => ErrorKind::Collaborator,
        }
    }

    /// Shorthand for a validation failure on a named field.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckoutError>;
