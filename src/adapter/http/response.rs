//! JSON response construction and the error-to-status mapping.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};
use serde::Serialize;

use crate::error::{CheckoutError, ErrorKind};

pub type HttpResponse = Response<Full<Bytes>>;

/// Build a JSON response with the given status.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => build(status, Bytes::from(body)),
        Err(_) => build(
            StatusCode::INTERNAL_SERVER_ERROR,
            Bytes::from_static(br#"{"kind":"store_error","message":"response encoding failed"}"#),
        ),
    }
}

/// Build the error response for a checkout error.
///
/// The body always carries the machine-readable `kind` alongside the human
/// message; clients must branch on kind, since 409 alone covers three
/// distinct business conditions.
pub fn error(err: &CheckoutError) -> HttpResponse {
    #[derive(Serialize)]
    struct ErrorBody<'a> {
        kind: &'a str,
        message: String,
    }

    json(
        status_for(err.kind()),
        &ErrorBody {
            kind: err.kind().as_str(),
            message: err.to_string(),
        },
    )
}

/// HTTP status for each error kind.
#[must_use]
pub const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::QuoteExpired | ErrorKind::QuoteConsumed | ErrorKind::DuplicateOrder => {
            StatusCode::CONFLICT
        }
        ErrorKind::PaymentDeclined => StatusCode::PAYMENT_REQUIRED,
        ErrorKind::PaymentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorKind::PostPaymentInconsistency | ErrorKind::Store => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ErrorKind::Collaborator => StatusCode::BAD_GATEWAY,
    }
}

fn build(status: StatusCode, body: Bytes) -> HttpResponse {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(body))
        .unwrap_or_else(|_| {
            let mut fallback = Response::new(Full::new(Bytes::from_static(b"{}")));
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
