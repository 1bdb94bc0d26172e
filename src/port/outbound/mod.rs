//! Outbound ports: everything the core calls out to.
//!
//! Stores are the persistence seam; the remaining ports are the external
//! collaborator contracts (identity, catalog, tax, shipping, payment),
//! transport-agnostic by design.

pub mod catalog;
pub mod identity;
pub mod payment;
pub mod rates;
pub mod store;

pub use catalog::{CatalogClient, CatalogProduct};
pub use identity::{Principal, Role, TokenVerifier};
pub use payment::{CaptureRequest, PaymentCapture, PaymentGateway};
pub use rates::{RateRequest, ShippingClient, TaxClient};
pub use store::{CartStore, OrderFilter, OrderStore, QuoteStore};
