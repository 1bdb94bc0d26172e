//! REST clients for the external collaborators.
//!
//! Every call carries a bounded timeout; a timed-out capture is reported as
//! provider-unavailable, never assumed successful.

pub mod catalog;
pub mod payment;
pub mod rates;

pub use catalog::RestCatalogClient;
pub use payment::RestPaymentGateway;
pub use rates::{RestShippingClient, RestTaxClient};
