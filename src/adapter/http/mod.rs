//! The REST-shaped boundary surface.
//!
//! Route dispatch ([`routes`]) is decoupled from the socket loop
//! ([`server`]) so the full surface, including authentication and the
//! error-to-status mapping, is testable without a listener.

pub mod request;
pub mod response;
pub mod routes;
pub mod server;

pub use routes::Router;
pub use server::serve;
