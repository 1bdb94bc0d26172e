//! Application services coordinating the domain, stores, and collaborators.
//!
//! # Modules
//!
//! - [`cart`]: validated cart mutations, serialized per `(buyer, seller)` key
//! - [`quote`]: quote creation, lookup, and the pre-payment usability gate
//! - [`checkout`]: the place-order state machine and order read paths
//! - [`locks`]: keyed async mutual exclusion backing the above

pub mod cart;
pub mod checkout;
pub mod locks;
pub mod quote;

pub use cart::{CartService, NewItem};
pub use checkout::CheckoutService;
pub use locks::KeyedLock;
pub use quote::QuoteService;
