//! Core domain types for the checkout pipeline.
//!
//! ## Cart Types
//!
//! - [`Cart`] - Mutable per-(buyer, seller) line collection with a cached total
//! - [`CartLine`] - A single product line within a cart
//!
//! ## Quote Types
//!
//! - [`Quote`] - Immutable, time-bounded price snapshot of a cart
//! - [`QuoteStatus`] - Derived lifecycle state (active / expired / consumed)
//! - [`PriceBreakdown`] - Subtotal, shipping, tax, and grand total
//!
//! ## Order Types
//!
//! - [`Order`] - Immutable order record copied verbatim from a quote
//!
//! ## Identifier Types
//!
//! - [`BuyerId`], [`SellerId`], [`ProductId`] - Caller-supplied identifiers
//! - [`LineId`], [`QuoteId`], [`OrderId`] - UUID-backed generated identifiers

pub mod cart;
pub mod id;
pub mod money;
pub mod order;
pub mod pricing;
pub mod quote;

pub use cart::{Cart, CartLine};
pub use id::{BuyerId, LineId, OrderId, ProductId, QuoteId, SellerId};
pub use money::round_money;
pub use order::Order;
pub use pricing::{price_lines, PriceBreakdown};
pub use quote::{Quote, QuoteStatus};
