//! Cartwright - cart-to-order checkout orchestration.
//!
//! This crate implements the checkout core of a multi-tenant e-commerce
//! platform: per-(buyer, seller) carts, frozen time-bounded quotes, and
//! exactly-once conversion of an accepted quote into an immutable order via
//! a payment capture.
//!
//! # Architecture
//!
//! The crate is organized around trait ports with the domain kept pure:
//!
//! - **`domain`** - Carts, quotes, orders, ids, and pure pricing
//! - **`port::outbound`** - Store and collaborator contracts (identity,
//!   catalog, tax, shipping, payment)
//! - **`store`** - Reference in-memory persistence
//! - **`application`** - Cart, quote, and checkout services, including the
//!   per-cart writer lock and the per-quote capture lock
//! - **`adapter`** - The HTTP boundary, bearer-token verification, and REST
//!   collaborator clients
//!
//! # Invariants
//!
//! - A quote's totals are computed once and never recomputed; orders copy
//!   them verbatim.
//! - Mutations to one cart key are serialized; different carts are
//!   independent.
//! - Exactly one order may ever exist per quote, and a payment is never
//!   captured twice for the same quote.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - The checkout error taxonomy and wire kinds
//! - [`app`] - Assembly of config, stores, adapters, and services
//! - [`cli`] - Command-line interface

pub mod adapter;
pub mod app;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
