//! Identity collaborator port: bearer credential verification.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{BuyerId, SellerId};
use crate::error::Result;

/// Role carried by a verified credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A customer account placing items in a cart.
    Customer,
    /// A seller account; sees orders placed against its catalog.
    Seller,
    /// Operator role with unrestricted reads.
    Admin,
}

/// The verified identity behind a request.
///
/// Authorization never relies on client-held state; this is re-derived from
/// a freshly validated credential on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub buyer_id: BuyerId,
    pub role: Role,
    /// Seller scope, present for [`Role::Seller`] principals.
    pub seller_id: Option<SellerId>,
}

impl Principal {
    /// A customer principal with no seller scope.
    #[must_use]
    pub fn customer(buyer_id: impl Into<BuyerId>) -> Self {
        Self {
            buyer_id: buyer_id.into(),
            role: Role::Customer,
            seller_id: None,
        }
    }

    /// A seller principal scoped to its own seller id.
    #[must_use]
    pub fn seller(buyer_id: impl Into<BuyerId>, seller_id: impl Into<SellerId>) -> Self {
        Self {
            buyer_id: buyer_id.into(),
            role: Role::Seller,
            seller_id: Some(seller_id.into()),
        }
    }

    /// An admin principal.
    #[must_use]
    pub fn admin(buyer_id: impl Into<BuyerId>) -> Self {
        Self {
            buyer_id: buyer_id.into(),
            role: Role::Admin,
            seller_id: None,
        }
    }
}

/// Validates a bearer credential and yields the principal behind it.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token.
    ///
    /// Fails with [`CheckoutError::Unauthenticated`] for missing, malformed,
    /// expired, or tampered credentials.
    ///
    /// [`CheckoutError::Unauthenticated`]: crate::error::CheckoutError::Unauthenticated
    async fn verify(&self, token: &str) -> Result<Principal>;
}
