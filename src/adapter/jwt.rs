//! HS256 bearer-token verification against the identity collaborator's
//! signing secret.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::{BuyerId, SellerId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::identity::{Principal, Role, TokenVerifier};

/// Claims carried by an identity token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id.
    pub sub: String,
    pub role: Role,
    /// Seller scope for seller-role accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    /// Expiration time (seconds since epoch).
    pub exp: i64,
    /// Issued at (seconds since epoch).
    pub iat: i64,
}

/// Verifies (and, for local tooling, issues) HS256 tokens with a shared
/// secret.
pub struct HmacTokenVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl HmacTokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
        }
    }

    /// Issue a token for a principal, expiring after `ttl`.
    pub fn issue(&self, principal: &Principal, ttl: Duration) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.buyer_id.to_string(),
            role: principal.role,
            seller_id: principal.seller_id.as_ref().map(ToString::to_string),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|err| CheckoutError::Unauthenticated(err.to_string()))
    }
}

#[async_trait]
impl TokenVerifier for HmacTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| CheckoutError::Unauthenticated(format!("invalid token: {err}")))?;

        let claims = data.claims;
        Ok(Principal {
            buyer_id: BuyerId::new(claims.sub),
            role: claims.role,
            seller_id: claims.seller_id.map(SellerId::new),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issued_token_verifies_back_to_principal() {
        let verifier = HmacTokenVerifier::new(b"test-secret");
        let principal = Principal::customer("buyer-1");

        let token = verifier.issue(&principal, Duration::hours(1)).unwrap();
        let verified = verifier.verify(&token).await.unwrap();

        assert_eq!(verified, principal);
    }

    #[tokio::test]
    async fn seller_scope_survives_the_roundtrip() {
        let verifier = HmacTokenVerifier::new(b"test-secret");
        let principal = Principal::seller("acct-9", "seller-9");

        let token = verifier.issue(&principal, Duration::hours(1)).unwrap();
        let verified = verifier.verify(&token).await.unwrap();

        assert_eq!(verified.role, Role::Seller);
        assert_eq!(verified.seller_id, Some(SellerId::new("seller-9")));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let issuer = HmacTokenVerifier::new(b"secret-a");
        let verifier = HmacTokenVerifier::new(b"secret-b");
        let token = issuer
            .issue(&Principal::customer("buyer-1"), Duration::hours(1))
            .unwrap();

        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let verifier = HmacTokenVerifier::new(b"test-secret");
        assert!(verifier.verify("not-a-jwt").await.is_err());
    }
}
