//! Typed request bodies and query parsing.
//!
//! Bodies are explicit structs with `deny_unknown_fields`; arbitrary
//! key/value payloads are rejected at the boundary.

use bytes::Bytes;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::SellerId;
use crate::error::{CheckoutError, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddItemRequest {
    pub product_id: String,
    pub quantity: u32,
    pub seller_id: String,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateQuoteRequest {
    pub seller_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlaceOrderRequest {
    pub quote_id: String,
    pub payment_method: String,
    pub payment_token: String,
}

/// Parse a JSON body into a typed request struct.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|err| CheckoutError::validation("body", err.to_string()))
}

/// Extract the required `sellerId` query parameter.
pub fn seller_id_query(query: &str) -> Result<SellerId> {
    optional_seller_id_query(query)?
        .ok_or_else(|| CheckoutError::validation("sellerId", "query parameter is required"))
}

/// Extract the `sellerId` query parameter if present.
pub fn optional_seller_id_query(query: &str) -> Result<Option<SellerId>> {
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == "sellerId" {
            if value.is_empty() {
                return Err(CheckoutError::validation("sellerId", "must not be empty"));
            }
            return Ok(Some(SellerId::new(value.into_owned())));
        }
    }
    Ok(None)
}
