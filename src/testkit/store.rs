//! Store fault injection.

use async_trait::async_trait;

use crate::domain::{Order, OrderId, QuoteId};
use crate::error::{CheckoutError, Result};
use crate::port::outbound::store::{OrderFilter, OrderStore};
use crate::store::MemoryStore;

/// An order store whose inserts always fail, for exercising the
/// post-payment inconsistency path. Reads delegate to an inner memory
/// store.
#[derive(Debug, Default)]
pub struct FailingOrderStore {
    inner: MemoryStore,
}

impl FailingOrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn insert(&self, _order: &Order) -> Result<()> {
        Err(CheckoutError::Store("injected order store failure".into()))
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>> {
        OrderStore::get(&self.inner, id).await
    }

    async fn find_by_quote(&self, quote_id: &QuoteId) -> Result<Option<Order>> {
        self.inner.find_by_quote(quote_id).await
    }

    async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        OrderStore::list(&self.inner, filter).await
    }
}
