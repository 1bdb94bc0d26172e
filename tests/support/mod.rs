#![allow(dead_code)]

//! Shared assembly helpers for integration tests: services wired to the
//! in-memory store and testkit fakes.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cartwright::application::{CartService, CheckoutService, NewItem, QuoteService};
use cartwright::config::QuoteConfig;
use cartwright::domain::{BuyerId, ProductId, SellerId};
use cartwright::port::outbound::payment::PaymentGateway;
use cartwright::port::outbound::store::OrderStore;
use cartwright::store::MemoryStore;
use cartwright::testkit::catalog::StaticCatalog;
use cartwright::testkit::payment::ScriptedGateway;
use cartwright::testkit::rates::{FixedShippingClient, FixedTaxClient};

/// A fully wired checkout stack over the in-memory store.
pub struct Stack {
    pub store: Arc<MemoryStore>,
    pub carts: Arc<CartService>,
    pub quotes: Arc<QuoteService>,
    pub checkout: Arc<CheckoutService>,
}

pub struct StackBuilder {
    shipping: Decimal,
    tax: Decimal,
    ttl_minutes: i64,
    reprice_on_create: bool,
    catalog: StaticCatalog,
    gateway: Option<Arc<dyn PaymentGateway>>,
    orders: Option<Arc<dyn OrderStore>>,
    timeout: Duration,
}

impl StackBuilder {
    pub fn new() -> Self {
        Self {
            shipping: dec!(2.00),
            tax: dec!(1.50),
            ttl_minutes: 30,
            reprice_on_create: false,
            catalog: StaticCatalog::new(),
            gateway: None,
            orders: None,
            timeout: Duration::from_millis(500),
        }
    }

    pub fn shipping(mut self, amount: Decimal) -> Self {
        self.shipping = amount;
        self
    }

    pub fn tax(mut self, amount: Decimal) -> Self {
        self.tax = amount;
        self
    }

    pub fn ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl_minutes = minutes;
        self
    }

    pub fn reprice_from(mut self, catalog: StaticCatalog) -> Self {
        self.reprice_on_create = true;
        self.catalog = catalog;
        self
    }

    pub fn gateway(mut self, gateway: Arc<dyn PaymentGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    pub fn order_store(mut self, orders: Arc<dyn OrderStore>) -> Self {
        self.orders = Some(orders);
        self
    }

    pub fn capture_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Stack {
        let store = Arc::new(MemoryStore::new());
        let carts = Arc::new(CartService::new(store.clone()));
        let orders: Arc<dyn OrderStore> = self.orders.unwrap_or_else(|| store.clone());
        let quotes = Arc::new(QuoteService::new(
            Arc::clone(&carts),
            store.clone(),
            Arc::clone(&orders),
            Arc::new(FixedTaxClient(self.tax)),
            Arc::new(FixedShippingClient(self.shipping)),
            Arc::new(self.catalog),
            QuoteConfig {
                ttl_minutes: self.ttl_minutes,
                reprice_on_create: self.reprice_on_create,
            },
            self.timeout,
        ));
        let gateway = self
            .gateway
            .unwrap_or_else(|| Arc::new(ScriptedGateway::approving("tx1")));
        let checkout = Arc::new(CheckoutService::new(
            Arc::clone(&quotes),
            orders,
            gateway,
            self.timeout,
        ));

        Stack {
            store,
            carts,
            quotes,
            checkout,
        }
    }
}

/// Default stack: shipping 2.00, tax 1.50, approving gateway "tx1".
pub fn stack() -> Stack {
    StackBuilder::new().build()
}

pub fn buyer(id: &str) -> BuyerId {
    BuyerId::new(id)
}

pub fn seller(id: &str) -> SellerId {
    SellerId::new(id)
}

pub fn item(product: &str, quantity: u32, unit_price: Decimal) -> NewItem {
    NewItem {
        product_id: ProductId::new(product),
        quantity,
        name: product.to_string(),
        unit_price,
    }
}

/// Add each `(product, quantity, price)` to the buyer's cart for the seller.
pub async fn seed_cart(
    stack: &Stack,
    buyer_id: &BuyerId,
    seller_id: &SellerId,
    items: &[(&str, u32, Decimal)],
) {
    for (product, quantity, price) in items {
        stack
            .carts
            .add_item(buyer_id, seller_id, item(product, *quantity, *price))
            .await
            .expect("seed add_item failed");
    }
}
