mod support;

use cartwright::domain::QuoteId;
use cartwright::error::CheckoutError;
use cartwright::port::outbound::identity::Principal;
use cartwright::testkit::catalog::StaticCatalog;
use rust_decimal_macros::dec;
use support::{buyer, seed_cart, seller, stack, StackBuilder};

#[tokio::test]
async fn quote_totals_match_cart_and_rates() {
    let stack = stack();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 2, dec!(5.00)), ("productB", 1, dec!(10.00))],
    )
    .await;

    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    assert_eq!(quote.subtotal, dec!(20.00));
    assert_eq!(quote.shipping_cost, dec!(2.00));
    assert_eq!(quote.tax_amount, dec!(1.50));
    assert_eq!(quote.grand_total, dec!(23.50));
}

#[tokio::test]
async fn single_item_cart_prices_exactly() {
    let stack = StackBuilder::new()
        .shipping(dec!(0.00))
        .tax(dec!(0.00))
        .build();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 3, dec!(9.99))],
    )
    .await;

    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    assert_eq!(quote.subtotal, dec!(29.97));
    assert_eq!(quote.grand_total, dec!(29.97));
}

#[tokio::test]
async fn grand_total_is_always_the_sum_of_parts() {
    let stack = StackBuilder::new()
        .shipping(dec!(3.33))
        .tax(dec!(7.77))
        .build();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 7, dec!(1.37)), ("productB", 11, dec!(0.03))],
    )
    .await;

    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    assert_eq!(
        quote.grand_total,
        quote.subtotal + quote.shipping_cost + quote.tax_amount
    );
}

#[tokio::test]
async fn empty_cart_cannot_be_quoted() {
    let stack = stack();

    let err = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Validation { .. }));
}

#[tokio::test]
async fn quote_is_a_snapshot_not_a_reference() {
    let stack = stack();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 2, dec!(5.00))],
    )
    .await;

    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    // Mutating the cart afterwards must not change any field of the quote.
    stack.carts.clear(&buyer("b1"), &seller("s1")).await.unwrap();

    let reloaded = stack
        .quotes
        .get_quote(&Principal::customer("b1"), &quote.id)
        .await
        .unwrap();

    assert_eq!(reloaded, quote);
    assert_eq!(reloaded.lines.len(), 1);
    assert_eq!(reloaded.subtotal, dec!(10.00));
}

#[tokio::test]
async fn quoting_leaves_the_cart_editable() {
    let stack = stack();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 2, dec!(5.00))],
    )
    .await;

    stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    let cart = stack
        .carts
        .get_cart(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.total_price, dec!(10.00));
}

#[tokio::test]
async fn requote_creates_a_new_quote_id() {
    let stack = stack();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 2, dec!(5.00))],
    )
    .await;

    let first = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();
    let second = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
}

#[tokio::test]
async fn get_quote_is_ownership_checked() {
    let stack = stack();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 1, dec!(5.00))],
    )
    .await;
    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    let err = stack
        .quotes
        .get_quote(&Principal::customer("intruder"), &quote.id)
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::Unauthorized(_)));

    // Admins may inspect any quote.
    let loaded = stack
        .quotes
        .get_quote(&Principal::admin("ops"), &quote.id)
        .await
        .unwrap();
    assert_eq!(loaded.id, quote.id);
}

#[tokio::test]
async fn missing_quote_is_not_found() {
    let stack = stack();
    let err = stack
        .quotes
        .get_quote(&Principal::customer("b1"), &QuoteId::from("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckoutError::NotFound { .. }));
}

#[tokio::test]
async fn expired_quote_still_readable_but_not_usable() {
    let stack = StackBuilder::new().ttl_minutes(-5).build();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 1, dec!(5.00))],
    )
    .await;
    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    // getQuote does not fail merely because the quote expired.
    let loaded = stack
        .quotes
        .get_quote(&Principal::customer("b1"), &quote.id)
        .await
        .unwrap();
    assert_eq!(loaded.id, quote.id);

    let err = stack.quotes.assert_usable(&quote.id).await.unwrap_err();
    assert!(matches!(err, CheckoutError::QuoteExpired { .. }));
}

#[tokio::test]
async fn reprice_on_create_takes_catalog_prices() {
    let catalog = StaticCatalog::new().with_product("productA", "Apple", dec!(6.00));
    let stack = StackBuilder::new()
        .shipping(dec!(0.00))
        .tax(dec!(0.00))
        .reprice_from(catalog)
        .build();
    seed_cart(
        &stack,
        &buyer("b1"),
        &seller("s1"),
        &[("productA", 2, dec!(5.00))],
    )
    .await;

    let quote = stack
        .quotes
        .create_quote(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();

    // The quote freezes the catalog price; the cart keeps its own.
    assert_eq!(quote.subtotal, dec!(12.00));
    let cart = stack
        .carts
        .get_cart(&buyer("b1"), &seller("s1"))
        .await
        .unwrap();
    assert_eq!(cart.total_price, dec!(10.00));
}
