//! Integration tests for the checkout flow.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use souq_cart::{Checkout, CheckoutError};
use souq_core::{CustomerName, Price};
use souq_integration_tests::{open_cart, product};

#[test]
fn test_checkout_rejected_on_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let (cart, _) = open_cart(dir.path());
    assert_eq!(
        Checkout::default().begin(&cart).unwrap_err(),
        CheckoutError::EmptyCart
    );
}

#[tokio::test(start_paused = true)]
async fn test_confirmed_checkout_clears_cart_after_delay() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, panel) = open_cart(dir.path());
    cart.add_item(product("p1", "A", 10));
    cart.add_item(product("p1", "A", 10));

    let checkout = Checkout::default();
    let summary = checkout.begin(&cart).unwrap();
    assert_eq!(summary.total, Price::from_units(20));
    assert!(panel.checkout_total.contents().contains("20 ر.س"));

    let confirmation = checkout
        .confirm(&mut cart, CustomerName::parse("Layla").unwrap())
        .await;

    assert_eq!(confirmation.total, Price::from_units(20));
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Price::ZERO);
    assert!(panel.checkout_total.contents().contains("0 ر.س"));

    let (reloaded, _) = open_cart(dir.path());
    assert!(reloaded.is_empty());

    // Empty is a resting state; shopping continues
    cart.add_item(product("p2", "B", 5));
    assert_eq!(cart.item_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cart_unchanged_until_delay_elapses() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, _) = open_cart(dir.path());
    cart.add_item(product("p1", "A", 10));

    let checkout = Checkout::new(Duration::from_secs(2));
    let abandoned = tokio::time::timeout(
        Duration::from_millis(1999),
        checkout.confirm(&mut cart, CustomerName::parse("Omar").unwrap()),
    )
    .await;

    assert!(abandoned.is_err());
    assert_eq!(cart.item_count(), 1);
    let (reloaded, _) = open_cart(dir.path());
    assert_eq!(reloaded.item_count(), 1);
}
