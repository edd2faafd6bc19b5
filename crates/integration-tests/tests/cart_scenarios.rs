//! Integration tests for cart mutations against a file-backed store.
//!
//! Each test reopens the store directory to stand in for a page reload.

#![allow(clippy::unwrap_used)]

use souq_cart::{CartManager, FileStore, MemoryStore, NewCartItem};
use souq_core::Price;
use souq_integration_tests::{CART_KEY, id, open_cart, product};

// =============================================================================
// Mutation Scenarios
// =============================================================================

#[test]
fn test_add_merge_and_totals() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, panel) = open_cart(dir.path());

    cart.add_item(product("p1", "A", 10));
    cart.add_item(product("p1", "A", 10));
    cart.add_item(product("p2", "B", 5));

    let entries: Vec<(&str, u32)> = cart
        .entries()
        .iter()
        .map(|i| (i.id.as_str(), i.quantity.get()))
        .collect();
    assert_eq!(entries, [("p1", 2), ("p2", 1)]);
    assert_eq!(cart.total(), Price::from_units(25));
    assert_eq!(cart.item_count(), 3);

    assert!(panel.count.contents().contains('3'));
    assert!(panel.total.contents().contains("25 ر.س"));
    assert_eq!(panel.items.contents().matches("cart-item-row").count(), 2);
}

#[test]
fn test_decrement_to_zero_empties_cart() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, panel) = open_cart(dir.path());

    cart.add_item(product("p1", "A", 10));
    cart.add_item(product("p1", "A", 10));
    cart.update_quantity(&id("p1"), -2);

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Price::ZERO);
    assert!(panel.items.contents().contains("empty-cart-msg"));

    let (reloaded, _) = open_cart(dir.path());
    assert!(reloaded.is_empty());
}

#[test]
fn test_unknown_ids_leave_stored_cart_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, _) = open_cart(dir.path());
    cart.add_item(product("p1", "A", 10));
    let stored = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();

    cart.remove_item(&id("missing"));
    cart.update_quantity(&id("missing"), -1);

    let after = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    assert_eq!(stored, after);
    assert_eq!(cart.item_count(), 1);
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_reload_reconstructs_equal_cart() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, _) = open_cart(dir.path());
    cart.add_item(product("p3", "C", 7));
    cart.add_item(product("p1", "A", 10));
    cart.update_quantity(&id("p1"), 4);
    let expected = cart.cart().clone();
    drop(cart);

    let (reloaded, panel) = open_cart(dir.path());
    assert_eq!(reloaded.cart(), &expected);
    // Projections registered on a reloaded cart show the stored state
    assert!(panel.total.contents().contains("57 ر.س"));
}

#[test]
fn test_reads_legacy_stored_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":"p1","name":"A","price":10,"img":"a.jpg","quantity":2}]"#,
    )
    .unwrap();

    let (cart, _) = open_cart(dir.path());
    assert_eq!(cart.item_count(), 2);
    assert_eq!(cart.total(), Price::from_units(20));
}

#[test]
fn test_corrupted_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart.json"), "{{not json").unwrap();

    let (mut cart, panel) = open_cart(dir.path());
    assert!(cart.is_empty());
    assert!(panel.items.contents().contains("empty-cart-msg"));

    // First mutation overwrites the bad slot
    cart.add_item(product("p1", "A", 10));
    let stored = std::fs::read_to_string(dir.path().join("cart.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed[0]["id"], "p1");
    assert_eq!(parsed[0]["quantity"], 1);
}

#[test]
fn test_oversized_stored_price_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("cart.json"),
        r#"[{"id":"p1","name":"A","price":5e28,"img":"","quantity":2}]"#,
    )
    .unwrap();

    let (mut cart, panel) = open_cart(dir.path());
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Price::ZERO);
    assert!(panel.total.contents().contains("0 ر.س"));

    cart.add_item(product("p1", "A", 10));
    let (reloaded, _) = open_cart(dir.path());
    assert_eq!(reloaded.total(), Price::from_units(10));
}

#[test]
fn test_fractional_prices_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let (mut cart, _) = open_cart(dir.path());
    for (key, price) in [("p1", "19.99"), ("p2", "0.0001"), ("p3", "9999999999.9999")] {
        let price: Price = price.parse().unwrap();
        cart.add_item(NewCartItem::new(id(key), "X", price, ""));
    }
    cart.update_quantity(&id("p1"), 2);
    let expected = cart.cart().clone();
    let total = cart.total();
    drop(cart);

    let (reloaded, _) = open_cart(dir.path());
    assert_eq!(reloaded.cart(), &expected);
    assert_eq!(reloaded.total(), total);
    assert_eq!(total.to_string(), "10000000059.97");
}

#[test]
fn test_stores_are_scoped_by_directory() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let (mut cart, _) = open_cart(first.path());
    cart.add_item(product("p1", "A", 10));

    let (other, _) = open_cart(second.path());
    assert!(other.is_empty());
}

#[test]
fn test_memory_store_survives_manager_drop() {
    let store = MemoryStore::new();
    let mut cart = CartManager::load(store.clone(), CART_KEY);
    cart.add_item(product("p1", "A", 10));
    drop(cart);

    let reloaded = CartManager::load(store, CART_KEY);
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn test_into_store_hands_back_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path()).unwrap();
    let mut cart = CartManager::load(store, CART_KEY);
    cart.add_item(product("p9", "Z", 1));

    let store = cart.into_store();
    let again = CartManager::load(store, CART_KEY);
    assert_eq!(again.item_count(), 1);
}
