//! Integration tests for Souq.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p souq-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Mutation sequences, reloads from a file-backed store
//! - `checkout_flow` - Checkout summary, simulated delay and cart reset
//!
//! Shared fixtures live here so both suites build carts the same way.

use std::path::Path;

use souq_cart::{CartManager, CartPanel, FileStore, NewCartItem, RenderSettings};
use souq_core::{Price, ProductId};

/// Slot name used by every test.
pub const CART_KEY: &str = "cart";

/// Catalog entry for an "add to cart" trigger.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: &str, name: &str, price: u32) -> NewCartItem {
    NewCartItem::new(
        ProductId::parse(id).unwrap(),
        name,
        Price::from_units(price),
        format!("/img/{id}.jpg"),
    )
}

/// Parse a product id.
///
/// # Panics
///
/// Panics if `id` is blank.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn id(id: &str) -> ProductId {
    ProductId::parse(id).unwrap()
}

/// Open the cart stored under `dir` with the standard projections attached.
///
/// # Panics
///
/// Panics if the store directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn open_cart(dir: &Path) -> (CartManager<FileStore>, CartPanel) {
    let store = FileStore::open(dir).unwrap();
    let mut cart = CartManager::load(store, CART_KEY);
    let panel = CartPanel::new();
    let (items, count, total) = panel.projections(&RenderSettings::default());
    cart.register(items);
    cart.register(count);
    cart.register(total);
    (cart, panel)
}
