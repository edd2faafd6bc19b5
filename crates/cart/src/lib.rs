//! Souq Cart - client-side shopping cart state.
//!
//! A [`CartManager`] owns an ordered collection of cart entries, keeps it in
//! a durable [`CartStore`] slot, and pushes derived views (item list, unit
//! count, total) to registered [`CartProjection`]s after every mutation.
//!
//! # Architecture
//!
//! - [`cart`] - The pure collection: dedup by product id, quantity rules, totals
//! - [`manager`] - Persist-and-rerender around every mutation, UI events
//! - [`store`] - In-memory and file-backed durable stores
//! - [`render`] - Askama-rendered projections into shared slots
//! - [`checkout`] - Summary and simulated payment confirmation
//! - [`config`] - Environment-driven settings
//!
//! Everything runs on one thread. Handles that several components share
//! (`MemoryStore`, `RenderSlot`) are `Rc`-based.
//!
//! # Example
//!
//! ```
//! use souq_cart::{CartManager, MemoryStore, NewCartItem};
//! use souq_core::{Price, ProductId};
//!
//! let mut cart = CartManager::load(MemoryStore::new(), "cart");
//! let dates = NewCartItem::new(ProductId::parse("p1").unwrap(), "Dates", Price::from_units(10), "");
//! cart.add_item(dates.clone());
//! cart.add_item(dates);
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), Price::from_units(20));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod manager;
pub mod render;
pub mod store;

pub use cart::{Cart, CartDecodeError, CartItem, NewCartItem, QuantityChange};
pub use checkout::{Checkout, CheckoutError, CheckoutSummary, OrderConfirmation, SummaryLine};
pub use config::{CartConfig, ConfigError};
pub use manager::{CartEvent, CartManager, ControlForm, load_cart};
pub use render::{
    CartPanel, CartProjection, CartRowView, CartSnapshot, CountBadgeProjection,
    ItemListProjection, RenderSettings, RenderSlot, TotalProjection,
};
pub use store::{CartStore, FileStore, MemoryStore, StoreError};
