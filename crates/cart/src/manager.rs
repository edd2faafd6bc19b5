//! The cart manager.
//!
//! One owned [`CartManager`] per browsing context. Every mutating operation
//! runs mutate → persist → rerender to completion before returning, so the
//! stored slot and every registered projection always agree with the
//! in-memory collection.
//!
//! No operation reports an error to its caller. Malformed stored state loads
//! as an empty cart, unknown ids are no-ops, and store write failures are
//! logged.

use serde::Deserialize;
use tracing::instrument;

use souq_core::{Price, ProductId};

use crate::cart::{Cart, CartItem, NewCartItem, QuantityChange};
use crate::render::{CartProjection, CartSnapshot};
use crate::store::CartStore;

/// A UI trigger the manager understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// "Add to cart" button.
    Add(NewCartItem),
    /// Quantity `-`/`+` control on a row.
    ChangeQuantity {
        /// Row's product.
        id: ProductId,
        /// Units to add, negative to take away.
        delta: i64,
    },
    /// Remove control on a row.
    Remove {
        /// Row's product.
        id: ProductId,
    },
}

/// Attributes of a clicked row control, as rendered by
/// [`crate::ItemListProjection`].
#[derive(Debug, Clone, Deserialize)]
pub struct ControlForm {
    /// `data-action`: `change_quantity` or `remove`.
    pub action: String,
    /// `data-id`: the row's product id.
    pub id: String,
    /// `data-delta`, present on quantity controls.
    pub delta: Option<i64>,
}

impl ControlForm {
    /// Translate into a [`CartEvent`].
    ///
    /// Unknown actions, blank ids and missing deltas yield `None`; the click
    /// is dropped.
    #[must_use]
    pub fn into_event(self) -> Option<CartEvent> {
        let id = ProductId::parse(&self.id).ok()?;
        match self.action.as_str() {
            "change_quantity" => Some(CartEvent::ChangeQuantity {
                id,
                delta: self.delta?,
            }),
            "remove" => Some(CartEvent::Remove { id }),
            _ => None,
        }
    }
}

/// Load a cart from `store`, falling back to an empty cart.
///
/// Absent, blank, unparsable and structurally invalid values all yield an
/// empty cart; the fault is logged and never returned.
pub fn load_cart<S: CartStore>(store: &S, key: &str) -> Cart {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match Cart::decode(&raw) {
        Ok(cart) => {
            tracing::debug!(key, entries = cart.len(), "Loaded stored cart");
            cart
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding invalid stored cart");
            Cart::new()
        }
    }
}

/// Owns the cart, its durable slot, and its projections.
pub struct CartManager<S: CartStore> {
    cart: Cart,
    store: S,
    key: String,
    projections: Vec<Box<dyn CartProjection>>,
}

impl<S: CartStore> std::fmt::Debug for CartManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("cart", &self.cart)
            .field("key", &self.key)
            .field("projections", &self.projections.len())
            .finish_non_exhaustive()
    }
}

impl<S: CartStore> CartManager<S> {
    /// Create a manager for the slot `key`, loading whatever it holds.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = load_cart(&store, &key);
        Self {
            cart,
            store,
            key,
            projections: Vec::new(),
        }
    }

    /// Register a projection and render the current state into it.
    pub fn register(&mut self, mut projection: impl CartProjection + 'static) {
        projection.render(&snapshot(&self.cart));
        self.projections.push(Box::new(projection));
    }

    /// Persist and rerender without mutating. Used for the initial pass
    /// after load.
    pub fn refresh(&mut self) {
        self.commit();
    }

    /// Add one unit of a product.
    ///
    /// If the product is already in the cart only its quantity changes; the
    /// incoming name, price and image are ignored. A quantity already at
    /// `u32::MAX` stays there and a warning is logged.
    #[instrument(skip(self, entry), fields(product_id = %entry.id))]
    pub fn add_item(&mut self, entry: NewCartItem) {
        let quantity = self.cart.add(entry);
        tracing::debug!(quantity = quantity.get(), "Added to cart");
        self.commit();
    }

    /// Remove a product. Absent ids leave the collection unchanged.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_item(&mut self, id: &ProductId) {
        if self.cart.remove(id) {
            tracing::debug!("Removed from cart");
        }
        self.commit();
    }

    /// Change a product's quantity by `delta`.
    ///
    /// Absent ids are ignored entirely. A result of zero or below removes
    /// the entry.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        match self.cart.change_quantity(id, delta) {
            QuantityChange::Missing => {
                tracing::debug!("Quantity change for product not in cart");
                return;
            }
            QuantityChange::Updated(quantity) => {
                tracing::debug!(quantity = quantity.get(), "Quantity updated");
            }
            QuantityChange::Removed => tracing::debug!("Quantity reached zero, removed"),
        }
        self.commit();
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.cart.clear();
        self.commit();
    }

    /// Apply a UI event.
    pub fn dispatch(&mut self, event: CartEvent) {
        match event {
            CartEvent::Add(entry) => self.add_item(entry),
            CartEvent::ChangeQuantity { id, delta } => self.update_quantity(&id, delta),
            CartEvent::Remove { id } => self.remove_item(&id),
        }
    }

    /// Σ `unit_price × quantity`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    /// Σ quantity.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.cart.get(id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Drop the manager, keeping its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    fn commit(&mut self) {
        self.persist();
        let snapshot = snapshot(&self.cart);
        for projection in &mut self.projections {
            projection.render(&snapshot);
        }
    }

    fn persist(&mut self) {
        let encoded = match self.cart.encode() {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.key, &encoded) {
            tracing::error!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

fn snapshot(cart: &Cart) -> CartSnapshot<'_> {
    CartSnapshot {
        items: cart.items(),
        item_count: cart.item_count(),
        total: cart.total(),
    }
}
