//! Cart contents and their stored representation.
//!
//! [`Cart`] is the pure collection: it enforces one entry per product and
//! positive quantities, and computes the derived totals. It knows nothing
//! about storage or rendering; [`crate::CartManager`] layers those on top.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use souq_core::{Price, ProductId, Quantity};

/// One product line in the cart.
///
/// Field names on the wire match the stored format written by earlier
/// versions of the site (`price`, `img`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable product identifier; the entry's identity.
    pub id: ProductId,
    /// Display name captured at add time.
    pub name: String,
    /// Unit price snapshotted from the catalog at add time.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Product image URL or path.
    #[serde(rename = "img", default, deserialize_with = "nullable_string")]
    pub image_ref: String,
    /// Units of this product in the cart.
    pub quantity: Quantity,
}

impl CartItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Payload of an "add to cart" trigger.
///
/// Carries no quantity: a freshly added product always starts at one unit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCartItem {
    /// Product to add.
    pub id: ProductId,
    /// Display name, kept only if the product is not in the cart yet.
    pub name: String,
    /// Current catalog price, kept only if the product is not in the cart yet.
    #[serde(rename = "price")]
    pub unit_price: Price,
    /// Product image URL or path.
    #[serde(rename = "img", default, deserialize_with = "nullable_string")]
    pub image_ref: String,
}

impl NewCartItem {
    /// Build an add-to-cart payload.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Price,
        image_ref: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        }
    }

    fn into_item(self) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            unit_price: self.unit_price,
            image_ref: self.image_ref,
            quantity: Quantity::ONE,
        }
    }
}

/// Reasons a stored cart is rejected.
#[derive(Debug, Error)]
pub enum CartDecodeError {
    /// The stored value is empty.
    #[error("stored cart is empty")]
    Blank,
    /// The stored value is not a JSON array of cart items.
    #[error("malformed stored cart: {0}")]
    Malformed(#[from] serde_json::Error),
    /// Two stored entries share an id.
    #[error("duplicate cart entry for product {0}")]
    DuplicateId(ProductId),
}

/// Result of applying a quantity change to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No entry with that id.
    Missing,
    /// The entry now holds this many units.
    Updated(Quantity),
    /// The entry dropped to zero or below and was removed.
    Removed,
}

/// Ordered collection of cart entries, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Decode a stored cart.
    ///
    /// `null` decodes to an empty cart. Entries with an empty id, a
    /// non-positive quantity or a price outside [`Price`]'s range fail the
    /// whole decode, as do duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CartDecodeError`] for blank, non-JSON, or structurally
    /// invalid input.
    pub fn decode(raw: &str) -> Result<Self, CartDecodeError> {
        if raw.trim().is_empty() {
            return Err(CartDecodeError::Blank);
        }

        let items: Option<Vec<CartItem>> = serde_json::from_str(raw)?;
        let items = items.unwrap_or_default();

        for (i, item) in items.iter().enumerate() {
            if items.iter().skip(i + 1).any(|other| other.id == item.id) {
                return Err(CartDecodeError::DuplicateId(item.id.clone()));
            }
        }

        Ok(Self { items })
    }

    /// Encode for the durable store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an entry by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Add one unit of a product.
    ///
    /// An existing entry keeps its name, price and image; only its quantity
    /// changes. Returns the entry's new quantity, which stays at `u32::MAX`
    /// once reached.
    pub fn add(&mut self, entry: NewCartItem) -> Quantity {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == entry.id) {
            if existing.quantity.get() == u32::MAX {
                tracing::warn!(id = %existing.id, "Quantity already at maximum, add ignored");
            }
            existing.quantity = existing.quantity.increment();
            return existing.quantity;
        }
        self.items.push(entry.into_item());
        Quantity::ONE
    }

    /// Remove an entry. Returns whether one was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        self.items.len() != before
    }

    /// Change an entry's quantity by `delta`, removing it at zero or below.
    pub fn change_quantity(&mut self, id: &ProductId, delta: i64) -> QuantityChange {
        let Some(position) = self.items.iter().position(|item| &item.id == id) else {
            return QuantityChange::Missing;
        };
        let Some(item) = self.items.get_mut(position) else {
            return QuantityChange::Missing;
        };

        let requested = i64::from(item.quantity.get()).saturating_add(delta);
        if requested > i64::from(u32::MAX) {
            tracing::warn!(id = %item.id, requested, "Quantity capped at maximum");
        }

        match item.quantity.apply(delta) {
            Some(quantity) => {
                item.quantity = quantity;
                QuantityChange::Updated(quantity)
            }
            None => {
                self.items.remove(position);
                QuantityChange::Removed
            }
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Σ `unit_price × quantity`.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Σ quantity. Two units of one product count as two.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }
}

fn nullable_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, price: u32) -> NewCartItem {
        NewCartItem::new(
            ProductId::parse(id).unwrap(),
            name,
            Price::from_units(price),
            format!("/img/{id}.jpg"),
        )
    }

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn test_add_same_id_twice_merges() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product("p1", "A", 10)).get(), 1);
        assert_eq!(cart.add(product("p1", "A", 10)).get(), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_existing_ignores_new_name_and_price() {
        let mut cart = Cart::new();
        cart.add(product("p1", "Original", 10));
        cart.add(product("p1", "Renamed", 99));

        let item = cart.get(&id("p1")).unwrap();
        assert_eq!(item.name, "Original");
        assert_eq!(item.unit_price, Price::from_units(10));
        assert_eq!(item.quantity.get(), 2);
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(product("p1", "A", 10));
        cart.add(product("p1", "A", 10));
        cart.add(product("p2", "B", 5));

        assert_eq!(cart.total(), Price::from_units(25));
        assert_eq!(cart.item_count(), 3);
        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }

    #[test]
    fn test_change_quantity_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(product("p1", "A", 10));
        assert_eq!(cart.change_quantity(&id("p1"), -1), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_missing() {
        let mut cart = Cart::new();
        cart.add(product("p1", "A", 10));
        let before = cart.clone();
        assert_eq!(cart.change_quantity(&id("nope"), 1), QuantityChange::Missing);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("p1", "A", 10));
        assert!(!cart.remove(&id("p2")));
        assert_eq!(cart.len(), 1);
        assert!(cart.remove(&id("p1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decode_legacy_format() {
        let raw = r#"[{"id":"p1","name":"A","price":10,"img":"a.jpg","quantity":2},
                      {"id":"p2","name":"B","price":5.5,"img":null,"quantity":1}]"#;
        let cart = Cart::decode(raw).unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&id("p2")).unwrap().image_ref, "");
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), "25.5".parse().unwrap());
    }

    #[test]
    fn test_decode_null_is_empty() {
        assert!(Cart::decode("null").unwrap().is_empty());
        assert!(Cart::decode("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_input() {
        assert!(matches!(Cart::decode(""), Err(CartDecodeError::Blank)));
        assert!(matches!(
            Cart::decode("not json"),
            Err(CartDecodeError::Malformed(_))
        ));
        assert!(Cart::decode(r#"{"id":"p1"}"#).is_err());
        assert!(Cart::decode(r#"[{"id":"p1","name":"A","price":1,"img":"","quantity":0}]"#).is_err());
        assert!(Cart::decode(r#"[{"id":"","name":"A","price":1,"img":"","quantity":1}]"#).is_err());
        assert!(Cart::decode(r#"[{"id":"p1","name":"A","price":-1,"img":"","quantity":1}]"#).is_err());
        assert!(Cart::decode(r#"[{"id":"p1","name":"A","price":5e28,"img":"","quantity":2}]"#).is_err());
    }

    #[test]
    fn test_decode_rejects_duplicates() {
        let raw = r#"[{"id":"p1","name":"A","price":1,"img":"","quantity":1},
                      {"id":"p1","name":"A","price":1,"img":"","quantity":1}]"#;
        assert!(matches!(
            Cart::decode(raw),
            Err(CartDecodeError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_encode_decode_preserves_order() {
        let mut cart = Cart::new();
        cart.add(product("p2", "B", 5));
        cart.add(product("p1", "A", 10));
        cart.change_quantity(&id("p1"), 3);

        let decoded = Cart::decode(&cart.encode().unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }
}
