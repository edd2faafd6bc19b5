//! Cart mutation commands.
//!
//! Each command maps onto one UI event; the manager persists and rerenders
//! before returning.

use souq_cart::{CartEvent, CartManager, CartStore, NewCartItem};
use souq_core::{Price, ProductId};
use tracing::info;

/// Add one unit of a product.
pub fn add<S: CartStore>(
    cart: &mut CartManager<S>,
    id: ProductId,
    name: String,
    price: Price,
    image: String,
) {
    let event = CartEvent::Add(NewCartItem::new(id, name, price, image));
    cart.dispatch(event);
    info!(item_count = cart.item_count(), "Cart updated");
}

/// Change a product's quantity by `delta`.
pub fn change_quantity<S: CartStore>(cart: &mut CartManager<S>, id: &ProductId, delta: i64) {
    if cart.get(id).is_none() {
        info!(product_id = %id, "Product not in cart, nothing to change");
    }
    cart.dispatch(CartEvent::ChangeQuantity {
        id: id.clone(),
        delta,
    });
}

/// Remove a product.
pub fn remove<S: CartStore>(cart: &mut CartManager<S>, id: &ProductId) {
    cart.dispatch(CartEvent::Remove { id: id.clone() });
}
