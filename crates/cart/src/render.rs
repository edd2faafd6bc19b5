//! Render projections of cart state.
//!
//! After every mutation the manager hands a [`CartSnapshot`] to each
//! registered [`CartProjection`]. The built-in projections render askama
//! fragments into [`RenderSlot`]s that the surrounding UI reads from:
//!
//! - [`ItemListProjection`] - one row per entry, or the empty-state message
//! - [`CountBadgeProjection`] - the running unit count
//! - [`TotalProjection`] - the running total, replicated into every target
//!
//! Row controls are rendered as `data-action`/`data-id`/`data-delta`
//! attributes; the UI turns a clicked control back into a
//! [`crate::CartEvent`] with [`crate::ControlForm`] and dispatches it to the
//! manager it already holds.

use std::cell::RefCell;
use std::rc::Rc;

use askama::Template;

use souq_core::Price;

use crate::cart::CartItem;
use crate::config::CartConfig;

/// State handed to projections after a mutation.
#[derive(Debug, Clone, Copy)]
pub struct CartSnapshot<'a> {
    /// Entries in insertion order.
    pub items: &'a [CartItem],
    /// Σ quantity.
    pub item_count: u64,
    /// Σ `unit_price × quantity`.
    pub total: Price,
}

/// A render target refreshed after every mutation.
pub trait CartProjection {
    /// Redraw from the current state.
    fn render(&mut self, snapshot: &CartSnapshot<'_>);
}

impl<F> CartProjection for F
where
    F: FnMut(&CartSnapshot<'_>),
{
    fn render(&mut self, snapshot: &CartSnapshot<'_>) {
        self(snapshot);
    }
}

/// Shared text buffer holding a projection's latest output.
#[derive(Debug, Clone, Default)]
pub struct RenderSlot(Rc<RefCell<String>>);

impl RenderSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest rendered output.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    fn replace(&self, html: String) {
        *self.0.borrow_mut() = html;
    }

    fn render_into(&self, projection: &str, template: &impl Template) {
        match template.render() {
            Ok(html) => self.replace(html),
            Err(e) => tracing::error!(projection, error = %e, "Failed to render cart projection"),
        }
    }
}

/// Presentation strings shared by the built-in projections.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Appended to every amount, e.g. `ر.س`.
    pub currency_symbol: String,
    /// Shown by the item list when the cart is empty.
    pub empty_message: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            currency_symbol: CartConfig::DEFAULT_CURRENCY_SYMBOL.to_string(),
            empty_message: CartConfig::DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl From<&CartConfig> for RenderSettings {
    fn from(config: &CartConfig) -> Self {
        Self {
            currency_symbol: config.currency_symbol.clone(),
            empty_message: config.empty_cart_message.clone(),
        }
    }
}

/// Cart row display data for templates.
#[derive(Debug, Clone)]
pub struct CartRowView {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub image: String,
}

impl CartRowView {
    fn new(item: &CartItem, currency_symbol: &str) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            unit_price: item.unit_price.display_with(currency_symbol),
            quantity: item.quantity.get(),
            image: item.image_ref.clone(),
        }
    }
}

/// Cart items fragment.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate<'a> {
    rows: &'a [CartRowView],
    empty_message: &'a str,
}

/// Cart count badge fragment.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u64,
}

/// Cart total fragment.
#[derive(Template)]
#[template(path = "partials/cart_total.html")]
struct CartTotalTemplate<'a> {
    total: &'a str,
}

/// List view of every entry.
#[derive(Debug, Clone)]
pub struct ItemListProjection {
    slot: RenderSlot,
    settings: RenderSettings,
}

impl ItemListProjection {
    #[must_use]
    pub const fn new(slot: RenderSlot, settings: RenderSettings) -> Self {
        Self { slot, settings }
    }
}

impl CartProjection for ItemListProjection {
    fn render(&mut self, snapshot: &CartSnapshot<'_>) {
        let rows: Vec<CartRowView> = snapshot
            .items
            .iter()
            .map(|item| CartRowView::new(item, &self.settings.currency_symbol))
            .collect();
        self.slot.render_into(
            "items",
            &CartItemsTemplate {
                rows: &rows,
                empty_message: &self.settings.empty_message,
            },
        );
    }
}

/// Unit-count badge.
#[derive(Debug, Clone)]
pub struct CountBadgeProjection {
    slot: RenderSlot,
}

impl CountBadgeProjection {
    #[must_use]
    pub const fn new(slot: RenderSlot) -> Self {
        Self { slot }
    }
}

impl CartProjection for CountBadgeProjection {
    fn render(&mut self, snapshot: &CartSnapshot<'_>) {
        self.slot.render_into(
            "count",
            &CartCountTemplate {
                count: snapshot.item_count,
            },
        );
    }
}

/// Running total, written to the cart panel and any checkout summary.
#[derive(Debug, Clone)]
pub struct TotalProjection {
    targets: Vec<RenderSlot>,
    currency_symbol: String,
}

impl TotalProjection {
    #[must_use]
    pub fn new(targets: Vec<RenderSlot>, currency_symbol: impl Into<String>) -> Self {
        Self {
            targets,
            currency_symbol: currency_symbol.into(),
        }
    }
}

impl CartProjection for TotalProjection {
    fn render(&mut self, snapshot: &CartSnapshot<'_>) {
        let total = snapshot.total.display_with(&self.currency_symbol);
        let template = CartTotalTemplate { total: &total };
        for target in &self.targets {
            target.render_into("total", &template);
        }
    }
}

/// Slots for the three standard projections.
///
/// `checkout_total` mirrors `total` for the checkout summary panel.
#[derive(Debug, Clone, Default)]
pub struct CartPanel {
    pub items: RenderSlot,
    pub count: RenderSlot,
    pub total: RenderSlot,
    pub checkout_total: RenderSlot,
}

impl CartPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the three standard projections writing into this panel.
    #[must_use]
    pub fn projections(
        &self,
        settings: &RenderSettings,
    ) -> (ItemListProjection, CountBadgeProjection, TotalProjection) {
        (
            ItemListProjection::new(self.items.clone(), settings.clone()),
            CountBadgeProjection::new(self.count.clone()),
            TotalProjection::new(
                vec![self.total.clone(), self.checkout_total.clone()],
                settings.currency_symbol.clone(),
            ),
        )
    }
}
