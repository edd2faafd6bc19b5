//! Simulated checkout.
//!
//! There is no payment gateway. Confirming an order waits a fixed delay,
//! then clears the cart and hands back a confirmation. Dropping the
//! [`Checkout::confirm`] future before the delay elapses leaves the cart
//! untouched.

use std::time::Duration;

use askama::Template;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use souq_core::{CustomerName, Price};

use crate::config::CartConfig;
use crate::manager::CartManager;
use crate::store::CartStore;

/// Checkout errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was opened on an empty cart.
    #[error("cart is empty")]
    EmptyCart,
}

/// One line of the checkout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Product display name.
    pub name: String,
    /// Units being bought.
    pub quantity: u32,
    /// `unit_price × quantity`.
    pub line_total: Price,
}

/// What the customer is about to pay for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// One line per cart entry, in cart order.
    pub lines: Vec<SummaryLine>,
    /// Amount due.
    pub total: Price,
}

/// Checkout summary display data for templates.
struct SummaryLineView {
    name: String,
    quantity: u32,
    line_total: String,
}

/// Checkout summary panel template.
#[derive(Template)]
#[template(path = "checkout/summary.html")]
struct CheckoutSummaryTemplate {
    lines: Vec<SummaryLineView>,
    total: String,
}

impl CheckoutSummary {
    /// Render the summary panel.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, currency_symbol: &str) -> askama::Result<String> {
        CheckoutSummaryTemplate {
            lines: self
                .lines
                .iter()
                .map(|line| SummaryLineView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_total: line.line_total.display_with(currency_symbol),
                })
                .collect(),
            total: self.total.display_with(currency_symbol),
        }
        .render()
    }
}

/// A completed (simulated) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    /// Order reference shown to the customer.
    pub reference: Uuid,
    /// Who placed the order.
    pub customer: CustomerName,
    /// Amount charged, as it stood when confirmation started.
    pub total: Price,
    /// When the simulated payment completed.
    pub confirmed_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Thank-you message shown to the customer.
    #[must_use]
    pub fn message(&self, currency_symbol: &str) -> String {
        format!(
            "شكراً لك يا {}! \nتم استلام طلبك بقيمة {} بنجاح.\nسنتواصل معك قريباً لتأكيد الشحن.",
            self.customer,
            self.total.display_with(currency_symbol)
        )
    }
}

/// Checkout flow over a [`CartManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkout {
    delay: Duration,
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl From<&CartConfig> for Checkout {
    fn from(config: &CartConfig) -> Self {
        Self::new(config.checkout_delay)
    }
}

impl Checkout {
    /// Simulated gateway latency.
    pub const DEFAULT_DELAY: Duration =
        Duration::from_millis(CartConfig::DEFAULT_CHECKOUT_DELAY_MS);

    /// Checkout that waits `delay` before confirming.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Open checkout: summarize the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy.
    pub fn begin<S: CartStore>(&self, cart: &CartManager<S>) -> Result<CheckoutSummary, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        Ok(CheckoutSummary {
            lines: cart
                .entries()
                .iter()
                .map(|item| SummaryLine {
                    name: item.name.clone(),
                    quantity: item.quantity.get(),
                    line_total: item.line_total(),
                })
                .collect(),
            total: cart.total(),
        })
    }

    /// Confirm the order.
    ///
    /// The total is taken from the cart as it stands when confirmation
    /// starts. After the simulated delay the cart is cleared.
    #[instrument(skip(self, cart, customer), fields(customer = %customer))]
    pub async fn confirm<S: CartStore>(
        &self,
        cart: &mut CartManager<S>,
        customer: CustomerName,
    ) -> OrderConfirmation {
        let total = cart.total();
        let delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX);
        tracing::info!(%total, delay_ms, "Processing simulated payment");

        tokio::time::sleep(self.delay).await;

        cart.clear();
        let confirmation = OrderConfirmation {
            reference: Uuid::new_v4(),
            customer,
            total,
            confirmed_at: Utc::now(),
        };
        tracing::info!(reference = %confirmation.reference, %total, "Order confirmed");
        confirmation
    }
}
