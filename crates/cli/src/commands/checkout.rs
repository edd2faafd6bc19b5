//! Checkout command.

use souq_cart::{CartConfig, CartManager, CartStore, Checkout};
use souq_core::CustomerName;
use tracing::info;

use super::output;

/// Summarize the cart, run the simulated payment, and clear the cart.
///
/// # Errors
///
/// Returns an error if the cart is empty or the summary cannot be rendered.
pub async fn run<S: CartStore>(
    cart: &mut CartManager<S>,
    config: &CartConfig,
    customer: CustomerName,
) -> Result<(), Box<dyn std::error::Error>> {
    let checkout = Checkout::from(config);
    let summary = checkout.begin(cart)?;
    output::print_section("Checkout", &summary.render(&config.currency_symbol)?);

    info!(lines = summary.lines.len(), "Awaiting payment confirmation");
    let confirmation = checkout.confirm(cart, customer).await;

    output::print_section(
        &format!("Order {}", confirmation.reference),
        &confirmation.message(&config.currency_symbol),
    );
    Ok(())
}
