//! Terminal output for rendered cart fragments.

#![allow(clippy::print_stdout)]

use souq_cart::CartPanel;

/// Print a titled block of text.
pub fn print_section(title: &str, body: &str) {
    println!("== {title} ==");
    for line in body.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
        println!("{line}");
    }
    println!();
}

/// Print the cart panel's three projections.
pub fn print_panel(panel: &CartPanel) {
    print_section("Cart", &panel.items.contents());
    print_section("Items", &panel.count.contents());
    print_section("Total", &panel.total.contents());
}
