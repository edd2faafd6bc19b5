//! Core types for Souq.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod price;
pub mod quantity;

pub use customer::{CustomerName, CustomerNameError};
pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError};
pub use quantity::{Quantity, QuantityError};
