//! Souq Core - Shared domain types.
//!
//! This crate provides the value types used across all Souq components:
//! - `cart` - The cart manager, durable store, projections and checkout flow
//! - `cli` - Command-line surface driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! rendering. Every type validates on construction and on deserialization,
//! so a value that exists is a value that is valid.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities and
//!   customer names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
