//! Products domain module.
//!
//! This crate contains the sellable-item value type and its pricing rules,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod product;

pub use product::{Product, ProductKind};
