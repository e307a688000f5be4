//! Domain foundation building blocks for the print shop.
//!
//! This crate contains **pure domain** primitives (no storage or IO concerns).

pub mod error;
pub mod id;
pub mod price;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use price::Price;
