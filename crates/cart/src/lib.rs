//! Shopping cart domain module.
//!
//! Pure quantity bookkeeping keyed by product id. Prices are captured when a
//! line is created; later catalog edits do not reprice the cart.

pub mod cart;

pub use cart::{Cart, CartChange, CartLine};
