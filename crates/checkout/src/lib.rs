//! Simulated checkout.
//!
//! Validates the shipping/payment form, prices the order and runs the fixed
//! `Idle → Processing → Complete → Idle` sequence. No payment provider is
//! contacted; the processing step is a timed pause.

pub mod flow;
pub mod form;
pub mod summary;

pub use flow::{
    CheckoutCart, CheckoutConfig, CheckoutError, CheckoutFlow, CheckoutPhase, OrderReceipt,
};
pub use form::CheckoutForm;
pub use summary::OrderSummary;
