//! The checkout sequence and its observable phase.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;

use printshop_cart::Cart;

use crate::form::CheckoutForm;
use crate::summary::OrderSummary;

/// Where the checkout dialog is in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutPhase {
    Idle,
    Processing,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("cart is empty")]
    EmptyCart,

    #[error("a checkout is already in progress")]
    InProgress,
}

/// Timings and pricing for the simulated checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutConfig {
    /// Simulated payment processing time.
    pub processing_delay: Duration,
    /// How long the confirmation stays up before the flow resets.
    pub close_delay: Duration,
    pub shipping_flat: f64,
    pub tax_rate: f64,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_secs(2),
            close_delay: Duration::from_secs(3),
            shipping_flat: 15.0,
            tax_rate: 0.08,
        }
    }
}

impl CheckoutConfig {
    /// Same pricing, no pauses.
    pub fn immediate() -> Self {
        Self {
            processing_delay: Duration::ZERO,
            close_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// What checkout needs from a cart.
pub trait CheckoutCart {
    fn subtotal(&self) -> f64;

    fn item_count(&self) -> u64;

    /// Empty the cart once the order is complete.
    fn clear_after_checkout(&mut self);
}

impl CheckoutCart for Cart {
    fn subtotal(&self) -> f64 {
        self.total_price()
    }

    fn item_count(&self) -> u64 {
        self.total_items()
    }

    fn clear_after_checkout(&mut self) {
        let _ = self.clear();
    }
}

/// Confirmation of a completed (simulated) order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub email: String,
    pub items: u64,
    pub summary: OrderSummary,
}

/// Runs the checkout sequence; one order at a time.
#[derive(Debug)]
pub struct CheckoutFlow {
    config: CheckoutConfig,
    phase: watch::Sender<CheckoutPhase>,
}

impl CheckoutFlow {
    pub fn new(config: CheckoutConfig) -> Self {
        let (phase, _) = watch::channel(CheckoutPhase::Idle);
        Self { config, phase }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.borrow()
    }

    /// Observe phase transitions (latest value semantics).
    pub fn watch(&self) -> watch::Receiver<CheckoutPhase> {
        self.phase.subscribe()
    }

    pub fn summary<C: CheckoutCart + ?Sized>(&self, cart: &C) -> OrderSummary {
        OrderSummary::new(cart.subtotal(), self.config.shipping_flat, self.config.tax_rate)
    }

    /// Validate, "process", clear the cart, then reset after the close delay.
    ///
    /// Nothing is changed when validation fails.
    pub async fn submit<C: CheckoutCart + ?Sized>(
        &self,
        form: &CheckoutForm,
        cart: &mut C,
    ) -> Result<OrderReceipt, CheckoutError> {
        if self.phase() != CheckoutPhase::Idle {
            return Err(CheckoutError::InProgress);
        }
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::Validation(missing));
        }
        if cart.item_count() == 0 {
            return Err(CheckoutError::EmptyCart);
        }

        let started = self.phase.send_if_modified(|phase| {
            if *phase == CheckoutPhase::Idle {
                *phase = CheckoutPhase::Processing;
                true
            } else {
                false
            }
        });
        if !started {
            return Err(CheckoutError::InProgress);
        }
        let _reset = ResetOnDrop(&self.phase);

        let receipt = OrderReceipt {
            email: form.email.trim().to_string(),
            items: cart.item_count(),
            summary: self.summary(cart),
        };
        tracing::info!(items = receipt.items, total = receipt.summary.total, "checkout processing");
        tokio::time::sleep(self.config.processing_delay).await;

        self.phase.send_replace(CheckoutPhase::Complete);
        cart.clear_after_checkout();
        tracing::info!(email = %receipt.email, "checkout complete");

        tokio::time::sleep(self.config.close_delay).await;

        Ok(receipt)
    }
}

/// Returns the flow to `Idle` when a submission finishes or is dropped mid-way.
struct ResetOnDrop<'a>(&'a watch::Sender<CheckoutPhase>);

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        let previous = self.0.send_replace(CheckoutPhase::Idle);
        if previous == CheckoutPhase::Processing {
            tracing::warn!("checkout abandoned during processing; cart left untouched");
        } else {
            tracing::info!("checkout reset to idle");
        }
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new(CheckoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::fixtures::complete_form;

    /// Cart double that records the phase visible when it is cleared.
    struct RecordingCart {
        subtotal: f64,
        items: u64,
        phase: watch::Receiver<CheckoutPhase>,
        cleared_during: Option<CheckoutPhase>,
    }

    impl RecordingCart {
        fn new(flow: &CheckoutFlow, subtotal: f64, items: u64) -> Self {
            Self {
                subtotal,
                items,
                phase: flow.watch(),
                cleared_during: None,
            }
        }
    }

    impl CheckoutCart for RecordingCart {
        fn subtotal(&self) -> f64 {
            self.subtotal
        }

        fn item_count(&self) -> u64 {
            self.items
        }

        fn clear_after_checkout(&mut self) {
            self.cleared_during = Some(*self.phase.borrow());
            self.items = 0;
            self.subtotal = 0.0;
        }
    }

    #[tokio::test]
    async fn successful_checkout_clears_cart_and_returns_to_idle() {
        let flow = CheckoutFlow::new(CheckoutConfig::immediate());
        let mut cart = RecordingCart::new(&flow, 100.0, 2);

        let receipt = flow.submit(&complete_form(), &mut cart).await.unwrap();

        assert_eq!(receipt.items, 2);
        assert!((receipt.summary.total - 123.0).abs() < 1e-9);
        assert_eq!(cart.cleared_during, Some(CheckoutPhase::Complete));
        assert_eq!(cart.items, 0);
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn missing_fields_abort_without_touching_cart() {
        let flow = CheckoutFlow::new(CheckoutConfig::immediate());
        let mut cart = RecordingCart::new(&flow, 50.0, 1);
        let mut form = complete_form();
        form.email.clear();

        let err = flow.submit(&form, &mut cart).await.unwrap_err();

        assert_eq!(err, CheckoutError::Validation(vec!["email"]));
        assert_eq!(err.to_string(), "missing required fields: email");
        assert_eq!(cart.items, 1);
        assert_eq!(cart.cleared_during, None);
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() {
        let flow = CheckoutFlow::new(CheckoutConfig::immediate());
        let mut cart = Cart::new();
        let err = flow.submit(&complete_form(), &mut cart).await.unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);
    }

    #[tokio::test]
    async fn second_submission_during_processing_is_rejected() {
        let flow = CheckoutFlow::new(CheckoutConfig {
            processing_delay: Duration::from_millis(20),
            close_delay: Duration::ZERO,
            ..CheckoutConfig::default()
        });
        let form = complete_form();
        let mut first = RecordingCart::new(&flow, 10.0, 1);
        let mut second = RecordingCart::new(&flow, 20.0, 1);

        let (a, b) = tokio::join!(flow.submit(&form, &mut first), flow.submit(&form, &mut second));

        assert!(a.is_ok());
        assert_eq!(b.unwrap_err(), CheckoutError::InProgress);
        assert_eq!(second.items, 1);
    }

    #[tokio::test]
    async fn abandoned_submission_returns_to_idle() {
        let flow = CheckoutFlow::new(CheckoutConfig {
            processing_delay: Duration::from_millis(200),
            close_delay: Duration::ZERO,
            ..CheckoutConfig::default()
        });
        let form = complete_form();
        let mut cart = RecordingCart::new(&flow, 30.0, 1);

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), flow.submit(&form, &mut cart)).await;

        assert!(abandoned.is_err());
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
        assert_eq!(cart.items, 1);
        assert_eq!(cart.cleared_during, None);

        let receipt = flow.submit(&form, &mut cart).await.unwrap();
        assert_eq!(receipt.items, 1);
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }

    #[tokio::test]
    async fn abandoned_confirmation_still_resets() {
        let flow = CheckoutFlow::new(CheckoutConfig {
            processing_delay: Duration::ZERO,
            close_delay: Duration::from_millis(200),
            ..CheckoutConfig::default()
        });
        let mut cart = RecordingCart::new(&flow, 30.0, 1);

        let abandoned = tokio::time::timeout(
            Duration::from_millis(20),
            flow.submit(&complete_form(), &mut cart),
        )
        .await;

        assert!(abandoned.is_err());
        assert_eq!(cart.cleared_during, Some(CheckoutPhase::Complete));
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn default_config_matches_storefront_pricing() {
        let config = CheckoutConfig::default();
        assert_eq!(config.processing_delay, Duration::from_secs(2));
        assert_eq!(config.close_delay, Duration::from_secs(3));
        assert_eq!(config.shipping_flat, 15.0);
        assert_eq!(config.tax_rate, 0.08);
    }
}
