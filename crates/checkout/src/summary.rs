use serde::Serialize;

/// Priced order: cart subtotal plus flat shipping and percentage tax.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderSummary {
    pub fn new(subtotal: f64, shipping_flat: f64, tax_rate: f64) -> Self {
        let tax = subtotal * tax_rate;
        Self {
            subtotal,
            shipping: shipping_flat,
            tax,
            total: subtotal + shipping_flat + tax,
        }
    }
}
