use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use printshop_catalog::Product;
use printshop_core::ProductId;
use printshop_events::Event;

/// One cart line: a snapshot of the product plus a positive quantity.
///
/// Serialized flat (product fields + `quantity`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Captured unit price times quantity.
    pub fn line_total(&self) -> f64 {
        self.product.price.times(self.quantity)
    }
}

/// Emitted for every cart operation that changed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartChange {
    LineAdded { id: ProductId, quantity: u32, occurred_at: DateTime<Utc> },
    QuantityChanged { id: ProductId, quantity: u32, occurred_at: DateTime<Utc> },
    LineRemoved { id: ProductId, occurred_at: DateTime<Utc> },
    Cleared { occurred_at: DateTime<Utc> },
}

impl Event for CartChange {
    fn event_type(&self) -> &'static str {
        match self {
            CartChange::LineAdded { .. } => "cart.line.added",
            CartChange::QuantityChanged { .. } => "cart.line.quantity_changed",
            CartChange::LineRemoved { .. } => "cart.line.removed",
            CartChange::Cleared { .. } => "cart.cleared",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartChange::LineAdded { occurred_at, .. }
            | CartChange::QuantityChanged { occurred_at, .. }
            | CartChange::LineRemoved { occurred_at, .. }
            | CartChange::Cleared { occurred_at } => *occurred_at,
        }
    }
}

/// Cart lines in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted lines.
    ///
    /// Zero-quantity lines are dropped and repeated ids are folded into the
    /// first line, so a restored cart always satisfies the line invariants.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.lines.iter_mut().find(|l| l.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit; a new line captures the product as given.
    pub fn add(&mut self, product: &Product) -> CartChange {
        let occurred_at = Utc::now();
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return CartChange::QuantityChanged {
                id: product.id.clone(),
                quantity: line.quantity,
                occurred_at,
            };
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        CartChange::LineAdded {
            id: product.id.clone(),
            quantity: 1,
            occurred_at,
        }
    }

    /// Set a line's quantity; zero or below removes the line.
    ///
    /// Unknown ids and unchanged quantities are no-ops.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> Option<CartChange> {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let line = self.lines.iter_mut().find(|l| &l.product.id == id)?;
        if line.quantity == quantity {
            return None;
        }
        line.quantity = quantity;
        Some(CartChange::QuantityChanged {
            id: id.clone(),
            quantity,
            occurred_at: Utc::now(),
        })
    }

    pub fn remove(&mut self, id: &ProductId) -> Option<CartChange> {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product.id != id);
        if self.lines.len() == before {
            return None;
        }
        Some(CartChange::LineRemoved {
            id: id.clone(),
            occurred_at: Utc::now(),
        })
    }

    pub fn clear(&mut self) -> Option<CartChange> {
        if self.lines.is_empty() {
            return None;
        }
        self.lines.clear();
        Some(CartChange::Cleared {
            occurred_at: Utc::now(),
        })
    }

    /// Sum of quantities.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of captured price times quantity.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printshop_catalog::Category;
    use printshop_core::Price;

    fn print(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Print {id}"),
            artist: "Anonymous".to_string(),
            price: Price::from_whole(price),
            original_price: None,
            image: format!("/images/prints/{id}.jpg"),
            category: Category::Engraving,
            size: "20 x 30 cm".to_string(),
            year: 2001,
            description: String::new(),
            edition: "1/5".to_string(),
            in_stock: true,
            featured: None,
        }
    }

    #[test]
    fn adding_twice_increments_quantity() {
        let mut cart = Cart::new();
        let p = print("P", 40);

        assert!(matches!(cart.add(&p), CartChange::LineAdded { quantity: 1, .. }));
        assert!(matches!(cart.add(&p), CartChange::QuantityChanged { quantity: 2, .. }));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_price(), 80.0);
    }

    #[test]
    fn set_quantity_scenario() {
        let mut cart = Cart::new();
        let a = print("A", 10);
        let b = print("B", 20);
        cart.add(&a);
        cart.add(&b);
        cart.set_quantity(&a.id, 3);

        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 50.0);
    }

    #[test]
    fn zero_or_negative_quantity_removes_line() {
        let mut cart = Cart::new();
        let a = print("A", 10);
        let b = print("B", 20);
        cart.add(&a);
        cart.add(&b);

        assert!(matches!(cart.set_quantity(&a.id, 0), Some(CartChange::LineRemoved { .. })));
        assert!(matches!(cart.set_quantity(&b.id, -2), Some(CartChange::LineRemoved { .. })));
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn set_quantity_on_unknown_line_is_a_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity(&ProductId::new("X"), 4), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn captured_price_survives_catalog_edits() {
        let mut cart = Cart::new();
        let mut p = print("P", 100);
        cart.add(&p);

        p.price = Price::from_whole(999);
        cart.add(&p);

        assert_eq!(cart.total_price(), 200.0);
    }

    #[test]
    fn clear_empties_everything_once() {
        let mut cart = Cart::new();
        cart.add(&print("A", 1));
        assert!(cart.clear().is_some());
        assert!(cart.clear().is_none());
    }

    #[test]
    fn line_serializes_flat() {
        let line = CartLine {
            product: print("A", 10),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["id"], "A");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["inStock"], true);

        let back: CartLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }

    #[test]
    fn from_lines_folds_duplicates_and_drops_empty_lines() {
        let cart = Cart::from_lines(vec![
            CartLine { product: print("A", 10), quantity: 1 },
            CartLine { product: print("B", 10), quantity: 0 },
            CartLine { product: print("A", 10), quantity: 2 },
        ]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                .. ProptestConfig::default()
            })]

            #[test]
            fn totals_match_lines(ops in proptest::collection::vec((0usize..4, -2i64..6), 0..30)) {
                let catalog = [print("A", 10), print("B", 20), print("C", 35), print("D", 5)];
                let mut cart = Cart::new();

                for (idx, qty) in ops {
                    let product = &catalog[idx];
                    if qty == 5 {
                        cart.add(product);
                    } else {
                        cart.set_quantity(&product.id, qty);
                    }
                }

                let items: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
                prop_assert_eq!(cart.total_items(), items);
                prop_assert!(cart.lines().iter().all(|l| l.quantity > 0));
                let price: f64 = cart
                    .lines()
                    .iter()
                    .map(|l| l.product.price.amount() * f64::from(l.quantity))
                    .sum();
                prop_assert!((cart.total_price() - price).abs() < 1e-9);
            }
        }
    }
}
