//! Persisted cart.

use printshop_cart::{Cart, CartChange, CartLine};
use printshop_catalog::Product;
use printshop_checkout::CheckoutCart;
use printshop_core::ProductId;
use printshop_events::{ChangeBus, Event, InMemoryChangeBus, Subscription};

use crate::kv::KeyValueStore;
use crate::persisted::{CART_KEY, load_collection, persist};

/// A [`Cart`] mirrored to the `cart` key after every effective change.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    bus: InMemoryChangeBus<CartChange>,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn load(storage: S) -> Self {
        let lines: Vec<CartLine> = load_collection(&storage, CART_KEY);
        let cart = Cart::from_lines(lines);
        tracing::debug!(lines = cart.lines().len(), "cart loaded");
        Self {
            cart,
            storage,
            bus: InMemoryChangeBus::new(),
        }
    }

    /// Rewrite the cart key from memory. Returns whether the write landed.
    pub fn save(&self) -> bool {
        persist(&self.storage, CART_KEY, self.cart.lines())
    }

    pub fn add(&mut self, product: &Product) {
        let change = self.cart.add(product);
        self.commit(Some(change));
    }

    /// Returns whether anything changed.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        let change = self.cart.set_quantity(id, quantity);
        self.commit(change)
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        let change = self.cart.remove(id);
        self.commit(change)
    }

    pub fn clear(&mut self) -> bool {
        let change = self.cart.clear();
        self.commit(change)
    }

    fn commit(&mut self, change: Option<CartChange>) -> bool {
        let Some(change) = change else {
            return false;
        };
        persist(&self.storage, CART_KEY, self.cart.lines());
        tracing::debug!(event = change.event_type(), "cart changed");
        if let Err(err) = self.bus.publish(change) {
            tracing::warn!(error = ?err, "failed to notify cart subscribers");
        }
        true
    }
}

impl<S> CartStore<S> {
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn subscribe(&self) -> Subscription<CartChange> {
        self.bus.subscribe()
    }
}

impl<S: KeyValueStore> CheckoutCart for CartStore<S> {
    fn subtotal(&self) -> f64 {
        self.total_price()
    }

    fn item_count(&self) -> u64 {
        self.total_items()
    }

    fn clear_after_checkout(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::kv::InMemoryStore;
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
            category: Category::Etching,
            size: "Unknown".to_string(),
            year: 1890,
            description: String::new(),
            edition: "1/1".to_string(),
            in_stock: true,
            featured: None,
        }
    }

    #[test]
    fn cart_survives_reload() {
        let storage = Arc::new(InMemoryStore::new());
        let mut store = CartStore::load(storage.clone());
        store.add(&print("1", 100));
        store.add(&print("1", 100));
        store.add(&print("2", 40));

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.lines(), store.lines());
        assert_eq!(reloaded.total_items(), 3);
        assert!((reloaded.total_price() - 240.0).abs() < 1e-9);
    }

    #[test]
    fn quantity_zero_removes_and_persists() {
        let storage = Arc::new(InMemoryStore::new());
        let mut store = CartStore::load(storage.clone());
        store.add(&print("1", 100));

        assert!(store.set_quantity(&ProductId::new("1"), 0));
        assert!(store.lines().is_empty());
        assert_eq!(storage.get(CART_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn no_op_changes_are_not_published() {
        let mut store = CartStore::load(Arc::new(InMemoryStore::new()));
        let sub = store.subscribe();

        assert!(!store.remove(&ProductId::new("missing")));
        assert!(!store.clear());
        store.add(&print("1", 100));
        assert!(!store.set_quantity(&ProductId::new("1"), 1));

        let kinds: Vec<&str> = sub.drain().iter().map(|c| c.event_type()).collect();
        assert_eq!(kinds, vec!["cart.line.added"]);
    }

    #[test]
    fn save_rewrites_a_lost_cart_write() {
        let storage = Arc::new(InMemoryStore::new());
        let mut store = CartStore::load(storage.clone());
        store.add(&print("4", 60));
        storage.remove(CART_KEY).unwrap();

        assert!(store.save());

        let reloaded = CartStore::load(storage);
        assert_eq!(reloaded.total_items(), 1);
    }

    #[test]
    fn save_reports_a_failed_write() {
        let mut store = CartStore::load(Arc::new(InMemoryStore::with_quota(16)));
        store.add(&print("4", 60));

        assert_eq!(store.total_items(), 1);
        assert!(!store.save());
    }

    #[test]
    fn corrupted_cart_loads_empty() {
        let storage = Arc::new(InMemoryStore::new());
        storage.set(CART_KEY, "not json").unwrap();
        let store = CartStore::load(storage);
        assert!(store.lines().is_empty());
    }

    #[test]
    fn checkout_clear_empties_the_persisted_cart() {
        let storage = Arc::new(InMemoryStore::new());
        let mut store = CartStore::load(storage.clone());
        store.add(&print("3", 10));

        store.clear_after_checkout();

        assert_eq!(store.item_count(), 0);
        assert!(CartStore::load(storage).lines().is_empty());
    }
}
