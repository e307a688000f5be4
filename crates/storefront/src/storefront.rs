//! The composition root.

use std::sync::Arc;

use anyhow::Context;
use chrono::Datelike;
use tokio::sync::watch;

use printshop_cart::CartChange;
use printshop_catalog::{Catalog, GalleryQuery, GalleryView, Product, ProductChange, UploadDraft};
use printshop_checkout::{
    CheckoutConfig, CheckoutError, CheckoutFlow, CheckoutForm, CheckoutPhase, OrderReceipt,
    OrderSummary,
};
use printshop_core::{DomainError, DomainResult, ProductId};
use printshop_events::Subscription;
use printshop_infra::{CartStore, FileStore, KeyValueStore, ProductStore};

use crate::config::StorefrontConfig;

/// Owns the product store, cart store and checkout flow for one profile.
///
/// Both stores share one durable backend; they never write each other's keys.
#[derive(Debug)]
pub struct Storefront<S> {
    products: ProductStore<S>,
    cart: CartStore<S>,
    checkout: CheckoutFlow,
}

impl Storefront<Arc<FileStore>> {
    /// Open the file-backed storefront in `config.data_dir` with the built-in catalog.
    pub fn open(config: &StorefrontConfig) -> anyhow::Result<Self> {
        let storage = FileStore::open(&config.data_dir)
            .with_context(|| format!("failed to open data directory at {:?}", config.data_dir))?;
        tracing::info!(data_dir = ?config.data_dir, "storefront storage opened");
        Ok(Self::with_storage(Catalog::builtin(), Arc::new(storage), config.checkout.clone()))
    }
}

impl<S: KeyValueStore + Clone> Storefront<S> {
    pub fn with_storage(catalog: Catalog, storage: S, checkout: CheckoutConfig) -> Self {
        Self {
            products: ProductStore::load(catalog, storage.clone()),
            cart: CartStore::load(storage),
            checkout: CheckoutFlow::new(checkout),
        }
    }
}

impl<S: KeyValueStore> Storefront<S> {
    /// Validate an upload form and append it as a new print.
    pub fn upload(&mut self, draft: UploadDraft) -> DomainResult<ProductId> {
        let id = ProductId::generate();
        let product = draft.into_product(id.clone(), current_year())?;
        self.products.add_uploaded(product)?;
        tracing::info!(%id, "print uploaded");
        Ok(id)
    }

    pub fn edit(&mut self, id: &ProductId, product: Product) -> DomainResult<()> {
        self.products.update_product(id, product)
    }

    pub fn reset(&mut self, id: &ProductId) -> bool {
        self.products.reset_to_original(id)
    }

    pub fn remove_upload(&mut self, id: &ProductId) -> bool {
        self.products.remove_uploaded(id)
    }

    /// Add one unit of a print to the cart, at its current price.
    pub fn add_to_cart(&mut self, id: &ProductId) -> DomainResult<()> {
        let product = self.products.get(id).ok_or_else(DomainError::not_found)?;
        if !product.in_stock {
            return Err(DomainError::validation(format!("'{}' is sold out", product.title)));
        }
        self.cart.add(&product);
        Ok(())
    }

    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        self.cart.set_quantity(id, quantity)
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.cart.remove(id)
    }

    /// Run the simulated checkout against the current cart.
    pub async fn checkout(&mut self, form: &CheckoutForm) -> Result<OrderReceipt, CheckoutError> {
        self.checkout.submit(form, &mut self.cart).await
    }

    /// Rewrite every persisted key from memory.
    ///
    /// Both stores are written even when the first fails.
    pub fn save(&self) -> bool {
        let products = self.products.save();
        let cart = self.cart.save();
        products && cart
    }
}

impl<S> Storefront<S> {
    pub fn gallery(&self, query: &GalleryQuery) -> GalleryView {
        query.run(&self.products.list())
    }

    pub fn products(&self) -> &ProductStore<S> {
        &self.products
    }

    pub fn cart(&self) -> &CartStore<S> {
        &self.cart
    }

    pub fn order_summary(&self) -> OrderSummary {
        self.checkout.summary(self.cart.cart())
    }

    pub fn checkout_phase(&self) -> watch::Receiver<CheckoutPhase> {
        self.checkout.watch()
    }

    pub fn subscribe_products(&self) -> Subscription<ProductChange> {
        self.products.subscribe()
    }

    pub fn subscribe_cart(&self) -> Subscription<CartChange> {
        self.cart.subscribe()
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}
