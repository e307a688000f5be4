//! The layered product store: catalog + edits + uploads, persisted.

use std::sync::{Arc, OnceLock};

use printshop_catalog::{Catalog, Product, ProductChange, ProductCommand, ProductLayers, Provenance};
use printshop_core::{DomainResult, ProductId};
use printshop_events::{ChangeBus, Event, InMemoryChangeBus, Subscription};

use crate::kv::KeyValueStore;
use crate::persisted::{
    EDITED_ORIGINAL_PRODUCTS_KEY, UPLOADED_PRODUCTS_KEY, load_collection, persist,
};

/// One consistent, provenance-aware product list backed by durable storage.
///
/// Every effective mutation rewrites the affected key and notifies
/// subscribers. Storage failures are logged and never surface: the
/// in-memory layers stay authoritative for the session.
#[derive(Debug)]
pub struct ProductStore<S> {
    catalog: Catalog,
    layers: ProductLayers,
    storage: S,
    merged: OnceLock<Arc<[Product]>>,
    bus: InMemoryChangeBus<ProductChange>,
}

impl<S: KeyValueStore> ProductStore<S> {
    /// Restore layers from `storage`.
    ///
    /// Corrupted keys start empty; persisted entries that break the layer
    /// invariants are dropped and the cleaned set is written back.
    pub fn load(catalog: Catalog, storage: S) -> Self {
        let edited: Vec<Product> = load_collection(&storage, EDITED_ORIGINAL_PRODUCTS_KEY);
        let uploaded: Vec<Product> = load_collection(&storage, UPLOADED_PRODUCTS_KEY);
        let restored = ProductLayers::restore(&catalog, edited, uploaded);

        if restored.dropped_edited > 0 {
            tracing::warn!(
                dropped = restored.dropped_edited,
                "dropped edited entries without a catalog counterpart"
            );
            persist(&storage, EDITED_ORIGINAL_PRODUCTS_KEY, restored.layers.edited());
        }
        if restored.dropped_uploaded > 0 {
            tracing::warn!(
                dropped = restored.dropped_uploaded,
                "dropped uploaded entries with colliding ids"
            );
            persist(&storage, UPLOADED_PRODUCTS_KEY, restored.layers.uploaded());
        }

        tracing::info!(
            catalog = catalog.len(),
            edited = restored.layers.edited().len(),
            uploaded = restored.layers.uploaded().len(),
            "product store loaded"
        );

        Self {
            catalog,
            layers: restored.layers,
            storage,
            merged: OnceLock::new(),
            bus: InMemoryChangeBus::new(),
        }
    }

    /// Write both layers. Returns whether both writes landed.
    pub fn save(&self) -> bool {
        let edited = persist(&self.storage, EDITED_ORIGINAL_PRODUCTS_KEY, self.layers.edited());
        let uploaded = persist(&self.storage, UPLOADED_PRODUCTS_KEY, self.layers.uploaded());
        edited && uploaded
    }

    /// Append a fully-formed product to the uploads.
    pub fn add_uploaded(&mut self, product: Product) -> DomainResult<()> {
        self.execute(ProductCommand::AddUploaded(product)).map(|_| ())
    }

    /// Overwrite an upload in place, or upsert the edited copy of a catalog print.
    pub fn update_product(&mut self, id: &ProductId, product: Product) -> DomainResult<()> {
        self.execute(ProductCommand::UpdateProduct {
            id: id.clone(),
            product,
        })
        .map(|_| ())
    }

    /// Drop the edited copy of a catalog print. Returns whether one existed.
    ///
    /// Uploads have no original to return to; for them this is a no-op.
    pub fn reset_to_original(&mut self, id: &ProductId) -> bool {
        matches!(self.execute(ProductCommand::ResetToOriginal(id.clone())), Ok(true))
    }

    /// Delete an upload. Returns whether it existed.
    pub fn remove_uploaded(&mut self, id: &ProductId) -> bool {
        matches!(self.execute(ProductCommand::RemoveUploaded(id.clone())), Ok(true))
    }

    fn execute(&mut self, command: ProductCommand) -> DomainResult<bool> {
        let Some(change) = self.layers.execute(&self.catalog, command)? else {
            tracing::debug!("product command was a no-op");
            return Ok(false);
        };

        self.merged = OnceLock::new();
        if change.touches_uploaded() {
            persist(&self.storage, UPLOADED_PRODUCTS_KEY, self.layers.uploaded());
        }
        if change.touches_edited() {
            persist(&self.storage, EDITED_ORIGINAL_PRODUCTS_KEY, self.layers.edited());
        }

        tracing::debug!(
            event = change.event_type(),
            id = %change.product_id(),
            "product store changed"
        );
        if let Err(err) = self.bus.publish(change) {
            tracing::warn!(error = ?err, "failed to notify product store subscribers");
        }
        Ok(true)
    }
}

impl<S> ProductStore<S> {
    pub fn is_uploaded(&self, id: &ProductId) -> bool {
        self.layers.is_uploaded(id)
    }

    pub fn is_edited(&self, id: &ProductId) -> bool {
        self.layers.is_edited(id)
    }

    pub fn provenance(&self, id: &ProductId) -> Provenance {
        self.layers.provenance(id)
    }

    /// The merged list: catalog order (edits applied) then uploads.
    ///
    /// Computed once per state and shared until the next mutation.
    pub fn list(&self) -> Arc<[Product]> {
        self.merged
            .get_or_init(|| self.layers.merged(&self.catalog).into())
            .clone()
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.list().iter().find(|p| &p.id == id).cloned()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn uploaded(&self) -> &[Product] {
        self.layers.uploaded()
    }

    pub fn edited(&self) -> &[Product] {
        self.layers.edited()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Receive a [`ProductChange`] for every later effective mutation.
    pub fn subscribe(&self) -> Subscription<ProductChange> {
        self.bus.subscribe()
    }
}
