//! Layered product state: catalog + edited originals + uploads.
//!
//! The catalog never changes. Runtime edits to catalog prints live in the
//! edited layer (keyed by catalog id); runtime additions live in the uploaded
//! layer, in upload order. The two layers never share an id: editing an
//! upload rewrites its uploaded entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use printshop_core::{DomainError, DomainResult, ProductId};
use printshop_events::Event;

use crate::catalog::Catalog;
use crate::product::{Product, Provenance};

/// Mutations accepted by [`ProductLayers::execute`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCommand {
    AddUploaded(Product),
    UpdateProduct { id: ProductId, product: Product },
    ResetToOriginal(ProductId),
    RemoveUploaded(ProductId),
}

/// Emitted for every command that changed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductChange {
    Uploaded { id: ProductId, occurred_at: DateTime<Utc> },
    UploadUpdated { id: ProductId, occurred_at: DateTime<Utc> },
    OriginalEdited { id: ProductId, occurred_at: DateTime<Utc> },
    ResetToOriginal { id: ProductId, occurred_at: DateTime<Utc> },
    UploadRemoved { id: ProductId, occurred_at: DateTime<Utc> },
}

impl ProductChange {
    pub fn product_id(&self) -> &ProductId {
        match self {
            ProductChange::Uploaded { id, .. }
            | ProductChange::UploadUpdated { id, .. }
            | ProductChange::OriginalEdited { id, .. }
            | ProductChange::ResetToOriginal { id, .. }
            | ProductChange::UploadRemoved { id, .. } => id,
        }
    }

    /// Whether the uploaded layer changed (and must be re-persisted).
    pub fn touches_uploaded(&self) -> bool {
        matches!(
            self,
            ProductChange::Uploaded { .. }
                | ProductChange::UploadUpdated { .. }
                | ProductChange::UploadRemoved { .. }
        )
    }

    /// Whether the edited-originals layer changed.
    pub fn touches_edited(&self) -> bool {
        matches!(
            self,
            ProductChange::OriginalEdited { .. } | ProductChange::ResetToOriginal { .. }
        )
    }
}

impl Event for ProductChange {
    fn event_type(&self) -> &'static str {
        match self {
            ProductChange::Uploaded { .. } => "catalog.product.uploaded",
            ProductChange::UploadUpdated { .. } => "catalog.product.upload_updated",
            ProductChange::OriginalEdited { .. } => "catalog.product.original_edited",
            ProductChange::ResetToOriginal { .. } => "catalog.product.reset_to_original",
            ProductChange::UploadRemoved { .. } => "catalog.product.upload_removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductChange::Uploaded { occurred_at, .. }
            | ProductChange::UploadUpdated { occurred_at, .. }
            | ProductChange::OriginalEdited { occurred_at, .. }
            | ProductChange::ResetToOriginal { occurred_at, .. }
            | ProductChange::UploadRemoved { occurred_at, .. } => *occurred_at,
        }
    }
}

/// Outcome of [`ProductLayers::restore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub layers: ProductLayers,
    /// Edited entries discarded (unknown catalog id or duplicate).
    pub dropped_edited: usize,
    /// Uploaded entries discarded (id collision).
    pub dropped_uploaded: usize,
}

/// The two mutable layers over a [`Catalog`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductLayers {
    edited: Vec<Product>,
    uploaded: Vec<Product>,
}

impl ProductLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild layers from persisted sets, enforcing the layer invariants.
    ///
    /// Edited entries must name a catalog id (later duplicates replace
    /// earlier ones). Uploads must not collide with the catalog, the edited
    /// layer or an earlier upload.
    pub fn restore(catalog: &Catalog, edited: Vec<Product>, uploaded: Vec<Product>) -> Restored {
        let mut layers = Self::new();
        let mut dropped_edited = 0;
        let mut dropped_uploaded = 0;

        for product in edited {
            if !catalog.contains(&product.id) {
                dropped_edited += 1;
                continue;
            }
            match layers.edited.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => {
                    dropped_edited += 1;
                    *existing = product;
                }
                None => layers.edited.push(product),
            }
        }

        for product in uploaded {
            if catalog.contains(&product.id) || layers.is_uploaded(&product.id) {
                dropped_uploaded += 1;
                continue;
            }
            layers.uploaded.push(product);
        }

        Restored {
            layers,
            dropped_edited,
            dropped_uploaded,
        }
    }

    pub fn edited(&self) -> &[Product] {
        &self.edited
    }

    pub fn uploaded(&self) -> &[Product] {
        &self.uploaded
    }

    pub fn is_uploaded(&self, id: &ProductId) -> bool {
        self.uploaded.iter().any(|p| &p.id == id)
    }

    pub fn is_edited(&self, id: &ProductId) -> bool {
        self.edited.iter().any(|p| &p.id == id)
    }

    pub fn provenance(&self, id: &ProductId) -> Provenance {
        if self.is_uploaded(id) {
            Provenance::Uploaded
        } else if self.is_edited(id) {
            Provenance::Edited
        } else {
            Provenance::Original
        }
    }

    /// The merged, ordered product list.
    pub fn merged(&self, catalog: &Catalog) -> Vec<Product> {
        merge(catalog.products(), &self.edited, &self.uploaded)
    }

    /// Apply a command.
    ///
    /// Returns `Ok(None)` when the command is a legal no-op (resetting a
    /// product that is not edited, removing an unknown upload).
    pub fn execute(
        &mut self,
        catalog: &Catalog,
        command: ProductCommand,
    ) -> DomainResult<Option<ProductChange>> {
        let occurred_at = Utc::now();
        match command {
            ProductCommand::AddUploaded(product) => {
                product.validate()?;
                if catalog.contains(&product.id)
                    || self.is_uploaded(&product.id)
                    || self.is_edited(&product.id)
                {
                    return Err(DomainError::conflict(format!(
                        "product id '{}' is already in use",
                        product.id
                    )));
                }
                let id = product.id.clone();
                self.uploaded.push(product);
                Ok(Some(ProductChange::Uploaded { id, occurred_at }))
            }
            ProductCommand::UpdateProduct { id, product } => {
                if product.id != id {
                    return Err(DomainError::invariant(format!(
                        "replacement record id '{}' does not match '{}'",
                        product.id, id
                    )));
                }
                product.validate()?;

                if let Some(existing) = self.uploaded.iter_mut().find(|p| p.id == id) {
                    *existing = product;
                    return Ok(Some(ProductChange::UploadUpdated { id, occurred_at }));
                }

                if !catalog.contains(&id) {
                    return Err(DomainError::not_found());
                }
                match self.edited.iter_mut().find(|p| p.id == id) {
                    Some(existing) => *existing = product,
                    None => self.edited.push(product),
                }
                Ok(Some(ProductChange::OriginalEdited { id, occurred_at }))
            }
            ProductCommand::ResetToOriginal(id) => {
                let before = self.edited.len();
                self.edited.retain(|p| p.id != id);
                if self.edited.len() == before {
                    return Ok(None);
                }
                Ok(Some(ProductChange::ResetToOriginal { id, occurred_at }))
            }
            ProductCommand::RemoveUploaded(id) => {
                let before = self.uploaded.len();
                self.uploaded.retain(|p| p.id != id);
                if self.uploaded.len() == before {
                    return Ok(None);
                }
                Ok(Some(ProductChange::UploadRemoved { id, occurred_at }))
            }
        }
    }
}

/// Merge the three layers into the gallery order.
///
/// Catalog products in catalog order, each replaced by its edited
/// counterpart when one exists, followed by uploads in upload order.
pub fn merge(catalog: &[Product], edited: &[Product], uploaded: &[Product]) -> Vec<Product> {
    let mut merged = Vec::with_capacity(catalog.len() + uploaded.len());
    for original in catalog {
        let current = edited.iter().find(|p| p.id == original.id).unwrap_or(original);
        merged.push(current.clone());
    }
    merged.extend(uploaded.iter().cloned());
    merged
}
