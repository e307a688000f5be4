//! Catalog domain module.
//!
//! Product records, the immutable build-time catalog, the layered
//! catalog/edited/uploaded merge, upload drafts and the gallery query. Pure
//! domain logic: no storage, no IO.

pub mod catalog;
pub mod draft;
pub mod image;
pub mod layers;
pub mod product;
pub mod query;

pub use catalog::Catalog;
pub use draft::UploadDraft;
pub use image::{ImageUpload, UPLOAD_SIZE_GUIDANCE_BYTES, is_inline_image};
pub use layers::{ProductChange, ProductCommand, ProductLayers, merge};
pub use product::{Category, Product, Provenance};
pub use query::{CategoryFilter, GalleryQuery, GalleryView, SortKey};
