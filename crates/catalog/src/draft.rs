//! Upload form input, validated into a [`Product`].

use printshop_core::{DomainError, DomainResult, Price, ProductId};

use crate::product::{Category, Product};

const DEFAULT_SIZE: &str = "Unknown";
const DEFAULT_DESCRIPTION: &str = "No description available.";
const DEFAULT_EDITION: &str = "1/1";

/// Raw upload form fields as typed by the visitor.
///
/// Numeric fields stay text until [`UploadDraft::into_product`] so that the
/// lenient parsing rules live in one place.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDraft {
    pub title: String,
    pub artist: String,
    pub price: String,
    pub category: Category,
    pub size: String,
    pub year: String,
    pub description: String,
    pub edition: String,
    /// Inline image (see [`crate::ImageUpload::into_data_uri`]).
    pub image: Option<String>,
}

impl UploadDraft {
    /// An empty form, pre-filled the way the upload panel opens.
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            price: String::new(),
            category: Category::Etching,
            size: String::new(),
            year: current_year.to_string(),
            description: String::new(),
            edition: DEFAULT_EDITION.to_string(),
            image: None,
        }
    }

    /// Validate and build the product.
    ///
    /// Title, artist, price and image are required; every missing one is
    /// named in a single validation error. Other fields fall back to
    /// defaults.
    pub fn into_product(self, id: ProductId, current_year: i32) -> DomainResult<Product> {
        let title = self.title.trim();
        let artist = self.artist.trim();
        let price_text = self.price.trim();

        let mut missing = Vec::new();
        if title.is_empty() {
            missing.push("title");
        }
        if artist.is_empty() {
            missing.push("artist");
        }
        if price_text.is_empty() {
            missing.push("price");
        }
        let image = self.image.filter(|i| !i.trim().is_empty());
        if image.is_none() {
            missing.push("image");
        }
        let Some(image) = image.filter(|_| missing.is_empty()) else {
            return Err(DomainError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        };

        // Unparsable price text counts as zero; a parsed negative is an error.
        let price = match price_text.parse::<f64>() {
            Ok(amount) => Price::new(amount)?,
            Err(_) => Price::ZERO,
        };
        let year = self.year.trim().parse::<i32>().unwrap_or(current_year);

        Ok(Product {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
            price,
            original_price: None,
            image,
            category: self.category,
            size: non_blank_or(&self.size, DEFAULT_SIZE),
            year,
            description: non_blank_or(&self.description, DEFAULT_DESCRIPTION),
            edition: non_blank_or(&self.edition, DEFAULT_EDITION),
            in_stock: true,
            featured: None,
        })
    }
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
