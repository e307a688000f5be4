use core::str::FromStr;

use serde::{Deserialize, Serialize};

use printshop_core::{DomainError, Price, ProductId};

/// Printmaking technique; the gallery's category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Etching,
    Engraving,
    Mezzotint,
    Aquatint,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Etching,
        Category::Engraving,
        Category::Mezzotint,
        Category::Aquatint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Etching => "etching",
            Category::Engraving => "engraving",
            Category::Mezzotint => "mezzotint",
            Category::Aquatint => "aquatint",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "etching" => Ok(Category::Etching),
            "engraving" => Ok(Category::Engraving),
            "mezzotint" => Ok(Category::Mezzotint),
            "aquatint" => Ok(Category::Aquatint),
            other => Err(DomainError::validation(format!("unknown category '{other}'"))),
        }
    }
}

/// Where a product in the merged view comes from.
///
/// Derived from layer membership, never stored on the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Pristine catalog record.
    Original,
    /// Added at runtime by a visitor.
    Uploaded,
    /// Catalog record overridden at runtime.
    Edited,
}

/// A limited-edition print offered in the gallery.
///
/// Serialized with camelCase keys; this is the shape persisted under the
/// `uploadedProducts` and `editedOriginalProducts` keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub artist: String,
    pub price: Price,
    /// Pre-discount price, shown struck through next to `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// URL or inline `data:` URI.
    pub image: String,
    pub category: Category,
    pub size: String,
    pub year: i32,
    pub description: String,
    pub edition: String,
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Product {
    pub fn is_featured(&self) -> bool {
        self.featured.unwrap_or(false)
    }

    /// True when a higher pre-discount price is advertised.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|p| p.amount() > self.price.amount())
    }

    /// Check the fields every stored product must carry.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::invalid_id("product id cannot be empty"));
        }
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if self.artist.trim().is_empty() {
            return Err(DomainError::validation("artist cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn print(id: &str, price: f64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Print {id}"),
            artist: "Anonymous".to_string(),
            price: Price::new(price).unwrap(),
            original_price: None,
            image: format!("https://prints.example/{id}.jpg"),
            category: Category::Etching,
            size: "30 x 40 cm".to_string(),
            year: 2020,
            description: "Test print".to_string(),
            edition: "1/10".to_string(),
            in_stock: true,
            featured: None,
        }
    }
}
