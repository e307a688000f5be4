//! Gallery query: text search, category filter and sort over the merged list.
//!
//! Stateless; recomputed whenever the visitor changes a control.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use printshop_core::DomainError;

use crate::product::{Category, Product};

/// Category selector; `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    #[default]
    All,
    #[serde(untagged)]
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Gallery sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured prints first; otherwise the merged order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Newest first.
    Year,
    Artist,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Year => "year",
            SortKey::Artist => "artist",
        }
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "featured" => Ok(SortKey::Featured),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "year" => Ok(SortKey::Year),
            "artist" => Ok(SortKey::Artist),
            other => Err(DomainError::validation(format!("unknown sort key '{other}'"))),
        }
    }
}

/// The three UI-held gallery controls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GalleryQuery {
    pub text: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl GalleryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Case-insensitive substring match on title, artist and category.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.matches(product.category) {
            return false;
        }
        let needle = self.text.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        product.title.to_lowercase().contains(&needle)
            || product.artist.to_lowercase().contains(&needle)
            || product.category.as_str().contains(&needle)
    }

    /// Filter then sort. All sorts are stable.
    pub fn run(&self, products: &[Product]) -> GalleryView {
        let mut selected: Vec<Product> =
            products.iter().filter(|p| self.matches(p)).cloned().collect();

        match self.sort {
            SortKey::Featured => selected.sort_by_key(|p| !p.is_featured()),
            SortKey::PriceLow => selected.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortKey::PriceHigh => selected.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortKey::Year => selected.sort_by(|a, b| b.year.cmp(&a.year)),
            SortKey::Artist => {
                selected.sort_by(|a, b| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()))
            }
        }

        GalleryView {
            products: selected,
            total: products.len(),
            query: self.clone(),
        }
    }
}

/// Result of a gallery query.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryView {
    pub products: Vec<Product>,
    /// Size of the unfiltered list.
    pub total: usize,
    pub query: GalleryQuery,
}

impl GalleryView {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// e.g. `Showing 2 of 9 prints for "sato" in mezzotint`.
    pub fn summary(&self) -> String {
        let mut line = format!("Showing {} of {} prints", self.products.len(), self.total);
        if !self.query.text.is_empty() {
            line.push_str(&format!(" for \"{}\"", self.query.text));
        }
        if let CategoryFilter::Only(category) = self.query.category {
            line.push_str(&format!(" in {category}"));
        }
        line
    }
}
