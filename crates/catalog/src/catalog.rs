//! The immutable, build-time product catalog.

use std::collections::HashSet;
use std::sync::Arc;

use printshop_core::{DomainError, DomainResult, Price, ProductId};

use crate::product::{Category, Product};

/// Ordered baseline products, fixed for the life of the process.
///
/// Cheap to clone (shared slice).
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Arc<[Product]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and invalid records.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !seen.insert(product.id.clone()) {
                return Err(DomainError::conflict(format!(
                    "duplicate catalog id '{}'",
                    product.id
                )));
            }
        }
        Ok(Self {
            products: products.into(),
        })
    }

    pub fn empty() -> Self {
        Self {
            products: Arc::from(Vec::new()),
        }
    }

    /// The prints shipped with the storefront.
    pub fn builtin() -> Self {
        let products = vec![
            print(
                "1",
                "Thames Barges at Low Tide",
                "Eleanor Whitcombe",
                450,
                None,
                Category::Etching,
                "32 x 45 cm",
                1998,
                "Hard-ground etching printed on Hahnemühle cotton rag.",
                "12/50",
                true,
                Some(true),
            ),
            print(
                "2",
                "The Cartographer's Study",
                "Jonas Lindqvist",
                680,
                Some(850),
                Category::Engraving,
                "40 x 30 cm",
                2004,
                "Burin engraving on copper, hand-wiped and printed by the artist.",
                "3/25",
                true,
                Some(true),
            ),
            print(
                "3",
                "Pear on a Dark Ground",
                "Mariko Sato",
                920,
                None,
                Category::Mezzotint,
                "25 x 25 cm",
                2011,
                "Rocked mezzotint ground burnished back to a single pear.",
                "7/30",
                true,
                None,
            ),
            print(
                "4",
                "Salt Marsh, Morning",
                "Eleanor Whitcombe",
                390,
                None,
                Category::Aquatint,
                "30 x 50 cm",
                2015,
                "Sugar-lift aquatint in three tones of grey.",
                "18/40",
                true,
                None,
            ),
            print(
                "5",
                "Cathedral Nave",
                "Henri Duval",
                1250,
                None,
                Category::Engraving,
                "55 x 38 cm",
                1987,
                "Line engraving after the artist's own drawing of Amiens.",
                "2/15",
                false,
                Some(true),
            ),
            print(
                "6",
                "Three Shells",
                "Mariko Sato",
                540,
                Some(600),
                Category::Mezzotint,
                "20 x 30 cm",
                2019,
                "Colour mezzotint printed à la poupée from a single plate.",
                "11/35",
                true,
                None,
            ),
            print(
                "7",
                "Orchard Wall",
                "Tomasz Nowak",
                310,
                None,
                Category::Etching,
                "24 x 32 cm",
                2021,
                "Soft-ground etching with drypoint additions.",
                "21/60",
                true,
                None,
            ),
            print(
                "8",
                "Fog over the Fjord",
                "Jonas Lindqvist",
                470,
                None,
                Category::Aquatint,
                "35 x 50 cm",
                2008,
                "Spit-bite aquatint on zinc.",
                "9/30",
                true,
                None,
            ),
        ];

        Self {
            products: products.into(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[allow(clippy::too_many_arguments)]
fn print(
    id: &str,
    title: &str,
    artist: &str,
    price: u32,
    original_price: Option<u32>,
    category: Category,
    size: &str,
    year: i32,
    description: &str,
    edition: &str,
    in_stock: bool,
    featured: Option<bool>,
) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        artist: artist.to_string(),
        price: Price::from_whole(price),
        original_price: original_price.map(Price::from_whole),
        image: format!("/images/prints/{id}.jpg"),
        category,
        size: size.to_string(),
        year,
        description: description.to_string(),
        edition: edition.to_string(),
        in_stock,
        featured,
    }
}
