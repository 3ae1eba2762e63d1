use std::collections::HashMap;

use orderdesk_core::{DomainError, DomainResult, Upc};

use crate::product::Product;

/// In-memory collection of products, keyed by UPC.
///
/// UPCs are unique, so keyed lookup preserves the first-and-only-match
/// semantics of a linear scan while staying O(1). Listings are UPC-sorted
/// so prompt output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<Upc, Product>,
}

impl Catalog {
    /// Build a catalog from loaded product records.
    ///
    /// Duplicate UPCs are a load-time validation failure, not a
    /// last-write-wins surprise.
    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut map = HashMap::with_capacity(products.len());
        for product in products {
            let upc = product.upc().clone();
            if map.insert(upc.clone(), product).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate UPC in catalog: {upc}"
                )));
            }
        }
        Ok(Self { products: map })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by UPC.
    pub fn get(&self, upc: &Upc) -> Option<&Product> {
        self.products.get(upc)
    }

    /// Current stock count for a UPC, if the product exists.
    pub fn stock_of(&self, upc: &Upc) -> Option<u32> {
        self.products.get(upc).map(Product::units_in_stock)
    }

    /// Remove `quantity` units from a product's stock.
    ///
    /// Called only once a line addition has been confirmed — never
    /// speculatively while a quantity is still being negotiated at the
    /// prompt. Returns the remaining units.
    pub fn take_stock(&mut self, upc: &Upc, quantity: u32) -> DomainResult<u32> {
        let product = self
            .products
            .get_mut(upc)
            .ok_or_else(|| DomainError::not_found(format!("product {upc}")))?;
        product.take_stock(quantity)
    }

    /// All products, UPC-sorted, for catalog listings.
    pub fn products(&self) -> Vec<&Product> {
        let mut listing: Vec<&Product> = self.products.values().collect();
        listing.sort_by(|a, b| a.upc().cmp(b.upc()));
        listing
    }
}
