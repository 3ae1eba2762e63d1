use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, Entity, Money, Upc};

/// A sellable product with a live stock count.
///
/// Everything except `units_in_stock` is immutable once loaded; stock only
/// ever decreases during a session, through [`Product::take_stock`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    upc: Upc,
    name: String,
    manufacturer: String,
    /// Merchandising category code (opaque to this system).
    category: String,
    list_price: Money,
    units_in_stock: u32,
}

impl Product {
    pub fn new(
        upc: Upc,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
        category: impl Into<String>,
        list_price: Money,
        units_in_stock: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        Ok(Self {
            upc,
            name,
            manufacturer: manufacturer.into(),
            category: category.into(),
            list_price,
            units_in_stock,
        })
    }

    pub fn upc(&self) -> &Upc {
        &self.upc
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn list_price(&self) -> Money {
        self.list_price
    }

    pub fn units_in_stock(&self) -> u32 {
        self.units_in_stock
    }

    /// Whether a requested quantity could currently be fulfilled.
    pub fn can_fulfill(&self, quantity: u32) -> bool {
        quantity > 0 && quantity <= self.units_in_stock
    }

    /// Remove `quantity` units from stock, returning the remaining count.
    ///
    /// Stock can never go negative: the subtraction is checked, and a
    /// request exceeding the current count is an invariant violation naming
    /// the product.
    pub fn take_stock(&mut self, quantity: u32) -> DomainResult<u32> {
        match self.units_in_stock.checked_sub(quantity) {
            Some(remaining) => {
                self.units_in_stock = remaining;
                Ok(remaining)
            }
            None => Err(DomainError::OutOfStock {
                name: self.name.clone(),
                requested: quantity,
                available: self.units_in_stock,
            }),
        }
    }
}

impl Entity for Product {
    type Id = Upc;

    fn id(&self) -> &Self::Id {
        &self.upc
    }
}

impl core::fmt::Display for Product {
    /// One catalog listing row: `UPC  name (manufacturer)  price  stock`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}  {} ({})  {}  {} in stock",
            self.upc, self.name, self.manufacturer, self.list_price, self.units_in_stock
        )
    }
}
