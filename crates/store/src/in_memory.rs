use std::collections::HashMap;
use std::sync::RwLock;

use orderdesk_catalog::Product;
use orderdesk_core::{CustomerId, OrderId, Upc};
use orderdesk_customers::Customer;
use orderdesk_orders::{DraftOrder, OrderStatus};

use crate::gateway::{LineRecord, OrderRecord, RecordStore, StockUpdate, StoreError};
use crate::seed::Seed;

#[derive(Debug, Default)]
struct Tables {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<Upc, Product>,
    orders: HashMap<OrderId, OrderRecord>,
    lines: Vec<LineRecord>,
}

/// In-memory record store.
///
/// Intended for tests/dev and the single-process CLI. The whole save batch
/// is validated before any table is touched, so a rejected save leaves no
/// partial rows behind.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated from a seed document.
    pub fn from_seed(seed: Seed) -> Result<Self, StoreError> {
        let mut tables = Tables::default();
        for product in seed.products {
            let upc = product.upc().clone();
            if tables.products.insert(upc.clone(), product).is_some() {
                return Err(StoreError::InvalidSeed(format!("duplicate product UPC {upc}")));
            }
        }
        for customer in seed.customers {
            let id = customer.id_typed();
            if tables.customers.insert(id, customer).is_some() {
                return Err(StoreError::InvalidSeed(format!("duplicate customer id {id}")));
            }
        }
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// Number of persisted orders.
    pub fn order_count(&self) -> usize {
        self.tables.read().map(|t| t.orders.len()).unwrap_or(0)
    }

    /// A persisted order row, if present.
    pub fn order(&self, order_id: OrderId) -> Option<OrderRecord> {
        self.tables
            .read()
            .ok()
            .and_then(|t| t.orders.get(&order_id).cloned())
    }

    /// Persisted line rows for an order, in line number order.
    pub fn lines_for(&self, order_id: OrderId) -> Vec<LineRecord> {
        let Ok(tables) = self.tables.read() else {
            return Vec::new();
        };
        let mut lines: Vec<LineRecord> = tables
            .lines
            .iter()
            .filter(|l| l.order_id == order_id)
            .cloned()
            .collect();
        lines.sort_by_key(|l| l.line_no);
        lines
    }

    /// Persisted stock count for a product.
    pub fn product_stock(&self, upc: &Upc) -> Option<u32> {
        self.tables
            .read()
            .ok()
            .and_then(|t| t.products.get(upc).map(Product::units_in_stock))
    }
}

impl RecordStore for InMemoryStore {
    fn load_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.customers.values().cloned().collect())
    }

    fn load_products(&self) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.products.values().cloned().collect())
    }

    fn save_order(
        &self,
        order: &DraftOrder,
        stock_updates: &[StockUpdate],
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;

        // Validate the entire batch before mutating anything.
        if order.status() != OrderStatus::Committed {
            return Err(StoreError::InvalidSave(format!(
                "order {} is not committed",
                order.id_typed()
            )));
        }
        let customer_id = order.customer_id().ok_or_else(|| {
            StoreError::InvalidSave(format!("order {} has no customer", order.id_typed()))
        })?;
        if !tables.customers.contains_key(&customer_id) {
            return Err(StoreError::InvalidSave(format!(
                "order {} references unknown customer {customer_id}",
                order.id_typed()
            )));
        }
        if tables.orders.contains_key(&order.id_typed()) {
            return Err(StoreError::InvalidSave(format!(
                "order {} already persisted",
                order.id_typed()
            )));
        }
        for line in order.lines() {
            if !tables.products.contains_key(&line.upc) {
                return Err(StoreError::InvalidSave(format!(
                    "line {} references unknown product {}",
                    line.line_no, line.upc
                )));
            }
        }
        // Stock only ever decreases during a session, so each update must
        // carry a count at or below the stored one.
        let mut stock_deltas = Vec::with_capacity(stock_updates.len());
        for update in stock_updates {
            let current = tables
                .products
                .get(&update.upc)
                .map(Product::units_in_stock)
                .ok_or_else(|| {
                    StoreError::InvalidSave(format!(
                        "stock update references unknown product {}",
                        update.upc
                    ))
                })?;
            if update.units_in_stock > current {
                return Err(StoreError::InvalidSave(format!(
                    "stock update for {} raises the count ({} -> {})",
                    update.upc, current, update.units_in_stock
                )));
            }
            stock_deltas.push((update.upc.clone(), current - update.units_in_stock));
        }

        // Validation passed; mutate.
        for (upc, delta) in stock_deltas {
            if let Some(product) = tables.products.get_mut(&upc) {
                product
                    .take_stock(delta)
                    .map_err(|e| StoreError::InvalidSave(format!("stock update for {upc}: {e}")))?;
            }
        }

        let record = OrderRecord {
            order_id: order.id_typed(),
            customer_id,
            clerk: order.clerk().to_string(),
            opened_at: order.opened_at().unwrap_or_default(),
            total: order.total(),
        };
        tracing::debug!(order_id = %record.order_id, "persisting order");
        tables.orders.insert(record.order_id, record);

        for line in order.lines() {
            tracing::debug!(
                order_id = %order.id_typed(),
                line_no = line.line_no,
                upc = %line.upc,
                "persisting order line"
            );
            tables.lines.push(LineRecord {
                order_id: order.id_typed(),
                line_no: line.line_no,
                upc: line.upc.clone(),
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal: line.subtotal,
            });
        }

        tracing::info!(
            order_id = %order.id_typed(),
            total = %order.total(),
            lines = order.lines().len(),
            "order committed"
        );
        Ok(())
    }
}
