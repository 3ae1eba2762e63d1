use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use orderdesk_catalog::Product;
use orderdesk_core::{CustomerId, Money, OrderId, Upc};
use orderdesk_customers::Customer;
use orderdesk_orders::DraftOrder;

/// Persisted order row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub clerk: String,
    pub opened_at: DateTime<Utc>,
    pub total: Money,
}

/// Persisted order-line row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub order_id: OrderId,
    pub line_no: u32,
    pub upc: Upc,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub subtotal: Money,
}

/// New stock count for a product touched during the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub upc: Upc,
    pub units_in_stock: u32,
}

/// Record store operation error.
///
/// These are **infrastructure errors**; they are fatal to a session.
/// A failure inside a save batch is reported for the whole transaction,
/// never masked per record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A table lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// The save batch referenced unknown records or an unfinalized order.
    #[error("invalid save: {0}")]
    InvalidSave(String),

    /// Seed data referenced duplicate keys.
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    /// Seed document could not be parsed.
    #[error("malformed seed document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// External collaborator contract for bulk record IO.
///
/// Loads happen once at session start; the single `save_order` call is the
/// commit point of the session-spanning transaction. Everything in one save
/// — the order row, its line rows, and the touched products' stock counts —
/// is persisted together or not at all.
pub trait RecordStore {
    fn load_customers(&self) -> Result<Vec<Customer>, StoreError>;

    fn load_products(&self) -> Result<Vec<Product>, StoreError>;

    /// Atomically persist a committed draft order, its lines, and the given
    /// stock updates.
    fn save_order(
        &self,
        order: &DraftOrder,
        stock_updates: &[StockUpdate],
    ) -> Result<(), StoreError>;
}
