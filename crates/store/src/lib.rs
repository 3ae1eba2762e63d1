//! Record store — the persistence boundary of the ordering workflow.
//!
//! The workflow loads customer and product records once at session start and
//! hands a finalized order back for one atomic bulk save at the end. This
//! crate defines that contract ([`RecordStore`]) and an in-memory
//! implementation of it.

pub mod gateway;
pub mod in_memory;
pub mod seed;

pub use gateway::{LineRecord, OrderRecord, RecordStore, StockUpdate, StoreError};
pub use in_memory::InMemoryStore;
pub use seed::Seed;
