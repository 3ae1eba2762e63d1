//! Customers domain module.
//!
//! Customer records and the in-memory directory they are selected from,
//! implemented purely as deterministic domain logic (no IO, no prompts,
//! no storage). Records are read-only for the ordering workflow.

pub mod customer;
pub mod directory;

pub use customer::Customer;
pub use directory::CustomerDirectory;
