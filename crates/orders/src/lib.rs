//! Draft-order domain module.
//!
//! This crate contains the order-building state machine, implemented purely
//! as deterministic domain logic (no IO, no prompts, no storage). Decision
//! logic lives in `handle` (stock check against the snapshot carried by the
//! command, quantity validation, line pricing); state evolution lives in
//! `apply` (append line, accumulate total). Nothing is mutated until an
//! addition has actually been confirmed.

pub mod order;

pub use order::{
    AbortOrder, AddLine, CommitOrder, DraftOrder, LineAdded, LineItem, OpenOrder, OrderAborted,
    OrderCommand, OrderCommitted, OrderEvent, OrderOpened, OrderStatus,
};
