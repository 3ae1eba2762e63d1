//! Session orchestration: load records, select a customer, build the order,
//! confirm or abort.

use chrono::Utc;

use orderdesk_catalog::Catalog;
use orderdesk_core::{Aggregate, DomainError, Money, OrderId};
use orderdesk_customers::CustomerDirectory;
use orderdesk_orders::{DraftOrder, OpenOrder, OrderCommand};
use orderdesk_store::RecordStore;

use crate::builder::build_order;
use crate::console::Console;
use crate::error::SessionResult;
use crate::gate::{confirm_purchase, Decision};
use crate::limits::RetryLimit;
use crate::prompts::select_customer;

/// Session-level configuration, resolved by the caller (env vars in the
/// CLI, literals in tests).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Salesperson identity recorded on the order.
    pub clerk: String,
    /// Retry budget for every prompt loop.
    pub retry_limit: RetryLimit,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            clerk: "counter".to_string(),
            retry_limit: RetryLimit::Unbounded,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The purchase was committed and persisted.
    Committed {
        order_id: OrderId,
        total: Money,
        lines: usize,
    },
    /// The purchase was aborted at the final gate; nothing was persisted.
    Aborted { order_id: OrderId },
}

/// Run one complete interactive ordering session.
///
/// Loads customer and product records from the store, resolves a customer,
/// opens a draft order, runs the shopping loop, and passes the draft
/// through the final confirmation gate. Store failures are fatal and leave
/// nothing committed.
pub fn run_session<S: RecordStore, C: Console>(
    store: &S,
    console: &mut C,
    config: &SessionConfig,
) -> SessionResult<SessionOutcome> {
    let directory = CustomerDirectory::from_customers(store.load_customers()?)?;
    let mut catalog = Catalog::from_products(store.load_products()?)?;
    if directory.is_empty() {
        return Err(DomainError::validation("no customers loaded").into());
    }
    if catalog.is_empty() {
        return Err(DomainError::validation("no products loaded").into());
    }
    tracing::info!(
        customers = directory.len(),
        products = catalog.len(),
        "session records loaded"
    );

    let customer_id = select_customer(&directory, console, config.retry_limit)?;

    let order_id = OrderId::new();
    let mut draft = DraftOrder::empty(order_id);
    let events = draft.handle(&OrderCommand::OpenOrder(OpenOrder {
        order_id,
        customer_id,
        clerk: config.clerk.clone(),
        opened_at: Utc::now(),
    }))?;
    for event in &events {
        draft.apply(event);
    }
    tracing::debug!(%order_id, %customer_id, clerk = %config.clerk, "draft order opened");

    build_order(&mut draft, &mut catalog, console, config.retry_limit)?;

    match confirm_purchase(&mut draft, &catalog, store, console, config.retry_limit)? {
        Decision::Commit => Ok(SessionOutcome::Committed {
            order_id,
            total: draft.total(),
            lines: draft.lines().len(),
        }),
        Decision::Abort => Ok(SessionOutcome::Aborted { order_id }),
    }
}
