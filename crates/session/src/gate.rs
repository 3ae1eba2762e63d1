//! Final confirmation gate.
//!
//! One yes/no decision over the whole draft: commit it (atomic bulk save of
//! the order, its lines, and the touched stock counts) or abort it (the
//! draft is discarded in memory). Stock taken by already-confirmed lines is
//! not restored on abort; those units stay reserved for the session.

use std::collections::BTreeMap;

use chrono::Utc;

use orderdesk_catalog::Catalog;
use orderdesk_core::Aggregate;
use orderdesk_orders::{AbortOrder, CommitOrder, DraftOrder, OrderCommand};
use orderdesk_store::{RecordStore, StockUpdate};

use crate::console::Console;
use crate::error::SessionResult;
use crate::limits::RetryLimit;
use crate::prompts::ask_yes_no;

/// Outcome of the final confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Commit,
    Abort,
}

/// Ask once whether to finalize the purchase, then commit or abort.
pub fn confirm_purchase<C: Console, S: RecordStore>(
    draft: &mut DraftOrder,
    catalog: &Catalog,
    store: &S,
    console: &mut C,
    limit: RetryLimit,
) -> SessionResult<Decision> {
    if ask_yes_no(console, limit, "Confirm purchase? (Y/N)")? {
        let events = draft.handle(&OrderCommand::CommitOrder(CommitOrder {
            order_id: draft.id_typed(),
            occurred_at: Utc::now(),
        }))?;
        for event in &events {
            draft.apply(event);
        }

        let updates = stock_updates_for(draft, catalog);
        store.save_order(draft, &updates)?;

        tracing::info!(order_id = %draft.id_typed(), total = %draft.total(), "purchase committed");
        console.say(&format!(
            "Completed satisfactorily. Order total: {}",
            draft.total()
        ))?;
        Ok(Decision::Commit)
    } else {
        let events = draft.handle(&OrderCommand::AbortOrder(AbortOrder {
            order_id: draft.id_typed(),
            occurred_at: Utc::now(),
        }))?;
        for event in &events {
            draft.apply(event);
        }

        tracing::info!(order_id = %draft.id_typed(), "purchase aborted");
        console.say("Purchase aborted")?;
        Ok(Decision::Abort)
    }
}

/// Post-session stock counts for every product the draft touched.
fn stock_updates_for(draft: &DraftOrder, catalog: &Catalog) -> Vec<StockUpdate> {
    let mut counts = BTreeMap::new();
    for line in draft.lines() {
        if let Some(stock) = catalog.stock_of(&line.upc) {
            counts.insert(line.upc.clone(), stock);
        }
    }
    counts
        .into_iter()
        .map(|(upc, units_in_stock)| StockUpdate {
            upc,
            units_in_stock,
        })
        .collect()
}
