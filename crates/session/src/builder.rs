//! The shopping loop.
//!
//! Repeats: pick a product, pick a quantity, price the line, confirm it.
//! The draft and the catalog are mutated only when a line is confirmed —
//! a declined line leaves total, lines, and stock exactly as they were.
//! The loop has no iteration bound; it ends only on an explicit "no" to
//! the continue question.

use chrono::Utc;

use orderdesk_catalog::Catalog;
use orderdesk_core::{Aggregate, DomainError};
use orderdesk_orders::{AddLine, DraftOrder, OrderCommand, OrderEvent};

use crate::console::Console;
use crate::error::SessionResult;
use crate::limits::RetryLimit;
use crate::prompts::{ask_yes_no, select_product, select_quantity};

/// Run the product-selection loop against a draft order.
pub fn build_order<C: Console>(
    draft: &mut DraftOrder,
    catalog: &mut Catalog,
    console: &mut C,
    limit: RetryLimit,
) -> SessionResult<()> {
    loop {
        let upc = select_product(catalog, console, limit)?;
        let (quantity, cmd) = {
            let product = catalog
                .get(&upc)
                .ok_or_else(|| DomainError::not_found(format!("product {upc}")))?;
            console.say(&product.to_string())?;
            let quantity = select_quantity(product, console, limit)?;
            let cmd = AddLine {
                order_id: draft.id_typed(),
                upc: upc.clone(),
                product_name: product.name().to_string(),
                quantity,
                unit_price: product.list_price(),
                available_stock: product.units_in_stock(),
                occurred_at: Utc::now(),
            };
            (quantity, cmd)
        };

        // The quantity was validated against the same stock snapshot the
        // command carries, so a rejection here is a programming error, not
        // a user mistake — let it end the session.
        let events = draft.handle(&OrderCommand::AddLine(cmd))?;
        let subtotal = events
            .iter()
            .find_map(|e| match e {
                OrderEvent::LineAdded(line) => Some(line.subtotal),
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant("line decision produced no line"))?;

        console.say(&format!("Total price: {subtotal}"))?;

        if ask_yes_no(console, limit, "Add product? (Y/N)")? {
            for event in &events {
                draft.apply(event);
            }
            catalog.take_stock(&upc, quantity)?;
            tracing::debug!(
                order_id = %draft.id_typed(),
                upc = %upc,
                quantity,
                total = %draft.total(),
                "line confirmed"
            );
            console.say("Product added")?;
        } else {
            console.say("Product not added")?;
        }

        if !ask_yes_no(console, limit, "Add another product to the order? (Y/N)")? {
            return Ok(());
        }
    }
}
