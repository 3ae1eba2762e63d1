//! Interactive order-entry CLI.
//!
//! Configuration comes from the environment:
//! - `ORDERDESK_CLERK`: salesperson identity recorded on orders.
//! - `ORDERDESK_SEED`: path to a JSON seed document; without it a built-in
//!   demo catalog is loaded.
//! - `ORDERDESK_MAX_ATTEMPTS`: cap on invalid answers per prompt (0 or
//!   unset: unbounded).

use anyhow::Context;

use orderdesk_session::{run_session, RetryLimit, SessionConfig, SessionOutcome, StdConsole};
use orderdesk_store::{InMemoryStore, Seed};

const DEFAULT_SEED: &str = include_str!("default_seed.json");

fn main() -> anyhow::Result<()> {
    orderdesk_observability::init();

    let clerk = std::env::var("ORDERDESK_CLERK").unwrap_or_else(|_| {
        tracing::warn!("ORDERDESK_CLERK not set; using default clerk identity");
        "counter".to_string()
    });

    let retry_limit = match std::env::var("ORDERDESK_MAX_ATTEMPTS") {
        Ok(raw) => {
            let max: u32 = raw
                .parse()
                .context("ORDERDESK_MAX_ATTEMPTS must be a whole number")?;
            if max == 0 {
                RetryLimit::Unbounded
            } else {
                RetryLimit::Max(max)
            }
        }
        Err(_) => RetryLimit::Unbounded,
    };

    let seed_json = match std::env::var("ORDERDESK_SEED") {
        Ok(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading seed file {path}"))?,
        Err(_) => DEFAULT_SEED.to_string(),
    };
    let seed = Seed::from_json(&seed_json).context("parsing seed document")?;
    let store = InMemoryStore::from_seed(seed).context("loading seed records")?;

    let mut console = StdConsole::new();
    let config = SessionConfig { clerk, retry_limit };

    match run_session(&store, &mut console, &config).context("ordering session failed")? {
        SessionOutcome::Committed {
            order_id,
            total,
            lines,
        } => {
            tracing::info!(%order_id, %total, lines, "session ended with a committed order");
        }
        SessionOutcome::Aborted { order_id } => {
            tracing::info!(%order_id, "session ended with an aborted purchase");
        }
    }

    Ok(())
}
