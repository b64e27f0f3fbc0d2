//! Long-running background task that polls the Soroban RPC and writes
//! decoded escrow events to the database.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tracing::{error, info};

use crate::config::Config;
use crate::db::{self, Cursor};
use crate::decode;
use crate::errors::Result;
use crate::rpc::{EventsPage, RpcClient};

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub rpc: RpcClient,
}

/// Run the indexer loop forever; spawn it as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!("Indexer starting, contract: {}", state.rpc.contract_id());

    let mut cursor = match db::load_cursor(&state.pool).await {
        Ok(saved) => resume_from(saved, state.config.start_ledger),
        Err(e) => {
            error!("Could not read saved cursor, starting fresh: {e}");
            resume_from(Cursor::default(), state.config.start_ledger)
        }
    };
    info!("Resuming from ledger {}", cursor.last_ledger);

    loop {
        match poll_once(&state, &cursor).await {
            Ok(next) => cursor = next,
            Err(e) => error!("Indexer poll error: {e}"),
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// A saved ledger wins over the configured start ledger.
fn resume_from(saved: Cursor, start_ledger: u32) -> Cursor {
    if saved.last_ledger > 0 {
        saved
    } else {
        Cursor {
            last_ledger: start_ledger as i64,
            last_cursor: saved.last_cursor,
        }
    }
}

/// Perform a single poll iteration and return the cursor to use next.
async fn poll_once(state: &IndexerState, cursor: &Cursor) -> Result<Cursor> {
    let page = state
        .rpc
        .fetch_events(
            cursor.last_ledger as u32,
            cursor.last_cursor.as_deref(),
            state.config.events_per_page,
        )
        .await?;

    if !page.events.is_empty() {
        let decoded = decode::decode_events(&page.events, state.rpc.contract_id());
        let inserted = db::insert_events(&state.pool, &decoded).await?;
        info!(
            "Polled {} raw events → {} new records stored",
            page.events.len(),
            inserted
        );
    }

    let next = advance(cursor, &page);
    // Persist so restarts are deterministic.
    db::save_cursor(&state.pool, &next).await?;
    Ok(next)
}

/// Compute the next cursor from a fetched page.
///
/// The pagination cursor, when present, keeps paging within the current
/// range; the ledger only moves forward to the latest known ledger.
fn advance(current: &Cursor, page: &EventsPage) -> Cursor {
    let last_ledger = page
        .latest_ledger
        .map(|l| (l as i64).max(current.last_ledger))
        .unwrap_or(current.last_ledger);

    Cursor {
        last_ledger,
        last_cursor: page.cursor.clone().or_else(|| current.last_cursor.clone()),
    }
}
