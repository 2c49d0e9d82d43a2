//! Long-running background task that polls the Soroban RPC and writes
//! decoded escrow events to the database.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::db;
use crate::rpc;

pub struct IndexerState {
    pub pool: SqlitePool,
    pub config: Config,
    pub client: Client,
}

/// Spawn the indexer loop as a background [`tokio`] task.
pub async fn run(state: Arc<IndexerState>) {
    info!(contract = %state.config.contract_id, "Indexer starting");

    // Load the cursor from the DB; fall back to config start_ledger.
    let last_ledger = db::get_last_ledger(&state.pool).await.unwrap_or_else(|e| {
        warn!("Could not read saved ledger, starting fresh: {e}");
        0
    });
    let mut cursor = db::get_cursor_string(&state.pool).await.unwrap_or_else(|e| {
        warn!("Could not read saved cursor: {e}");
        None
    });
    let mut current_ledger = resume_ledger(last_ledger, state.config.start_ledger);

    info!("Resuming from ledger {current_ledger}");

    loop {
        match poll_once(
            &state.pool,
            &state.client,
            &state.config,
            current_ledger,
            cursor.as_deref(),
        )
        .await
        {
            Ok((next_ledger, next_cursor)) => {
                current_ledger = next_ledger;
                cursor = next_cursor;
            }
            Err(e) => {
                error!("Indexer poll error: {e}");
            }
        }

        tokio::time::sleep(Duration::from_secs(state.config.poll_interval_secs)).await;
    }
}

/// Perform a single poll iteration.
///
/// Returns `(next_start_ledger, next_cursor)`.
async fn poll_once(
    pool: &SqlitePool,
    client: &Client,
    config: &Config,
    start_ledger: u32,
    cursor: Option<&str>,
) -> crate::errors::Result<(u32, Option<String>)> {
    let (raw_events, next_cursor, latest_ledger) = rpc::fetch_events(
        client,
        &config.rpc_url,
        &config.contract_id,
        start_ledger,
        cursor,
        config.events_per_page,
    )
    .await?;

    if !raw_events.is_empty() {
        let decoded = rpc::decode_events(&raw_events, &config.contract_id);
        let inserted = db::insert_events(pool, &decoded).await?;
        info!(
            raw = raw_events.len(),
            decoded = decoded.len(),
            inserted,
            "Stored escrow events"
        );
    }

    // Advance the ledger cursor:
    // - If there is a next_cursor string, keep the same start_ledger so the next
    //   call paginates within the same ledger range.
    // - Otherwise advance to the latest known ledger.
    let next_ledger = advance_ledger(start_ledger, latest_ledger);

    // Persist cursor so restarts are deterministic.
    db::save_cursor(pool, next_ledger as i64, next_cursor.as_deref()).await?;

    Ok((next_ledger, next_cursor))
}

/// Ledger to resume from: the saved one if any, otherwise the configured start.
fn resume_ledger(saved: i64, configured: u32) -> u32 {
    match u32::try_from(saved) {
        Ok(ledger) if ledger > 0 => ledger,
        _ => configured,
    }
}

/// Never move the scan window backwards, even if the RPC reports an older
/// latest ledger than the one already scanned.
fn advance_ledger(start_ledger: u32, latest_ledger: Option<u64>) -> u32 {
    latest_ledger
        .map(|l| u32::try_from(l).unwrap_or(u32::MAX).max(start_ledger))
        .unwrap_or(start_ledger)
}
