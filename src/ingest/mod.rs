//! Ingestion run: fetch, persist, index
//!
//! One run covers one calendar date. All three upstream payloads must fetch
//! successfully before anything is written, and all three writes must land
//! before the date enters the index, so a failed run never leaves the index
//! pointing at missing data. Re-running the same date overwrites the same
//! files, which is idempotent by construction.

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::dates::record_date;
use crate::store::FileStore;
use crate::upstream::GoldApiClient;

/// Run ingestion for one date. Returns whether the date index changed.
pub async fn run(client: &GoldApiClient, store: &FileStore, date: NaiveDate) -> Result<bool> {
    info!("Starting ingestion run for {}", date);

    // Fetch everything before writing anything. A failure here aborts the
    // run with the store untouched.
    info!("Fetching today prices...");
    let today = client
        .today_prices()
        .await
        .context("Failed to fetch intraday series")?;

    info!("Fetching latest price...");
    let latest = client
        .latest_price()
        .await
        .context("Failed to fetch latest snapshot")?;

    info!("Fetching history prices...");
    let history = client
        .history_prices("y")
        .await
        .context("Failed to fetch yearly history")?;

    store.write_json(&store.daily_path(date), &today)?;
    store.write_json(&store.latest_path(date), &latest)?;
    store.write_json(&store.yearly_path(date.year()), &history)?;

    let mut index = store.load_index()?;
    let changed = record_date(&mut index, &date.to_string());
    if changed {
        store.save_index(&index)?;
        info!("Date index updated: {} dates", index.len());
    } else {
        warn!("Date {} already indexed, skipping index write", date);
    }

    info!("Ingestion run for {} completed", date);
    Ok(changed)
}
