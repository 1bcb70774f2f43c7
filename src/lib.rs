//! Goldtrack Library
//!
//! Retrieves and persists gold-price time series into a date-partitioned
//! JSON store, and reads them back as normalized series with derived
//! statistics and date navigation.

pub mod archive;
pub mod cli;
pub mod config;
pub mod dates;
pub mod ingest;
pub mod series;
pub mod store;
pub mod upstream;
pub mod view;

use anyhow::Result;

/// Application result type for consistent error handling
pub type AppResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Initialize tracing subscriber for logging
pub fn init_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("goldtrack={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}
