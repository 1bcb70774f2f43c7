//! Read client for the published archive
//!
//! The read side mirrors the persisted store layout over a raw-file HTTP
//! base URL: daily and latest payloads by date, yearly history by year, and
//! the date index. A 404 means no data was published for that path, which is
//! a user-visible empty state rather than a failure.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Error types for archive reads
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("no data published for {0}")]
    NotFound(String),
    #[error("HTTP request error: {0}")]
    Request(String),
    #[error("HTTP status error: {0} - {1}")]
    Status(u16, String),
    #[error("JSON error: {0}")]
    Json(String),
}

/// Client reading raw payloads back out of the published store
pub struct ArchiveClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ArchiveClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    async fn get_json(&self, path: &str, what: &str) -> Result<Value, ArchiveError> {
        let url = format!("{}/{}", self.base_url, path);

        debug!("Fetching archive payload from: {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ArchiveError::Request(format!("Failed to send HTTP request: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ArchiveError::NotFound(what.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ArchiveError::Status(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| ArchiveError::Json(format!("Failed to parse payload: {}", e)))
    }

    /// Raw intraday series payload for a date
    pub async fn fetch_daily(&self, date: NaiveDate) -> Result<Value, ArchiveError> {
        let path = format!(
            "{:04}/{:02}/{:02}.json",
            date.year(),
            date.month(),
            date.day()
        );
        self.get_json(&path, &date.to_string()).await
    }

    /// Raw latest-snapshot payload for a date
    pub async fn fetch_latest(&self, date: NaiveDate) -> Result<Value, ArchiveError> {
        let path = format!(
            "{:04}/{:02}/{:02}-latest.json",
            date.year(),
            date.month(),
            date.day()
        );
        self.get_json(&path, &format!("{} (latest)", date)).await
    }

    /// Raw full-year history payload
    pub async fn fetch_yearly(&self, year: i32) -> Result<Value, ArchiveError> {
        let path = format!("yearly/{:04}.json", year);
        self.get_json(&path, &year.to_string()).await
    }

    /// Daily series and latest snapshot for a date, fetched concurrently.
    /// The two reads are independent and share no mutable state.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<(Value, Value), ArchiveError> {
        tokio::try_join!(self.fetch_daily(date), self.fetch_latest(date))
    }

    /// The published date index, sorted ascending
    pub async fn fetch_dates(&self) -> Result<Vec<String>, ArchiveError> {
        let payload = self.get_json("available-dates.json", "date index").await?;
        let mut dates: Vec<String> = serde_json::from_value(payload)
            .map_err(|e| ArchiveError::Json(format!("Failed to parse date index: {}", e)))?;
        dates.sort();
        dates.dedup();
        Ok(dates)
    }
}
