//! Upstream REST API client implementation

use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{HistoryRequest, UpstreamError};

/// Client for the upstream gold-price API
pub struct GoldApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl GoldApiClient {
    pub fn new(base_url: String, timeout_seconds: u64) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// POST an endpoint with an optional JSON body and return the raw payload
    async fn post(&self, endpoint: &str, body: Option<Value>) -> Result<Value, UpstreamError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        debug!("Fetching upstream payload from: {}", url);

        let mut request = self.client.post(&url).timeout(self.timeout);
        if let Some(body) = body {
            request = request.json(&body);
        } else {
            request = request.header("Content-Type", "application/json");
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Request(format!("Failed to send HTTP request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status(status, body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Json(format!("Failed to parse payload: {}", e)))?;

        info!("Successfully fetched upstream payload: {}", endpoint);
        Ok(payload)
    }

    /// Today's intraday price series
    pub async fn today_prices(&self) -> Result<Value, UpstreamError> {
        self.post("todayPrices", None).await
    }

    /// Latest single-point price snapshot
    pub async fn latest_price(&self) -> Result<Value, UpstreamError> {
        self.post("latestPrice", None).await
    }

    /// Historical price series for a period, e.g. `"y"` for one year
    pub async fn history_prices(&self, period: &str) -> Result<Value, UpstreamError> {
        let body = serde_json::to_value(HistoryRequest::new(period))
            .map_err(|e| UpstreamError::Json(e.to_string()))?;
        self.post("historyPrices", Some(body)).await
    }
}
