//! Upstream API request types and errors

use serde::Serialize;

/// Request body for the history endpoint, `{"reqData":{"period":"y"}}`
#[derive(Debug, Serialize)]
pub struct HistoryRequest {
    #[serde(rename = "reqData")]
    pub req_data: HistoryPeriod,
}

#[derive(Debug, Serialize)]
pub struct HistoryPeriod {
    pub period: String,
}

impl HistoryRequest {
    pub fn new(period: &str) -> Self {
        Self {
            req_data: HistoryPeriod {
                period: period.to_string(),
            },
        }
    }
}

/// Error types for upstream API operations
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("HTTP request error: {0}")]
    Request(String),
    #[error("HTTP status error: {0} - {1}")]
    Status(u16, String),
    #[error("JSON error: {0}")]
    Json(String),
}
