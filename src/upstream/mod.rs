//! Upstream gold-price API integration module
//!
//! POST JSON endpoints serving today's intraday series, the latest price
//! snapshot, and full-year history. Payloads are treated as opaque values
//! here; decoding happens on the read side.

pub mod rest;
pub mod types;

// Re-export commonly used types
pub use rest::GoldApiClient;
pub use types::*;
