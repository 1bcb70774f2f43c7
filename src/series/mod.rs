//! Canonical price series and raw payload normalization
//!
//! The upstream API serves two record shapes: yearly history records
//! (`{price, time}` with an epoch-millis time string) and intraday records
//! (`{name, value}` with a `YYYY-MM-DD HH:mm:ss` name). Both normalize into
//! the same `(timestamp, price)` sequence.

pub mod stats;

pub use stats::{Reference, SeriesStats};

use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A single price observation: epoch milliseconds and a positive price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Ordered sequence of price points, ascending by timestamp
pub type PriceSeries = Vec<PricePoint>;

/// Yearly history record as served by the upstream API
#[derive(Debug, Clone, Deserialize)]
pub struct YearlyRecord {
    pub price: String,
    pub time: String,
}

/// Intraday record as served by the upstream API; `value` carries
/// `[dateOrTimeString, priceString]`
#[derive(Debug, Clone, Deserialize)]
pub struct IntradayRecord {
    pub name: String,
    pub value: (String, String),
}

/// Tagged union over the two upstream record shapes. The variant is chosen
/// by the caller through the decode entry points, never by probing fields.
#[derive(Debug, Clone)]
pub enum RawRecord {
    Yearly(YearlyRecord),
    Intraday(IntradayRecord),
}

/// Latest-price snapshot fields. All optional; the upstream payload is an
/// opaque third-party shape and any missing field simply falls back to
/// derived statistics.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LatestQuote {
    pub price: Option<String>,
    #[serde(rename = "yesterdayPrice")]
    pub yesterday_price: Option<String>,
    #[serde(rename = "upAndDownAmt", alias = "change")]
    pub change: Option<String>,
    #[serde(rename = "upAndDownRate", alias = "changeRate")]
    pub change_rate: Option<String>,
    pub time: Option<String>,
}

impl LatestQuote {
    /// Authoritative reference for daily statistics: previous close plus
    /// the upstream's own change amount and rate, where parseable.
    pub fn reference(&self) -> Reference {
        Reference {
            price: self.yesterday_price.as_deref().and_then(parse_price),
            change: self
                .change
                .as_deref()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            change_rate: self.change_rate.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Pull the record array out of the upstream envelope
/// (`{"resultData": {"datas": [...]}}`), tolerating a bare array payload.
fn envelope_records(payload: &Value) -> &[Value] {
    let datas = payload
        .pointer("/resultData/datas")
        .or_else(|| payload.get("datas"))
        .unwrap_or(payload);
    datas.as_array().map(Vec::as_slice).unwrap_or(&[])
}

/// Decode a yearly history payload into raw records. Records that do not
/// match the yearly shape are dropped silently as bad data.
pub fn decode_yearly(payload: &Value) -> Vec<RawRecord> {
    envelope_records(payload)
        .iter()
        .filter_map(|v| serde_json::from_value::<YearlyRecord>(v.clone()).ok())
        .map(RawRecord::Yearly)
        .collect()
}

/// Decode an intraday payload into raw records, dropping malformed entries.
pub fn decode_intraday(payload: &Value) -> Vec<RawRecord> {
    envelope_records(payload)
        .iter()
        .filter_map(|v| serde_json::from_value::<IntradayRecord>(v.clone()).ok())
        .map(RawRecord::Intraday)
        .collect()
}

/// Decode a latest-price snapshot payload.
pub fn decode_latest(payload: &Value) -> Option<LatestQuote> {
    let datas = payload
        .pointer("/resultData/datas")
        .unwrap_or(payload)
        .clone();
    serde_json::from_value(datas).ok()
}

fn parse_price(raw: &str) -> Option<f64> {
    let price = raw.trim().parse::<f64>().ok()?;
    (price.is_finite() && price > 0.0).then_some(price)
}

/// Intraday names carry date plus time at second resolution.
fn parse_intraday_timestamp(name: &str) -> Option<i64> {
    NaiveDateTime::parse_from_str(name.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn to_point(record: &RawRecord) -> Option<PricePoint> {
    let (timestamp_ms, price) = match record {
        RawRecord::Yearly(r) => (
            r.time.trim().parse::<i64>().ok()?,
            parse_price(&r.price)?,
        ),
        RawRecord::Intraday(r) => (
            parse_intraday_timestamp(&r.name)?,
            parse_price(&r.value.1)?,
        ),
    };
    Some(PricePoint {
        timestamp_ms,
        price,
    })
}

/// Normalize raw records into a canonical series: per-record parse with
/// silent drop of malformed entries, then a stable ascending sort by
/// timestamp. Pure and deterministic.
pub fn normalize(records: &[RawRecord]) -> PriceSeries {
    let mut series: PriceSeries = records.iter().filter_map(to_point).collect();
    if series.len() < records.len() {
        debug!(
            dropped = records.len() - series.len(),
            "Dropped malformed records during normalization"
        );
    }
    series.sort_by_key(|p| p.timestamp_ms);
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn intraday(name: &str, price: &str) -> RawRecord {
        RawRecord::Intraday(IntradayRecord {
            name: name.to_string(),
            value: (name.split(' ').next().unwrap().to_string(), price.to_string()),
        })
    }

    #[test]
    fn test_normalize_yearly_sorted_ascending() {
        let records = vec![
            RawRecord::Yearly(YearlyRecord {
                price: "480.5".into(),
                time: "1704153600000".into(),
            }),
            RawRecord::Yearly(YearlyRecord {
                price: "478.0".into(),
                time: "1704067200000".into(),
            }),
        ];

        let series = normalize(&records);
        assert_eq!(series.len(), 2);
        assert!(series[0].timestamp_ms < series[1].timestamp_ms);
        assert_eq!(series[0].price, 478.0);
    }

    #[test]
    fn test_normalize_drops_malformed_price() {
        let records = vec![
            intraday("2024-01-03 09:30:00", "478.12"),
            intraday("2024-01-03 09:31:00", "not-a-number"),
            intraday("2024-01-03 09:32:00", "478.40"),
        ];

        let series = normalize(&records);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].price, 478.12);
        assert_eq!(series[1].price, 478.40);
    }

    #[test]
    fn test_normalize_drops_malformed_timestamp_and_nonpositive_price() {
        let records = vec![
            intraday("garbage", "478.12"),
            intraday("2024-01-03 09:31:00", "0"),
            intraday("2024-01-03 09:31:00", "-3.5"),
        ];

        assert!(normalize(&records).is_empty());
    }

    #[test]
    fn test_intraday_timestamp_minute_resolution() {
        let records = vec![
            intraday("2024-01-03 09:31:00", "479.00"),
            intraday("2024-01-03 09:30:00", "478.00"),
        ];

        let series = normalize(&records);
        assert_eq!(series[1].timestamp_ms - series[0].timestamp_ms, 60_000);
    }

    #[test]
    fn test_decode_yearly_envelope() {
        let payload = json!({
            "resultData": {
                "datas": [
                    {"price": "478.0", "time": "1704067200000"},
                    {"unexpected": true},
                    {"price": "480.5", "time": "1704153600000"}
                ]
            }
        });

        let records = decode_yearly(&payload);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_decode_intraday_envelope() {
        let payload = json!({
            "resultData": {
                "datas": [
                    {"name": "2024-01-03 09:30:00", "value": ["09:30", "478.12"]}
                ]
            }
        });

        let records = decode_intraday(&payload);
        assert_eq!(records.len(), 1);
        let series = normalize(&records);
        assert_eq!(series[0].price, 478.12);
    }

    #[test]
    fn test_decode_latest_reference() {
        let payload = json!({
            "resultData": {
                "datas": {
                    "price": "479.30",
                    "yesterdayPrice": "478.00",
                    "upAndDownAmt": "1.30",
                    "upAndDownRate": "0.27%",
                    "time": "2024-01-03 15:00:00"
                }
            }
        });

        let quote = decode_latest(&payload).unwrap();
        let reference = quote.reference();
        assert_eq!(reference.price, Some(478.0));
        assert_eq!(reference.change, Some(1.30));
        assert_eq!(reference.change_rate.as_deref(), Some("0.27%"));
    }

    #[test]
    fn test_decode_empty_or_missing_datas() {
        assert!(decode_yearly(&json!({})).is_empty());
        assert!(decode_intraday(&json!({"resultData": {}})).is_empty());
    }
}
