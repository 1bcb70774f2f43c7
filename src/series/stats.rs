//! Derived statistics over a normalized price series
//!
//! Statistics are recomputed on every read and never cached. Change and
//! change-rate resolve by ordered preference: an authoritative value from a
//! companion payload wins, a derived fallback covers the rest.

use super::{PricePoint, PriceSeries};

/// Externally supplied reference values for daily statistics. `price` is the
/// previous close; `change`/`change_rate` are the upstream's own figures.
/// All optional; missing fields fall back to values derived from the series.
#[derive(Debug, Clone, Default)]
pub struct Reference {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub change_rate: Option<String>,
}

/// Open/close/high/low plus change figures for one day or one period.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub high_time_ms: Option<i64>,
    pub low_time_ms: Option<i64>,
    pub change: f64,
    pub change_rate: String,
    pub amplitude: String,
    pub is_up: bool,
}

/// Percentage of `numerator` over `reference_price`, two decimals with a
/// trailing `%`. A zero or non-finite reference clamps to `0.00%` instead of
/// letting `Infinity`/`NaN` reach the output.
fn percent(numerator: f64, reference_price: f64) -> String {
    if reference_price == 0.0 || !reference_price.is_finite() || !numerator.is_finite() {
        "0.00%".to_string()
    } else {
        format!("{:.2}%", numerator / reference_price * 100.0)
    }
}

impl SeriesStats {
    /// Compute statistics for a series against an external reference.
    ///
    /// An empty series yields zeroed prices rather than an error; callers
    /// that need meaningful extremes must check for emptiness themselves.
    pub fn compute(series: &PriceSeries, reference: &Reference) -> Self {
        let open = series.first().map(|p| p.price).unwrap_or(0.0);
        let close = series.last().map(|p| p.price).unwrap_or(0.0);

        let mut high: Option<PricePoint> = None;
        let mut low: Option<PricePoint> = None;
        for point in series {
            // strict comparisons so the first occurrence wins on ties
            if high.map_or(true, |h| point.price > h.price) {
                high = Some(*point);
            }
            if low.map_or(true, |l| point.price < l.price) {
                low = Some(*point);
            }
        }

        let high_price = high.map(|p| p.price).unwrap_or(0.0);
        let low_price = low.map(|p| p.price).unwrap_or(0.0);
        let reference_price = reference.price.unwrap_or(open);

        let change = reference.change.unwrap_or(close - open);
        let change_rate = reference
            .change_rate
            .clone()
            .unwrap_or_else(|| percent(change, reference_price));
        let amplitude = percent(high_price - low_price, reference_price);

        Self {
            open,
            close,
            high: high_price,
            low: low_price,
            high_time_ms: high.map(|p| p.timestamp_ms),
            low_time_ms: low.map(|p| p.timestamp_ms),
            change,
            change_rate,
            amplitude,
            is_up: change >= 0.0,
        }
    }

    /// Period statistics relative to the series' own first point, used for
    /// yearly series where no previous close exists.
    pub fn for_period(series: &PriceSeries) -> Self {
        Self::compute(series, &Reference::default())
    }
}
