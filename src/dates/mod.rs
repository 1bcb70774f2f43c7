//! Date index maintenance and prev/next navigation
//!
//! Dates are `YYYY-MM-DD` strings kept sorted ascending; the fixed-width,
//! zero-padded form makes lexicographic order the correct total order.

/// Neighboring navigable dates around a current date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacent {
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// Previous/next dates around `current` within a sorted set of available
/// dates. When `current` is absent, prev/next snap to the greatest smaller
/// and smallest greater available dates, so navigation can enter the range
/// from outside it.
pub fn find_adjacent(available: &[String], current: &str) -> Adjacent {
    match available.binary_search_by(|d| d.as_str().cmp(current)) {
        Ok(at) => Adjacent {
            prev: at.checked_sub(1).map(|i| available[i].clone()),
            next: available.get(at + 1).cloned(),
        },
        Err(insert_at) => Adjacent {
            prev: insert_at.checked_sub(1).map(|i| available[i].clone()),
            next: available.get(insert_at).cloned(),
        },
    }
}

/// Insert `date` into the sorted index if not already present. Returns
/// whether the index changed, so callers persist only on change.
pub fn record_date(index: &mut Vec<String>, date: &str) -> bool {
    match index.binary_search_by(|d| d.as_str().cmp(date)) {
        Ok(_) => false,
        Err(insert_at) => {
            index.insert(insert_at, date.to_string());
            true
        }
    }
}
