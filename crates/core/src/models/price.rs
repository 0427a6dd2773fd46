use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
///
/// Price histories are ordered ascending by date, one point per trading
/// day, and are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PricePoint {
    /// Creates a bar where open/high/low all equal the close.
    ///
    /// Convenience for tests and synthetic series.
    #[must_use]
    pub fn flat(date: NaiveDate, close: f64, volume: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume,
        }
    }
}
