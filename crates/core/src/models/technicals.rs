use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Pre-computed technical indicators for one trading day.
///
/// Same ordering and cardinality as the price history. Every indicator is
/// optional because early rows lack the warm-up history the indicator
/// needs (a 200-day SMA has no value for the first 199 sessions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub date: NaiveDate,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub adx: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
    pub atr: Option<f64>,
    pub obv: Option<f64>,
}

impl TechnicalSnapshot {
    #[must_use]
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }
}
