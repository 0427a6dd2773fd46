//! Daily OHLCV row.

use chrono::NaiveDate;
use dossier_core::models::PricePoint;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One stored daily bar. Prices are `NUMERIC` at rest; the engine works
/// in `f64`, so conversion happens once at the repository boundary.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyBarRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

impl DailyBarRecord {
    /// Converts the stored row into the engine's price point.
    #[must_use]
    pub fn to_point(&self) -> PricePoint {
        PricePoint {
            date: self.date,
            open: self.open.to_f64().unwrap_or(0.0),
            high: self.high.to_f64().unwrap_or(0.0),
            low: self.low.to_f64().unwrap_or(0.0),
            close: self.close.to_f64().unwrap_or(0.0),
            volume: self.volume as f64,
        }
    }
}
