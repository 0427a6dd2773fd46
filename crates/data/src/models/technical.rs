//! Technical indicator row.

use chrono::NaiveDate;
use dossier_core::models::{BollingerBounds, TechnicalSnapshot};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One stored indicator row, nullable per indicator warm-up.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TechnicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub date: NaiveDate,
    pub sma_20: Option<Decimal>,
    pub sma_50: Option<Decimal>,
    pub sma_200: Option<Decimal>,
    pub rsi: Option<Decimal>,
    pub macd: Option<Decimal>,
    pub macd_signal: Option<Decimal>,
    pub macd_hist: Option<Decimal>,
    pub adx: Option<Decimal>,
    pub bb_upper: Option<Decimal>,
    pub bb_lower: Option<Decimal>,
    pub atr: Option<Decimal>,
    pub obv: Option<Decimal>,
}

fn opt_f64(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

impl TechnicalRecord {
    /// Converts the stored row into the engine's snapshot.
    #[must_use]
    pub fn to_snapshot(&self) -> TechnicalSnapshot {
        TechnicalSnapshot {
            date: self.date,
            sma_20: opt_f64(self.sma_20),
            sma_50: opt_f64(self.sma_50),
            sma_200: opt_f64(self.sma_200),
            rsi: opt_f64(self.rsi),
            macd: opt_f64(self.macd),
            macd_signal: opt_f64(self.macd_signal),
            macd_hist: opt_f64(self.macd_hist),
            adx: opt_f64(self.adx),
            bb_upper: opt_f64(self.bb_upper),
            bb_lower: opt_f64(self.bb_lower),
            atr: opt_f64(self.atr),
            obv: opt_f64(self.obv),
        }
    }

    /// Bollinger bounds, present only when both bands have warmed up.
    #[must_use]
    pub fn bollinger_bounds(&self) -> Option<BollingerBounds> {
        match (opt_f64(self.bb_upper), opt_f64(self.bb_lower)) {
            (Some(upper), Some(lower)) => Some(BollingerBounds { upper, lower }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> TechnicalRecord {
        TechnicalRecord {
            id: None,
            ticker: "AAPL".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            sma_20: Some(dec!(180.0)),
            sma_50: None,
            sma_200: None,
            rsi: Some(dec!(61.5)),
            macd: None,
            macd_signal: None,
            macd_hist: None,
            adx: None,
            bb_upper: Some(dec!(190.0)),
            bb_lower: Some(dec!(172.0)),
            atr: None,
            obv: None,
        }
    }

    #[test]
    fn nulls_survive_conversion() {
        let snapshot = record().to_snapshot();
        assert!(snapshot.sma_50.is_none());
        assert!((snapshot.rsi.unwrap() - 61.5).abs() < 1e-9);
    }

    #[test]
    fn bounds_require_both_bands() {
        let mut rec = record();
        assert!(rec.bollinger_bounds().is_some());
        rec.bb_lower = None;
        assert!(rec.bollinger_bounds().is_none());
    }
}
