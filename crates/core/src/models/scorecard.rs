//! Scorecard output entity and its auxiliary input records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bollinger band bounds taken from the most recent technical row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBounds {
    pub upper: f64,
    pub lower: f64,
}

impl BollingerBounds {
    #[must_use]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Optional contextual signals consumed only by flag generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagContext {
    /// Calendar days until the next earnings report, if scheduled.
    pub days_to_earnings: Option<i64>,
    /// Net insider buying in dollars over the trailing window
    /// (negative = net selling).
    pub net_insider_buying_usd: Option<f64>,
}

/// The engine's primary output: one row of signal and risk/reward metrics
/// plus anomaly flags.
///
/// Created fresh on every compute call; prior instances are never mutated.
/// Downstream layers only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantScorecard {
    pub ticker: String,
    pub computed_at: DateTime<Utc>,

    // Signal generation
    pub z_score_20d: f64,
    pub robust_z_score_20d: f64,
    pub bollinger_pct_b: f64,
    pub percentile_rank_price: f64,
    pub percentile_rank_volume: f64,

    // Risk/reward
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub omega_ratio: f64,
    pub kelly_fraction: f64,
    pub half_kelly: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub max_drawdown: f64,

    /// Anomaly tags, order-stable and duplicate-free by construction.
    pub flags: Vec<String>,
}

impl QuantScorecard {
    /// A scorecard with all metrics at their neutral defaults.
    ///
    /// `bollinger_pct_b` defaults to the mid-band 0.5 and percentile ranks
    /// to 50.0 so that a defaulted row reads as "nothing notable" rather
    /// than an extreme.
    #[must_use]
    pub fn neutral(ticker: impl Into<String>, computed_at: DateTime<Utc>) -> Self {
        Self {
            ticker: ticker.into(),
            computed_at,
            z_score_20d: 0.0,
            robust_z_score_20d: 0.0,
            bollinger_pct_b: 0.5,
            percentile_rank_price: 50.0,
            percentile_rank_volume: 50.0,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            calmar_ratio: 0.0,
            omega_ratio: 0.0,
            kelly_fraction: 0.0,
            half_kelly: 0.0,
            var_95: 0.0,
            cvar_95: 0.0,
            max_drawdown: 0.0,
            flags: Vec::new(),
        }
    }

    /// True when the only signal this row carries is the insufficient-data
    /// marker.
    #[must_use]
    pub fn is_insufficient(&self) -> bool {
        self.flags.iter().any(|f| f == "insufficient_data")
    }
}
