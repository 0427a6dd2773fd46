//! Persisted scorecard row.

use chrono::{DateTime, Utc};
use dossier_core::models::QuantScorecard;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One appended scorecard computation. Flags are stored as a `JSONB`
/// array so the orchestration layer can filter on them without a join.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ScorecardRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub computed_at: DateTime<Utc>,
    pub z_score_20d: f64,
    pub robust_z_score_20d: f64,
    pub bollinger_pct_b: f64,
    pub percentile_rank_price: f64,
    pub percentile_rank_volume: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub calmar_ratio: f64,
    pub omega_ratio: f64,
    pub kelly_fraction: f64,
    pub half_kelly: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub max_drawdown: f64,
    pub flags: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ScorecardRecord {
    /// Builds a row from a freshly computed scorecard.
    #[must_use]
    pub fn from_scorecard(card: &QuantScorecard) -> Self {
        Self {
            id: None,
            ticker: card.ticker.clone(),
            computed_at: card.computed_at,
            z_score_20d: card.z_score_20d,
            robust_z_score_20d: card.robust_z_score_20d,
            bollinger_pct_b: card.bollinger_pct_b,
            percentile_rank_price: card.percentile_rank_price,
            percentile_rank_volume: card.percentile_rank_volume,
            sharpe_ratio: card.sharpe_ratio,
            sortino_ratio: card.sortino_ratio,
            calmar_ratio: card.calmar_ratio,
            omega_ratio: card.omega_ratio,
            kelly_fraction: card.kelly_fraction,
            half_kelly: card.half_kelly,
            var_95: card.var_95,
            cvar_95: card.cvar_95,
            max_drawdown: card.max_drawdown,
            flags: JsonValue::from(card.flags.clone()),
            created_at: None,
        }
    }

    /// Reconstructs the scorecard entity from the stored row.
    #[must_use]
    pub fn to_scorecard(&self) -> QuantScorecard {
        let flags = self
            .flags
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        QuantScorecard {
            ticker: self.ticker.clone(),
            computed_at: self.computed_at,
            z_score_20d: self.z_score_20d,
            robust_z_score_20d: self.robust_z_score_20d,
            bollinger_pct_b: self.bollinger_pct_b,
            percentile_rank_price: self.percentile_rank_price,
            percentile_rank_volume: self.percentile_rank_volume,
            sharpe_ratio: self.sharpe_ratio,
            sortino_ratio: self.sortino_ratio,
            calmar_ratio: self.calmar_ratio,
            omega_ratio: self.omega_ratio,
            kelly_fraction: self.kelly_fraction,
            half_kelly: self.half_kelly,
            var_95: self.var_95,
            cvar_95: self.cvar_95,
            max_drawdown: self.max_drawdown,
            flags,
        }
    }
}
