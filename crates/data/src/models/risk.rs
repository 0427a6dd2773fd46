//! Stored risk-metric row.

use chrono::{DateTime, Utc};
use dossier_core::models::RiskMetrics;
use serde::{Deserialize, Serialize};

/// Latest computed portfolio risk metrics for one ticker. Ratios are
/// dimensionless, so these columns are `DOUBLE PRECISION` rather than
/// `NUMERIC`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RiskMetricsRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub as_of: DateTime<Utc>,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub max_drawdown: f64,
    pub current_drawdown: f64,
}

impl RiskMetricsRecord {
    #[must_use]
    pub fn to_metrics(&self) -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: self.sharpe_ratio,
            sortino_ratio: self.sortino_ratio,
            var_95: self.var_95,
            cvar_95: self.cvar_95,
            max_drawdown: self.max_drawdown,
            current_drawdown: self.current_drawdown,
        }
    }
}
