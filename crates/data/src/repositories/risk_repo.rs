//! Risk metrics repository.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::RiskMetricsRecord;

/// Repository for portfolio risk-metric rows.
#[derive(Debug, Clone)]
pub struct RiskMetricsRepository {
    pool: PgPool,
}

impl RiskMetricsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one risk-metric row.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &RiskMetricsRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO risk_metrics
                (ticker, as_of, sharpe_ratio, sortino_ratio, var_95, cvar_95,
                 max_drawdown, current_drawdown)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&record.ticker)
        .bind(record.as_of)
        .bind(record.sharpe_ratio)
        .bind(record.sortino_ratio)
        .bind(record.var_95)
        .bind(record.cvar_95)
        .bind(record.max_drawdown)
        .bind(record.current_drawdown)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert risk metrics")?;

        Ok(row.0)
    }

    /// Gets the most recent risk-metric row at or before `as_of`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<Option<RiskMetricsRecord>> {
        let record = sqlx::query_as::<_, RiskMetricsRecord>(
            r#"
            SELECT id, ticker, as_of, sharpe_ratio, sortino_ratio, var_95,
                   cvar_95, max_drawdown, current_drawdown
            FROM risk_metrics
            WHERE ticker = $1 AND as_of::date <= $2
            ORDER BY as_of DESC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest risk metrics")?;

        Ok(record)
    }
}
