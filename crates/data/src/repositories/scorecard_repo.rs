//! Scorecard repository.
//!
//! One append per computation; prior rows are never updated. Implements
//! the engine's `ScorecardStore` collaborator trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use dossier_core::models::QuantScorecard;
use dossier_core::traits::ScorecardStore;
use sqlx::PgPool;

use crate::models::ScorecardRecord;

/// Repository for computed scorecard rows.
#[derive(Debug, Clone)]
pub struct ScorecardRepository {
    pool: PgPool,
}

impl ScorecardRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts one scorecard row.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &ScorecardRecord) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO quant_scorecards
                (ticker, computed_at, z_score_20d, robust_z_score_20d,
                 bollinger_pct_b, percentile_rank_price, percentile_rank_volume,
                 sharpe_ratio, sortino_ratio, calmar_ratio, omega_ratio,
                 kelly_fraction, half_kelly, var_95, cvar_95, max_drawdown, flags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(&record.ticker)
        .bind(record.computed_at)
        .bind(record.z_score_20d)
        .bind(record.robust_z_score_20d)
        .bind(record.bollinger_pct_b)
        .bind(record.percentile_rank_price)
        .bind(record.percentile_rank_volume)
        .bind(record.sharpe_ratio)
        .bind(record.sortino_ratio)
        .bind(record.calmar_ratio)
        .bind(record.omega_ratio)
        .bind(record.kelly_fraction)
        .bind(record.half_kelly)
        .bind(record.var_95)
        .bind(record.cvar_95)
        .bind(record.max_drawdown)
        .bind(&record.flags)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert scorecard")?;

        Ok(row.0)
    }

    /// Gets the most recent scorecard row computed at or before `as_of`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest(&self, ticker: &str, as_of: NaiveDate) -> Result<Option<ScorecardRecord>> {
        let record = sqlx::query_as::<_, ScorecardRecord>(
            r#"
            SELECT id, ticker, computed_at, z_score_20d, robust_z_score_20d,
                   bollinger_pct_b, percentile_rank_price, percentile_rank_volume,
                   sharpe_ratio, sortino_ratio, calmar_ratio, omega_ratio,
                   kelly_fraction, half_kelly, var_95, cvar_95, max_drawdown,
                   flags, created_at
            FROM quant_scorecards
            WHERE ticker = $1 AND computed_at::date <= $2
            ORDER BY computed_at DESC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest scorecard")?;

        Ok(record)
    }
}

#[async_trait]
impl ScorecardStore for ScorecardRepository {
    async fn append(&self, scorecard: &QuantScorecard) -> Result<()> {
        let record = ScorecardRecord::from_scorecard(scorecard);
        self.insert(&record).await?;
        Ok(())
    }
}
