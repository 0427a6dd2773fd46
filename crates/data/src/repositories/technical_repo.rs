//! Technical indicator repository.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::TechnicalRecord;

const COLUMNS: &str = "id, ticker, date, sma_20, sma_50, sma_200, rsi, macd, macd_signal, \
                       macd_hist, adx, bb_upper, bb_lower, atr, obv";

/// Repository for pre-computed technical indicator rows.
#[derive(Debug, Clone)]
pub struct TechnicalRepository {
    pool: PgPool,
}

impl TechnicalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queries up to `limit` most recent rows at or before `as_of`,
    /// ascending by date.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_history(
        &self,
        ticker: &str,
        as_of: NaiveDate,
        limit: i64,
    ) -> Result<Vec<TechnicalRecord>> {
        let mut records = sqlx::query_as::<_, TechnicalRecord>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM technical_indicators
            WHERE ticker = $1 AND date <= $2
            ORDER BY date DESC
            LIMIT $3
            "#
        ))
        .bind(ticker)
        .bind(as_of)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query technical indicators")?;

        records.reverse();
        Ok(records)
    }

    /// Gets the most recent indicator row at or before `as_of`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest(&self, ticker: &str, as_of: NaiveDate) -> Result<Option<TechnicalRecord>> {
        let record = sqlx::query_as::<_, TechnicalRecord>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM technical_indicators
            WHERE ticker = $1 AND date <= $2
            ORDER BY date DESC
            LIMIT 1
            "#
        ))
        .bind(ticker)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest technical row")?;

        Ok(record)
    }
}
