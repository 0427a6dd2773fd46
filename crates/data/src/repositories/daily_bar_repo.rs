//! Daily bar repository.
//!
//! Batch insert and ascending history queries for OHLCV rows.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::DailyBarRecord;

/// Repository for daily OHLCV rows.
#[derive(Debug, Clone)]
pub struct DailyBarRepository {
    pool: PgPool,
}

impl DailyBarRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a batch of daily bars.
    ///
    /// Uses `ON CONFLICT DO NOTHING` so re-ingesting an overlapping range
    /// is harmless.
    ///
    /// # Returns
    /// The number of rows actually inserted (excluding duplicates).
    ///
    /// # Errors
    /// Returns an error if the database transaction fails.
    pub async fn insert_batch(&self, records: &[DailyBarRecord]) -> Result<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;
        let mut inserted = 0u64;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO daily_bars (ticker, date, open, high, low, close, volume)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (ticker, date) DO NOTHING
                "#,
            )
            .bind(&record.ticker)
            .bind(record.date)
            .bind(record.open)
            .bind(record.high)
            .bind(record.low)
            .bind(record.close)
            .bind(record.volume)
            .execute(&mut *tx)
            .await
            .context("Failed to insert daily bar")?;

            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(inserted)
    }

    /// Queries up to `limit` most recent bars at or before `as_of`,
    /// returned ascending by date as the engine expects.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn query_history(
        &self,
        ticker: &str,
        as_of: NaiveDate,
        limit: i64,
    ) -> Result<Vec<DailyBarRecord>> {
        let mut records = sqlx::query_as::<_, DailyBarRecord>(
            r#"
            SELECT id, ticker, date, open, high, low, close, volume
            FROM daily_bars
            WHERE ticker = $1 AND date <= $2
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(ticker)
        .bind(as_of)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query daily bars")?;

        records.reverse();
        Ok(records)
    }

    /// Gets the most recent stored date for a ticker.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest_date(&self, ticker: &str) -> Result<Option<NaiveDate>> {
        let row: Option<(NaiveDate,)> = sqlx::query_as(
            r#"
            SELECT date FROM daily_bars
            WHERE ticker = $1
            ORDER BY date DESC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query latest bar date")?;

        Ok(row.map(|r| r.0))
    }
}
