//! Fundamental snapshot and fiscal-history repository.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{FinancialHistoryRow, FundamentalRecord};

/// Repository for valuation snapshots and per-year financial history.
#[derive(Debug, Clone)]
pub struct FundamentalRepository {
    pool: PgPool,
}

impl FundamentalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets the most recent fundamental snapshot at or before `as_of`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn latest_snapshot(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<Option<FundamentalRecord>> {
        let record = sqlx::query_as::<_, FundamentalRecord>(
            r#"
            SELECT id, ticker, as_of, trailing_pe, forward_pe, price_to_sales,
                   price_to_book, peg_ratio, market_cap, net_income,
                   operating_cash_flow, free_cash_flow, altman_z, piotroski_f,
                   ten_year_treasury_yield
            FROM fundamental_snapshots
            WHERE ticker = $1 AND as_of::date <= $2
            ORDER BY as_of DESC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query fundamental snapshot")?;

        Ok(record)
    }

    /// Queries per-fiscal-year history for a ticker.
    ///
    /// Rows come back in storage order; the engine sorts by year before
    /// trend analysis.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn financial_history(&self, ticker: &str) -> Result<Vec<FinancialHistoryRow>> {
        let rows = sqlx::query_as::<_, FinancialHistoryRow>(
            r#"
            SELECT id, ticker, year, revenue, net_income, gross_margin,
                   net_margin, eps
            FROM financial_history
            WHERE ticker = $1
            "#,
        )
        .bind(ticker)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query financial history")?;

        Ok(rows)
    }
}
