//! Corporate-event signal repository.
//!
//! Supplies the two optional contextual signals consumed by flag
//! generation: earnings proximity and net insider activity.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;

/// Repository for earnings-calendar and insider-transaction rows.
#[derive(Debug, Clone)]
pub struct CorporateSignalRepository {
    pool: PgPool,
}

impl CorporateSignalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Days from `as_of` until the next scheduled earnings report, if one
    /// exists at or after `as_of`.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn days_to_next_earnings(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<Option<i64>> {
        let row: Option<(NaiveDate,)> = sqlx::query_as(
            r#"
            SELECT report_date
            FROM earnings_calendar
            WHERE ticker = $1 AND report_date >= $2
            ORDER BY report_date ASC
            LIMIT 1
            "#,
        )
        .bind(ticker)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query earnings calendar")?;

        Ok(row.map(|r| (r.0 - as_of).num_days()))
    }

    /// Net insider buying in dollars over the trailing window ending at
    /// `as_of`. `None` when no transactions exist in the window.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn net_insider_buying(
        &self,
        ticker: &str,
        as_of: NaiveDate,
        window_days: i64,
    ) -> Result<Option<f64>> {
        let window_start = as_of - chrono::Duration::days(window_days);

        let row: Option<(Option<Decimal>,)> = sqlx::query_as(
            r#"
            SELECT SUM(net_value_usd)
            FROM insider_transactions
            WHERE ticker = $1
              AND transaction_date > $2 AND transaction_date <= $3
            "#,
        )
        .bind(ticker)
        .bind(window_start)
        .bind(as_of)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query insider transactions")?;

        Ok(row.and_then(|r| r.0).and_then(|d| d.to_f64()))
    }
}
