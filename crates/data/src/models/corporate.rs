//! Corporate-event rows feeding the contextual flag signals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scheduled earnings report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EarningsEventRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub report_date: NaiveDate,
}

/// One insider transaction; `net_value_usd` is negative for sales.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InsiderActivityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub transaction_date: NaiveDate,
    pub net_value_usd: Decimal,
}
