//! Fundamental snapshot and fiscal-year history rows.

use chrono::{DateTime, Utc};
use dossier_core::models::{FinancialHistoryRecord, FundamentalSnapshot};
use serde::{Deserialize, Serialize};

/// Latest valuation/health snapshot for one ticker. Ratio columns are
/// `DOUBLE PRECISION`; nulls mean the provider had no figure.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FundamentalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub as_of: DateTime<Utc>,
    pub trailing_pe: Option<f64>,
    pub forward_pe: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub price_to_book: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub market_cap: Option<f64>,
    pub net_income: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub altman_z: Option<f64>,
    pub piotroski_f: Option<f64>,
    pub ten_year_treasury_yield: Option<f64>,
}

impl FundamentalRecord {
    #[must_use]
    pub fn to_snapshot(&self) -> FundamentalSnapshot {
        FundamentalSnapshot {
            trailing_pe: self.trailing_pe,
            forward_pe: self.forward_pe,
            price_to_sales: self.price_to_sales,
            price_to_book: self.price_to_book,
            peg_ratio: self.peg_ratio,
            market_cap: self.market_cap,
            net_income: self.net_income,
            operating_cash_flow: self.operating_cash_flow,
            free_cash_flow: self.free_cash_flow,
            altman_z: self.altman_z,
            piotroski_f: self.piotroski_f,
            ten_year_treasury_yield: self.ten_year_treasury_yield,
        }
    }
}

/// One fiscal year of reported financials as stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FinancialHistoryRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub id: Option<i64>,
    pub ticker: String,
    pub year: i32,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub gross_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub eps: Option<f64>,
}

impl FinancialHistoryRow {
    #[must_use]
    pub fn to_record(&self) -> FinancialHistoryRecord {
        FinancialHistoryRecord {
            year: self.year,
            revenue: self.revenue,
            net_income: self.net_income,
            gross_margin: self.gross_margin,
            net_margin: self.net_margin,
            eps: self.eps,
        }
    }
}
