use serde::{Deserialize, Serialize};

/// Point-in-time valuation and financial-health snapshot.
///
/// At most one "current" instance exists per ticker at call time. Every
/// field is optional; a distillation subsection is simply omitted when the
/// fields it needs are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
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
    /// Benchmark yield used for the earnings-yield gap line.
    pub ten_year_treasury_yield: Option<f64>,
}

impl FundamentalSnapshot {
    /// True when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trailing_pe.is_none()
            && self.forward_pe.is_none()
            && self.price_to_sales.is_none()
            && self.price_to_book.is_none()
            && self.peg_ratio.is_none()
            && self.market_cap.is_none()
            && self.net_income.is_none()
            && self.operating_cash_flow.is_none()
            && self.free_cash_flow.is_none()
            && self.altman_z.is_none()
            && self.piotroski_f.is_none()
            && self.ten_year_treasury_yield.is_none()
    }
}

/// One fiscal year of reported financials.
///
/// Unordered on input; callers sort ascending by year before trend
/// analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialHistoryRecord {
    pub year: i32,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub gross_margin: Option<f64>,
    pub net_margin: Option<f64>,
    pub eps: Option<f64>,
}
