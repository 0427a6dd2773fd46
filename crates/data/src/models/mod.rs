mod corporate;
mod daily_bar;
mod fundamental;
mod risk;
mod scorecard;
mod technical;

pub use corporate::{EarningsEventRecord, InsiderActivityRecord};
pub use daily_bar::DailyBarRecord;
pub use fundamental::{FinancialHistoryRow, FundamentalRecord};
pub use risk::RiskMetricsRecord;
pub use scorecard::ScorecardRecord;
pub use technical::TechnicalRecord;
