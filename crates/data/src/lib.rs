//! Postgres persistence for the distillation engine.
//!
//! Row records live in `models`, query surfaces in `repositories`. Money
//! columns are `NUMERIC`/`Decimal` at rest and convert to `f64` at the
//! repository boundary, where the statistical engine takes over.

pub mod error;
pub mod models;
pub mod repositories;

pub use error::StoreError;
pub use models::{
    DailyBarRecord, EarningsEventRecord, FinancialHistoryRow, FundamentalRecord,
    InsiderActivityRecord, RiskMetricsRecord, ScorecardRecord, TechnicalRecord,
};
pub use repositories::{
    CorporateSignalRepository, DailyBarRepository, FundamentalRepository, Repositories,
    RiskMetricsRepository, ScorecardRepository, TechnicalRepository,
};
