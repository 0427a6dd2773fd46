//! Domain records consumed and produced by the distillation engine.
//!
//! All inputs are read-only, in-memory sequences; optional fields are
//! `Option<T>` rather than sentinel values so that missing data can be
//! distinguished from a legitimate zero.

mod fundamentals;
mod price;
mod risk;
mod scorecard;
mod technicals;

pub use fundamentals::{FinancialHistoryRecord, FundamentalSnapshot};
pub use price::PricePoint;
pub use risk::{RiskMetrics, WinLossContext};
pub use scorecard::{BollingerBounds, FlagContext, QuantScorecard};
pub use technicals::TechnicalSnapshot;
