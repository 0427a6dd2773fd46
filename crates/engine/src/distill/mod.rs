//! Pattern distiller.
//!
//! Turns price/indicator history and optional valuation/risk context into
//! three independent plain-text reports (price action, fundamentals,
//! risk). Classification happens on enums first; formatting is a separate
//! concern so the taxonomy stays testable without string matching.

mod crossovers;
mod divergence;
mod fundamentals;
mod levels;
mod price_action;
mod risk;

pub use crossovers::{detect_crossovers, Crossover, CrossoverKind};
pub use divergence::{detect_divergence, Divergence};
pub use levels::{cluster_levels, find_level_candidates, LevelSummary};
pub use price_action::{classify_trend, TrendRegime};

use dossier_core::config::PatternConfig;
use dossier_core::models::{
    FinancialHistoryRecord, FundamentalSnapshot, PricePoint, QuantScorecard, RiskMetrics,
    TechnicalSnapshot,
};

/// Stateless distiller; each call reads only its own inputs.
#[derive(Debug, Clone, Default)]
pub struct PatternDistiller {
    config: PatternConfig,
}

impl PatternDistiller {
    #[must_use]
    pub fn new(config: PatternConfig) -> Self {
        Self { config }
    }

    /// Builds the price-action report.
    ///
    /// Requires at least five closes; with fewer it returns the literal
    /// insufficient-data message and nothing else.
    #[must_use]
    pub fn distill_price_action(
        &self,
        prices: &[PricePoint],
        technicals: &[TechnicalSnapshot],
        scorecard: Option<&QuantScorecard>,
    ) -> String {
        price_action::distill(&self.config, prices, technicals, scorecard)
    }

    /// Builds the fundamentals report from an optional snapshot and fiscal
    /// history.
    #[must_use]
    pub fn distill_fundamentals(
        &self,
        snapshot: Option<&FundamentalSnapshot>,
        history: &[FinancialHistoryRecord],
    ) -> String {
        fundamentals::distill(snapshot, history)
    }

    /// Builds the risk report; `position_value` switches VaR lines into
    /// dollar terms.
    #[must_use]
    pub fn distill_risk(
        &self,
        risk_metrics: Option<&RiskMetrics>,
        scorecard: Option<&QuantScorecard>,
        position_value: Option<f64>,
    ) -> String {
        risk::distill(risk_metrics, scorecard, position_value)
    }
}

const RULE: &str = "───────────────────────────────────────────────────────────────";

/// Appends a section header in the house report style.
pub(crate) fn push_section(out: &mut String, title: &str) {
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
}
