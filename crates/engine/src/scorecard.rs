//! Scorecard computer.
//!
//! Combines the windowed statistics into one `QuantScorecard` per
//! instrument. Computation is pure and synchronous; the only side effect
//! in the whole pipeline (the final append) lives in the service layer.

use std::sync::Arc;

use chrono::Utc;
use dossier_core::config::{FlagConfig, SignalConfig};
use dossier_core::events::{EngineEvent, TracingSink};
use dossier_core::models::{
    BollingerBounds, FlagContext, PricePoint, QuantScorecard, RiskMetrics, WinLossContext,
};
use dossier_core::traits::EventSink;

use crate::flags::generate_flags;
use crate::stats;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Computes risk/reward scorecards from price history and contextual
/// inputs.
pub struct ScorecardComputer {
    signal: SignalConfig,
    flags: FlagConfig,
    sink: Arc<dyn EventSink>,
}

impl ScorecardComputer {
    #[must_use]
    pub fn new(signal: SignalConfig, flags: FlagConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            signal,
            flags,
            sink,
        }
    }

    /// Replaces the event sink, keeping configuration.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Computes a fresh scorecard for `ticker`.
    ///
    /// Requires at least `z_window` closing prices; with fewer the result
    /// is a neutral scorecard whose only flag is `insufficient_data`.
    /// Never fails: degenerate denominators fall back to guarded defaults.
    #[must_use]
    pub fn compute(
        &self,
        ticker: &str,
        prices: &[PricePoint],
        risk_metrics: Option<&RiskMetrics>,
        bollinger: Option<BollingerBounds>,
        win_loss: Option<WinLossContext>,
        flag_ctx: FlagContext,
    ) -> QuantScorecard {
        let computed_at = Utc::now();

        if prices.len() < self.signal.z_window {
            self.sink.emit(&EngineEvent::InsufficientData {
                ticker: ticker.to_string(),
                points: prices.len(),
                required: self.signal.z_window,
            });
            let mut card = QuantScorecard::neutral(ticker, computed_at);
            card.flags.push("insufficient_data".to_string());
            return card;
        }

        let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
        let volumes: Vec<f64> = prices.iter().map(|p| p.volume).collect();
        let last_close = closes[closes.len() - 1];
        let last_volume = volumes[volumes.len() - 1];
        let window = &closes[closes.len() - self.signal.z_window..];

        let mut card = QuantScorecard::neutral(ticker, computed_at);
        card.z_score_20d = stats::z_score(window, last_close);
        card.robust_z_score_20d = stats::robust_z_score(
            window,
            last_close,
            self.signal.robust_iqr_scale,
            self.signal.z_window,
        );
        card.bollinger_pct_b = match bollinger {
            Some(bounds) => stats::bollinger_pct_b(last_close, bounds.upper, bounds.lower),
            None => 0.5,
        };
        card.percentile_rank_price = stats::percentile_rank(&closes, last_close);
        card.percentile_rank_volume = stats::percentile_rank(&volumes, last_volume);

        let returns = stats::simple_returns(&closes);
        card.omega_ratio = stats::omega_ratio(
            &returns,
            self.signal.omega_threshold,
            self.signal.omega_cap,
        );

        if let Some(ctx) = win_loss {
            card.kelly_fraction = stats::kelly_fraction(ctx.win_rate, ctx.avg_win, ctx.avg_loss);
            card.half_kelly = card.kelly_fraction / 2.0;
        }

        match risk_metrics {
            Some(rm) => {
                card.sharpe_ratio = rm.sharpe_ratio;
                card.sortino_ratio = rm.sortino_ratio;
                card.var_95 = rm.var_95;
                card.cvar_95 = rm.cvar_95;
                card.max_drawdown = rm.max_drawdown;
            }
            None => {
                card.max_drawdown = stats::max_drawdown(&closes);
            }
        }
        card.calmar_ratio = calmar_ratio(&returns, card.max_drawdown);

        card.flags = generate_flags(&card, &flag_ctx, &self.flags);

        self.sink.emit(&EngineEvent::ScorecardComputed {
            ticker: ticker.to_string(),
            flag_count: card.flags.len(),
        });
        card
    }
}

impl Default for ScorecardComputer {
    fn default() -> Self {
        Self::new(
            SignalConfig::default(),
            FlagConfig::default(),
            Arc::new(TracingSink),
        )
    }
}

/// Annualized mean daily return over the maximum drawdown.
///
/// Zero when the drawdown is non-positive, which also covers empty return
/// series.
fn calmar_ratio(returns: &[f64], max_drawdown: f64) -> f64 {
    if max_drawdown <= 0.0 {
        return 0.0;
    }
    let annualized = stats::mean(returns).unwrap_or(0.0) * TRADING_DAYS_PER_YEAR;
    annualized / max_drawdown
}
