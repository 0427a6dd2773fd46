use serde::{Deserialize, Serialize};

/// Current portfolio-level risk metrics for one instrument.
///
/// Drawdowns and VaR figures are positive fractions (0.20 = 20% loss).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub var_95: f64,
    pub cvar_95: f64,
    pub max_drawdown: f64,
    pub current_drawdown: f64,
}

/// Historical win/loss statistics feeding the Kelly sizing formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinLossContext {
    /// Fraction of closed trades that were profitable, in [0, 1].
    pub win_rate: f64,
    /// Average winning trade return (positive fraction).
    pub avg_win: f64,
    /// Average losing trade return (positive fraction).
    pub avg_loss: f64,
}
