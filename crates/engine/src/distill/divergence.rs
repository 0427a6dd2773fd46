//! Price/RSI divergence detection.
//!
//! Splits the trailing window into two equal halves and compares the mean
//! close direction to the mean RSI direction across halves. Opposite
//! directions signal a potential reversal.

use dossier_core::models::TechnicalSnapshot;

use crate::stats;

/// Minimum relative price move between half-means to count as a trend.
const PRICE_TREND_PCT: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divergence {
    /// Price rising while RSI weakens.
    Bearish,
    /// Price falling while RSI strengthens.
    Bullish,
}

/// Detects a divergence over the last `window` sessions.
///
/// Returns `None` when the series is shorter than the window or either
/// half lacks a non-null RSI value.
#[must_use]
pub fn detect_divergence(
    closes: &[f64],
    technicals: &[TechnicalSnapshot],
    window: usize,
) -> Option<Divergence> {
    if closes.len() < window || technicals.len() < window {
        return None;
    }
    let half = window / 2;

    let price_tail = &closes[closes.len() - window..];
    let rsi_tail = &technicals[technicals.len() - window..];

    let first_prices = &price_tail[..half];
    let second_prices = &price_tail[half..];
    let first_rsi: Vec<f64> = rsi_tail[..half].iter().filter_map(|t| t.rsi).collect();
    let second_rsi: Vec<f64> = rsi_tail[half..].iter().filter_map(|t| t.rsi).collect();

    let p1 = stats::mean(first_prices)?;
    let p2 = stats::mean(second_prices)?;
    let r1 = stats::mean(&first_rsi)?;
    let r2 = stats::mean(&second_rsi)?;

    if p1 <= 0.0 {
        return None;
    }
    let price_change = (p2 - p1) / p1;

    if price_change > PRICE_TREND_PCT && r2 < r1 {
        Some(Divergence::Bearish)
    } else if price_change < -PRICE_TREND_PCT && r2 > r1 {
        Some(Divergence::Bullish)
    } else {
        None
    }
}
