//! Crossover detection over a trailing window of indicator snapshots.
//!
//! Pairwise adjacent comparison: an event fires when the sign of the
//! tracked difference flips between two consecutive rows. A pair is
//! silently skipped unless both of its values are present on both rows.

use std::fmt;

use dossier_core::models::TechnicalSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverKind {
    /// SMA50 crossed above SMA200.
    GoldenCross,
    /// SMA50 crossed below SMA200.
    DeathCross,
    MacdBullish,
    MacdBearish,
    /// RSI crossed up through 30 (oversold exit).
    RsiRecovery,
    /// RSI crossed down through 70 (overbought exit).
    RsiRollover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crossover {
    pub kind: CrossoverKind,
    pub days_ago: usize,
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            CrossoverKind::GoldenCross => "GOLDEN CROSS (SMA50 crossed above SMA200)",
            CrossoverKind::DeathCross => "DEATH CROSS (SMA50 crossed below SMA200)",
            CrossoverKind::MacdBullish => "MACD crossed above signal line (bullish)",
            CrossoverKind::MacdBearish => "MACD crossed below signal line (bearish)",
            CrossoverKind::RsiRecovery => "RSI crossed above 30 (oversold exit)",
            CrossoverKind::RsiRollover => "RSI crossed below 70 (overbought exit)",
        };
        write!(f, "{} {}d ago", label, self.days_ago)
    }
}

/// Scans the last `lookback` snapshots for crossover events.
///
/// "Days ago" counts back from the end of the scanned window, so the most
/// recent pair reports `1d ago` even when fewer than `lookback` rows exist.
#[must_use]
pub fn detect_crossovers(technicals: &[TechnicalSnapshot], lookback: usize) -> Vec<Crossover> {
    let start = technicals.len().saturating_sub(lookback);
    let window = &technicals[start..];
    let mut events = Vec::new();

    for i in 1..window.len() {
        let prev = &window[i - 1];
        let curr = &window[i];
        let days_ago = window.len() - i;

        if let (Some(p50), Some(p200), Some(c50), Some(c200)) =
            (prev.sma_50, prev.sma_200, curr.sma_50, curr.sma_200)
        {
            let before = p50 - p200;
            let after = c50 - c200;
            if before <= 0.0 && after > 0.0 {
                events.push(Crossover {
                    kind: CrossoverKind::GoldenCross,
                    days_ago,
                });
            } else if before >= 0.0 && after < 0.0 {
                events.push(Crossover {
                    kind: CrossoverKind::DeathCross,
                    days_ago,
                });
            }
        }

        if let (Some(pm), Some(ps), Some(cm), Some(cs)) =
            (prev.macd, prev.macd_signal, curr.macd, curr.macd_signal)
        {
            let before = pm - ps;
            let after = cm - cs;
            if before <= 0.0 && after > 0.0 {
                events.push(Crossover {
                    kind: CrossoverKind::MacdBullish,
                    days_ago,
                });
            } else if before >= 0.0 && after < 0.0 {
                events.push(Crossover {
                    kind: CrossoverKind::MacdBearish,
                    days_ago,
                });
            }
        }

        if let (Some(pr), Some(cr)) = (prev.rsi, curr.rsi) {
            if pr < 30.0 && cr >= 30.0 {
                events.push(Crossover {
                    kind: CrossoverKind::RsiRecovery,
                    days_ago,
                });
            } else if pr > 70.0 && cr <= 70.0 {
                events.push(Crossover {
                    kind: CrossoverKind::RsiRollover,
                    days_ago,
                });
            }
        }
    }

    events
}
