//! Price-action report: trend regime, momentum, and section assembly.

use std::fmt;

use dossier_core::config::PatternConfig;
use dossier_core::models::{PricePoint, QuantScorecard, TechnicalSnapshot};

use crate::distill::{
    detect_crossovers, detect_divergence, levels::summarize_levels, push_section, Divergence,
};
use crate::stats;

pub(crate) const INSUFFICIENT_MESSAGE: &str = "Insufficient price data for pattern analysis.";

/// Trend classification from the latest SMA ordering relative to price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendRegime {
    StrongUptrend,
    StrongDowntrend,
    UptrendWithPullbackRisk,
    DowntrendWithBouncePotential,
    Sideways,
}

impl fmt::Display for TrendRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TrendRegime::StrongUptrend => "STRONG UPTREND (price > SMA20 > SMA50 > SMA200)",
            TrendRegime::StrongDowntrend => "STRONG DOWNTREND (price < SMA20 < SMA50 < SMA200)",
            TrendRegime::UptrendWithPullbackRisk => {
                "UPTREND WITH PULLBACK RISK (above SMA200, short-term averages crossed down)"
            }
            TrendRegime::DowntrendWithBouncePotential => {
                "DOWNTREND WITH BOUNCE POTENTIAL (below SMA200, short-term averages crossed up)"
            }
            TrendRegime::Sideways => "SIDEWAYS / RANGE-BOUND",
        };
        f.write_str(text)
    }
}

/// Classifies the trend regime; conditions are evaluated in priority
/// order and the first match wins.
#[must_use]
pub fn classify_trend(price: f64, sma20: f64, sma50: f64, sma200: f64) -> TrendRegime {
    if price > sma20 && sma20 > sma50 && sma50 > sma200 {
        TrendRegime::StrongUptrend
    } else if price < sma20 && sma20 < sma50 && sma50 < sma200 {
        TrendRegime::StrongDowntrend
    } else if price > sma200 && sma20 < sma50 {
        TrendRegime::UptrendWithPullbackRisk
    } else if price < sma200 && sma20 > sma50 {
        TrendRegime::DowntrendWithBouncePotential
    } else {
        TrendRegime::Sideways
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RsiState {
    Overbought,
    Oversold,
    Bullish,
    Bearish,
    Neutral,
}

fn classify_rsi(rsi: f64) -> RsiState {
    if rsi > 70.0 {
        RsiState::Overbought
    } else if rsi < 30.0 {
        RsiState::Oversold
    } else if rsi > 60.0 {
        RsiState::Bullish
    } else if rsi < 40.0 {
        RsiState::Bearish
    } else {
        RsiState::Neutral
    }
}

impl RsiState {
    const fn label(self) -> &'static str {
        match self {
            RsiState::Overbought => "overbought",
            RsiState::Oversold => "oversold",
            RsiState::Bullish => "bullish",
            RsiState::Bearish => "bearish",
            RsiState::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistogramTrend {
    Expanding,
    Contracting,
    Mixed,
}

/// Strictly monotone histogram over the last `window` non-null points.
fn classify_histogram(technicals: &[TechnicalSnapshot], window: usize) -> Option<HistogramTrend> {
    let values: Vec<f64> = technicals
        .iter()
        .rev()
        .filter_map(|t| t.macd_hist)
        .take(window)
        .collect();
    if values.len() < window {
        return None;
    }
    // Collected newest-first; restore chronological order.
    let values: Vec<f64> = values.into_iter().rev().collect();

    if values.windows(2).all(|w| w[1] > w[0]) {
        Some(HistogramTrend::Expanding)
    } else if values.windows(2).all(|w| w[1] < w[0]) {
        Some(HistogramTrend::Contracting)
    } else {
        Some(HistogramTrend::Mixed)
    }
}

fn adx_label(adx: f64) -> &'static str {
    if adx > 40.0 {
        "very strong trend"
    } else if adx > 25.0 {
        "moderate trend"
    } else {
        "weak / range-bound"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VolumeRegime {
    Surging,
    Declining,
    Normal,
}

/// Mean volume of the most recent window against the prior baseline.
fn classify_volume(
    volumes: &[f64],
    recent_window: usize,
    baseline_window: usize,
    shift_pct: f64,
) -> Option<(f64, VolumeRegime)> {
    if volumes.len() <= recent_window {
        return None;
    }
    let recent = &volumes[volumes.len() - recent_window..];
    let baseline_start = volumes
        .len()
        .saturating_sub(recent_window + baseline_window);
    let baseline = &volumes[baseline_start..volumes.len() - recent_window];

    let recent_mean = stats::mean(recent)?;
    let baseline_mean = stats::mean(baseline)?;
    if baseline_mean <= 0.0 {
        return None;
    }

    let pct = (recent_mean - baseline_mean) / baseline_mean * 100.0;
    let regime = if pct > shift_pct {
        VolumeRegime::Surging
    } else if pct < -shift_pct {
        VolumeRegime::Declining
    } else {
        VolumeRegime::Normal
    };
    Some((pct, regime))
}

fn trailing_return(closes: &[f64], days: usize) -> Option<f64> {
    if closes.len() <= days {
        return None;
    }
    let past = closes[closes.len() - 1 - days];
    if past == 0.0 {
        return None;
    }
    Some((closes[closes.len() - 1] - past) / past * 100.0)
}

/// Assembles the full price-action report. Section order is fixed.
#[must_use]
pub(crate) fn distill(
    config: &PatternConfig,
    prices: &[PricePoint],
    technicals: &[TechnicalSnapshot],
    scorecard: Option<&QuantScorecard>,
) -> String {
    if prices.len() < config.min_closes {
        return INSUFFICIENT_MESSAGE.to_string();
    }

    let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
    let volumes: Vec<f64> = prices.iter().map(|p| p.volume).collect();
    let current = closes[closes.len() - 1];
    let mut out = String::new();

    // 1. Price and trailing returns
    push_section(&mut out, "Price & Returns");
    out.push_str(&format!("Close:                 ${current:.2}\n"));
    for days in [1usize, 5, 20, 60] {
        if let Some(ret) = trailing_return(&closes, days) {
            out.push_str(&format!("Return ({days}d):{:<w$}{ret:+.2}%\n", "", w = 12 - days.to_string().len()));
        }
    }
    out.push('\n');

    // 2. Trend regime (omitted when any SMA is still warming up)
    let latest = technicals.last();
    if let Some(t) = latest {
        if let (Some(s20), Some(s50), Some(s200)) = (t.sma_20, t.sma_50, t.sma_200) {
            push_section(&mut out, "Trend Regime");
            out.push_str(&format!("{}\n\n", classify_trend(current, s20, s50, s200)));
        }
    }

    // 3. Crossovers
    let crossovers = detect_crossovers(technicals, config.crossover_lookback);
    if !crossovers.is_empty() {
        push_section(&mut out, "Recent Crossovers");
        for event in &crossovers {
            out.push_str(&format!("{event}\n"));
        }
        out.push('\n');
    }

    // 4. Momentum
    if let Some(t) = latest {
        let mut lines = Vec::new();
        if let Some(rsi) = t.rsi {
            lines.push(format!("RSI:                   {rsi:.1} ({})", classify_rsi(rsi).label()));
        }
        if let (Some(macd), Some(signal)) = (t.macd, t.macd_signal) {
            let side = if macd > signal {
                "above signal (bullish)"
            } else if macd < signal {
                "below signal (bearish)"
            } else {
                "on signal (neutral)"
            };
            lines.push(format!("MACD:                  {macd:.3} {side}"));
        }
        match classify_histogram(technicals, config.histogram_trend_window) {
            Some(HistogramTrend::Expanding) => {
                lines.push("MACD histogram:        expanding (momentum building)".to_string());
            }
            Some(HistogramTrend::Contracting) => {
                lines.push("MACD histogram:        contracting (momentum fading)".to_string());
            }
            Some(HistogramTrend::Mixed) | None => {}
        }
        if let Some(adx) = t.adx {
            lines.push(format!("ADX:                   {adx:.1} ({})", adx_label(adx)));
        }
        if !lines.is_empty() {
            push_section(&mut out, "Momentum");
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    // 5. Divergences
    match detect_divergence(&closes, technicals, config.divergence_window) {
        Some(Divergence::Bearish) => {
            push_section(&mut out, "Divergences");
            out.push_str("BEARISH DIVERGENCE: price rising while RSI weakens\n\n");
        }
        Some(Divergence::Bullish) => {
            push_section(&mut out, "Divergences");
            out.push_str("BULLISH DIVERGENCE: price falling while RSI strengthens\n\n");
        }
        None => {}
    }

    // 6. Support / resistance
    let levels = summarize_levels(&closes, config.sr_window, config.sr_cluster_pct, config.max_levels);
    if !levels.supports.is_empty() || !levels.resistances.is_empty() {
        push_section(&mut out, "Support / Resistance");
        if !levels.supports.is_empty() {
            let formatted: Vec<String> =
                levels.supports.iter().map(|l| format!("${l:.2}")).collect();
            out.push_str(&format!("Support:               {}\n", formatted.join(", ")));
        }
        if !levels.resistances.is_empty() {
            let formatted: Vec<String> =
                levels.resistances.iter().map(|l| format!("${l:.2}")).collect();
            out.push_str(&format!("Resistance:            {}\n", formatted.join(", ")));
        }
        out.push('\n');
    }

    // 7. Volume profile
    if let Some((pct, regime)) = classify_volume(
        &volumes,
        config.volume_recent_window,
        config.volume_baseline_window,
        config.volume_shift_pct,
    ) {
        push_section(&mut out, "Volume Profile");
        let label = match regime {
            VolumeRegime::Surging => "surging (accumulation)",
            VolumeRegime::Declining => "declining (distribution)",
            VolumeRegime::Normal => "normal",
        };
        out.push_str(&format!(
            "Volume vs prior period: {pct:+.1}% - {label}\n\n"
        ));
    }

    // 8. Optional scorecard summary
    if let Some(card) = scorecard {
        push_section(&mut out, "Quant Scorecard");
        out.push_str(&format!(
            "Robust z-score (20d):  {:.2}\n",
            card.robust_z_score_20d
        ));
        out.push_str(&format!("Bollinger %B:          {:.2}\n", card.bollinger_pct_b));
        out.push_str(&format!(
            "Percentile rank:       price {:.0} / volume {:.0}\n",
            card.percentile_rank_price, card.percentile_rank_volume
        ));
        out.push_str(&format!("Omega ratio:           {:.2}\n", card.omega_ratio));
        if !card.flags.is_empty() {
            out.push_str(&format!("Flags:                 {}\n", card.flags.join(", ")));
        }
    }

    out.trim_end().to_string()
}
