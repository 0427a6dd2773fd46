//! Windowed statistics shared by the scorecard computer and the pattern
//! detectors.
//!
//! All guards here implement the degenerate-arithmetic policy: a zero or
//! negative denominator yields an explicit fallback value, never a NaN or
//! infinity that would leak into a report.

/// Mean of a slice, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation, `None` for fewer than two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / n as f64).sqrt())
}

/// Median via a sorted copy, `None` when empty.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Linearly interpolated percentile of a sorted slice, `pct` in [0, 1].
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&pct) {
        return None;
    }
    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }
    let idx = pct * (n - 1) as f64;
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;
    let frac = idx - lower as f64;
    if upper >= n {
        Some(sorted[n - 1])
    } else {
        Some(sorted[lower] * (1.0 - frac) + sorted[upper] * frac)
    }
}

/// Interquartile range (Q3 - Q1), `None` when empty.
pub fn iqr(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let q1 = percentile_sorted(&sorted, 0.25)?;
    let q3 = percentile_sorted(&sorted, 0.75)?;
    Some(q3 - q1)
}

/// Classic z-score of `current` against the window's mean/stdev.
///
/// Returns 0.0 when the deviation is zero or the window is degenerate.
pub fn z_score(window: &[f64], current: f64) -> f64 {
    match (mean(window), std_dev(window)) {
        (Some(m), Some(sd)) if sd > 0.0 => (current - m) / sd,
        _ => 0.0,
    }
}

/// Median/IQR-based z-score, resistant to fat-tailed clusters that would
/// distort the plain standard-deviation form.
///
/// `scale` is the normal-consistency constant (0.7413). Returns 0.0 when
/// the window is shorter than `min_window` or the IQR is non-positive.
pub fn robust_z_score(window: &[f64], current: f64, scale: f64, min_window: usize) -> f64 {
    if window.len() < min_window {
        return 0.0;
    }
    let (Some(med), Some(range)) = (median(window), iqr(window)) else {
        return 0.0;
    };
    if range <= 0.0 {
        return 0.0;
    }
    (current - med) / (range * scale)
}

/// Normalized position of `price` within its volatility bands.
///
/// Returns the neutral 0.5 when the band width is non-positive.
pub fn bollinger_pct_b(price: f64, upper: f64, lower: f64) -> f64 {
    let width = upper - lower;
    if width <= 0.0 {
        return 0.5;
    }
    (price - lower) / width
}

/// Non-parametric percentile rank: fraction of historical values strictly
/// below `current`, times 100. Returns 50.0 on empty history.
pub fn percentile_rank(history: &[f64], current: f64) -> f64 {
    if history.is_empty() {
        return 50.0;
    }
    let below = history.iter().filter(|&&v| v < current).count();
    below as f64 / history.len() as f64 * 100.0
}

/// Omega ratio: sum of positive excess returns over the sum of absolute
/// negative excess returns, relative to `threshold`.
///
/// Capped at `cap` because the ratio has no meaningful upper bound once
/// losses vanish; never divides by zero and never goes negative. Zero
/// gains win the tie: a series with no upside scores 0.0 even when it
/// also has no downside.
pub fn omega_ratio(returns: &[f64], threshold: f64, cap: f64) -> f64 {
    let gains: f64 = returns
        .iter()
        .filter(|&&r| r > threshold)
        .map(|r| r - threshold)
        .sum();
    let losses: f64 = returns
        .iter()
        .filter(|&&r| r < threshold)
        .map(|r| (threshold - r).abs())
        .sum();
    if gains <= 0.0 {
        return 0.0;
    }
    if losses <= 0.0 {
        return cap;
    }
    (gains / losses).min(cap)
}

/// Kelly fraction from win rate `p`, average win `w`, and average loss `l`.
///
/// `f = (b*p - (1 - p)) / b` with payoff ratio `b = w / l`, clamped to
/// [0, 1]. Returns 0.0 when the loss term is zero.
pub fn kelly_fraction(win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 0.0;
    }
    let b = avg_win / avg_loss;
    if b <= 0.0 {
        return 0.0;
    }
    let f = (b * win_rate - (1.0 - win_rate)) / b;
    f.clamp(0.0, 1.0)
}

/// Simple returns from consecutive closes; zero-priced bars are skipped.
pub fn simple_returns(closes: &[f64]) -> Vec<f64> {
    if closes.len() < 2 {
        return vec![];
    }
    closes
        .windows(2)
        .filter_map(|w| {
            if w[0] != 0.0 {
                Some((w[1] - w[0]) / w[0])
            } else {
                None
            }
        })
        .collect()
}

/// Largest peak-to-trough decline of a series, as a positive fraction.
pub fn max_drawdown(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let mut peak = series[0];
    let mut max_dd: f64 = 0.0;
    for &value in series {
        if value > peak {
            peak = value;
        }
        let dd = if peak > 0.0 { (peak - value) / peak } else { 0.0 };
        max_dd = max_dd.max(dd);
    }
    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================
    // Robust Z-Score Guards
    // ============================================

    #[test]
    fn robust_z_is_zero_below_min_window() {
        let window: Vec<f64> = (0..19).map(f64::from).collect();
        assert_eq!(robust_z_score(&window, 30.0, 0.7413, 20), 0.0);
    }

    #[test]
    fn robust_z_is_zero_for_flat_window() {
        let window = vec![50.0; 20];
        assert_eq!(robust_z_score(&window, 55.0, 0.7413, 20), 0.0);
    }

    #[test]
    fn robust_z_positive_above_median() {
        let window: Vec<f64> = (1..=20).map(f64::from).collect();
        let z = robust_z_score(&window, 25.0, 0.7413, 20);
        assert!(z > 0.0);
    }

    #[test]
    fn robust_z_is_outlier_resistant() {
        // One extreme value distorts the classic z far more than the
        // robust one.
        let mut window: Vec<f64> = (1..=19).map(f64::from).collect();
        window.push(10_000.0);
        let classic = z_score(&window, 25.0);
        let robust = robust_z_score(&window, 25.0, 0.7413, 20);
        assert!(robust.abs() > classic.abs());
    }

    // ============================================
    // Bollinger %B
    // ============================================

    #[test]
    fn pct_b_neutral_when_bands_inverted() {
        assert_eq!(bollinger_pct_b(100.0, 90.0, 110.0), 0.5);
    }

    #[test]
    fn pct_b_neutral_when_bands_equal() {
        assert_eq!(bollinger_pct_b(100.0, 100.0, 100.0), 0.5);
    }

    #[test]
    fn pct_b_midpoint_is_half() {
        assert!((bollinger_pct_b(100.0, 110.0, 90.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn pct_b_above_upper_band_exceeds_one() {
        assert!(bollinger_pct_b(115.0, 110.0, 90.0) > 1.0);
    }

    // ============================================
    // Percentile Rank
    // ============================================

    #[test]
    fn percentile_rank_empty_history_is_neutral() {
        assert_eq!(percentile_rank(&[], 42.0), 50.0);
    }

    #[test]
    fn percentile_rank_counts_strictly_below() {
        let history = [1.0, 2.0, 3.0, 4.0];
        // Ties do not count as below.
        assert_eq!(percentile_rank(&history, 3.0), 50.0);
        assert_eq!(percentile_rank(&history, 5.0), 100.0);
        assert_eq!(percentile_rank(&history, 0.5), 0.0);
    }

    #[test]
    fn percentile_rank_is_monotonic() {
        let history: Vec<f64> = (0..100).map(f64::from).collect();
        let low = percentile_rank(&history, 10.0);
        let high = percentile_rank(&history, 90.0);
        assert!(low <= high);
    }

    // ============================================
    // Omega Ratio
    // ============================================

    #[test]
    fn omega_caps_when_no_losses() {
        let returns = [0.01, 0.02, 0.005];
        assert_eq!(omega_ratio(&returns, 0.0, 99.0), 99.0);
    }

    #[test]
    fn omega_zero_when_no_gains() {
        let returns = [-0.01, -0.02];
        assert_eq!(omega_ratio(&returns, 0.0, 99.0), 0.0);
    }

    #[test]
    fn omega_flat_series_is_zero() {
        // No upside and no downside: the no-gains rule wins over the cap.
        let returns = [0.0, 0.0, 0.0];
        assert_eq!(omega_ratio(&returns, 0.0, 99.0), 0.0);
        assert_eq!(omega_ratio(&[], 0.0, 99.0), 0.0);
    }

    #[test]
    fn omega_bounded_for_any_series() {
        let returns = [0.5, -0.0001, 0.3, 0.9];
        let omega = omega_ratio(&returns, 0.0, 99.0);
        assert!(omega >= 0.0);
        assert!(omega <= 99.0);
    }

    #[test]
    fn omega_balanced_series_near_one() {
        let returns = [0.01, -0.01, 0.02, -0.02];
        let omega = omega_ratio(&returns, 0.0, 99.0);
        assert!((omega - 1.0).abs() < 1e-12);
    }

    // ============================================
    // Kelly Fraction
    // ============================================

    #[test]
    fn kelly_zero_when_no_losses_observed() {
        assert_eq!(kelly_fraction(0.6, 0.05, 0.0), 0.0);
    }

    #[test]
    fn kelly_clamped_to_unit_interval() {
        // Certain winner would exceed 1.0 unclamped.
        assert_eq!(kelly_fraction(1.0, 1.0, 0.001), 1.0);
        // Certain loser clamps at zero.
        assert_eq!(kelly_fraction(0.0, 0.05, 0.05), 0.0);
    }

    #[test]
    fn kelly_even_payoff_formula() {
        // b = 1, p = 0.6: f = (0.6 - 0.4) / 1 = 0.2
        let f = kelly_fraction(0.6, 0.05, 0.05);
        assert!((f - 0.2).abs() < 1e-12);
    }

    // ============================================
    // Medians, IQR, Drawdown
    // ============================================

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn iqr_of_uniform_sequence() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let range = iqr(&values).unwrap();
        assert!((range - 4.0).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_peak_to_trough() {
        let series = [100.0, 120.0, 90.0, 110.0];
        let dd = max_drawdown(&series);
        assert!((dd - 0.25).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_monotone_series_is_zero() {
        let series = [100.0, 101.0, 102.0];
        assert_eq!(max_drawdown(&series), 0.0);
    }

    #[test]
    fn simple_returns_skips_zero_base() {
        let rets = simple_returns(&[100.0, 0.0, 110.0]);
        assert_eq!(rets.len(), 1);
    }
}
