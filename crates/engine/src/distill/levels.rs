//! Support/resistance level detection and clustering.
//!
//! Local-extrema scan with a symmetric window, then nearby candidates are
//! merged into representative price levels. The min check precedes the max
//! check, so a point in a completely flat window classifies as support
//! only; that tie-break is intentional and load-bearing for parity with
//! historical reports.

/// Reference floor that keeps the cluster distance sane for near-zero
/// prices.
const MIN_REFERENCE: f64 = 1.0;

/// Clustered levels relative to the current price.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelSummary {
    /// Levels below the current price, closest first.
    pub supports: Vec<f64>,
    /// Levels above the current price, closest first.
    pub resistances: Vec<f64>,
}

/// Finds raw local-extrema candidates with a symmetric `window` on each
/// side.
///
/// Returns `(supports, resistances)`; a point equal to its window minimum
/// is support, else a point equal to the maximum is resistance.
#[must_use]
pub fn find_level_candidates(closes: &[f64], window: usize) -> (Vec<f64>, Vec<f64>) {
    let mut supports = Vec::new();
    let mut resistances = Vec::new();
    if closes.len() < 2 * window + 1 {
        return (supports, resistances);
    }

    for i in window..closes.len() - window {
        let slice = &closes[i - window..=i + window];
        let value = closes[i];
        let min = slice.iter().copied().fold(f64::INFINITY, f64::min);
        let max = slice.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if value == min {
            supports.push(value);
        } else if value == max {
            resistances.push(value);
        }
    }

    (supports, resistances)
}

/// Merges sorted nearby candidates into mean levels.
///
/// Candidates are sorted ascending and a candidate joins the current
/// cluster while its distance to the cluster's last member is below
/// `threshold_pct` of the reference price (floored at 1.0).
#[must_use]
pub fn cluster_levels(candidates: &[f64], threshold_pct: f64, reference: f64) -> Vec<f64> {
    if candidates.is_empty() {
        return Vec::new();
    }
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let merge_distance = threshold_pct * reference.max(MIN_REFERENCE);
    let mut clusters: Vec<Vec<f64>> = vec![vec![sorted[0]]];

    for &level in &sorted[1..] {
        let current = clusters.last_mut().unwrap();
        let last_member = *current.last().unwrap();
        if (level - last_member).abs() < merge_distance {
            current.push(level);
        } else {
            clusters.push(vec![level]);
        }
    }

    clusters
        .into_iter()
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect()
}

/// Full pipeline: scan, cluster, split around the current price, truncate
/// to `max_levels` per side.
#[must_use]
pub fn summarize_levels(
    closes: &[f64],
    window: usize,
    threshold_pct: f64,
    max_levels: usize,
) -> LevelSummary {
    let Some(&current) = closes.last() else {
        return LevelSummary::default();
    };
    let (support_candidates, resistance_candidates) = find_level_candidates(closes, window);

    let mut candidates = support_candidates;
    candidates.extend(resistance_candidates);
    let clustered = cluster_levels(&candidates, threshold_pct, current);

    let mut supports: Vec<f64> = clustered.iter().copied().filter(|&l| l < current).collect();
    supports.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    supports.truncate(max_levels);

    let mut resistances: Vec<f64> = clustered.iter().copied().filter(|&l| l > current).collect();
    resistances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    resistances.truncate(max_levels);

    LevelSummary {
        supports,
        resistances,
    }
}
