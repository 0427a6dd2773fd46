use serde::{Deserialize, Serialize};

/// Engine configuration: statistical windows and classification thresholds.
///
/// Defaults reproduce the engine's canonical constants; deployments only
/// override them through `ConfigLoader`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub signal: SignalConfig,
    pub flags: FlagConfig,
    pub pattern: PatternConfig,
}

/// Windows and guards for the scorecard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Trailing window for both z-scores.
    pub z_window: usize,
    /// Normal-consistency constant for the IQR-based robust z-score.
    pub robust_iqr_scale: f64,
    /// Excess-return threshold for the omega ratio.
    pub omega_threshold: f64,
    /// Cap applied when losses vanish and the ratio has no meaningful bound.
    pub omega_cap: f64,
}

/// Thresholds driving anomaly flag emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagConfig {
    pub z_high: f64,
    pub z_low: f64,
    pub volume_spike_percentile: f64,
    pub drawdown_limit: f64,
    pub exceptional_calmar: f64,
    pub earnings_window_days: i64,
    pub insider_threshold_usd: f64,
}

/// Windows and thresholds for the pattern distiller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Minimum closes required before any price-action analysis runs.
    pub min_closes: usize,
    /// Snapshots examined for crossover events.
    pub crossover_lookback: usize,
    /// Sessions split in half for divergence detection.
    pub divergence_window: usize,
    /// Points examined for a monotone MACD histogram trend.
    pub histogram_trend_window: usize,
    /// Symmetric half-window for the local-extrema scan.
    pub sr_window: usize,
    /// Cluster merge distance as a fraction of the reference price.
    pub sr_cluster_pct: f64,
    /// Levels reported per side after clustering.
    pub max_levels: usize,
    pub volume_recent_window: usize,
    pub volume_baseline_window: usize,
    /// Percent change that separates surging/declining from normal volume.
    pub volume_shift_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            flags: FlagConfig::default(),
            pattern: PatternConfig::default(),
        }
    }
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            z_window: 20,
            robust_iqr_scale: 0.7413,
            omega_threshold: 0.0,
            omega_cap: 99.0,
        }
    }
}

impl Default for FlagConfig {
    fn default() -> Self {
        Self {
            z_high: 2.0,
            z_low: -2.0,
            volume_spike_percentile: 95.0,
            drawdown_limit: 0.20,
            exceptional_calmar: 3.0,
            earnings_window_days: 5,
            insider_threshold_usd: 500_000.0,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_closes: 5,
            crossover_lookback: 10,
            divergence_window: 20,
            histogram_trend_window: 5,
            sr_window: 5,
            sr_cluster_pct: 0.02,
            max_levels: 3,
            volume_recent_window: 20,
            volume_baseline_window: 40,
            volume_shift_pct: 30.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.signal.z_window, 20);
        assert!((config.signal.robust_iqr_scale - 0.7413).abs() < 1e-12);
        assert_eq!(config.signal.omega_cap, 99.0);
        assert_eq!(config.flags.insider_threshold_usd, 500_000.0);
        assert_eq!(config.flags.earnings_window_days, 5);
        assert_eq!(config.pattern.sr_window, 5);
        assert_eq!(config.pattern.sr_cluster_pct, 0.02);
        assert_eq!(config.pattern.max_levels, 3);
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = EngineConfig::default();
        let toml = toml_like(&config);
        assert!(toml.contains("z_window"));
    }

    fn toml_like(config: &EngineConfig) -> String {
        serde_json::to_string(config).unwrap()
    }
}
