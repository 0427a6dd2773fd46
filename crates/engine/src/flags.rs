//! Anomaly flag generation.
//!
//! A deterministic, pure function of a filled scorecard plus two optional
//! contextual signals. Flags are emitted in a fixed order and each
//! condition can fire at most once, so the output is order-stable and
//! duplicate-free by construction.

use dossier_core::config::FlagConfig;
use dossier_core::models::{FlagContext, QuantScorecard};

/// Generates anomaly flags for a filled scorecard.
#[must_use]
pub fn generate_flags(
    card: &QuantScorecard,
    ctx: &FlagContext,
    config: &FlagConfig,
) -> Vec<String> {
    let mut flags = Vec::new();

    if card.robust_z_score_20d >= config.z_high {
        flags.push("z_score_high".to_string());
    } else if card.robust_z_score_20d <= config.z_low {
        flags.push("z_score_low".to_string());
    }

    if card.bollinger_pct_b > 1.0 {
        flags.push("price_above_upper_band".to_string());
    } else if card.bollinger_pct_b < 0.0 {
        flags.push("price_below_lower_band".to_string());
    }

    if card.percentile_rank_volume >= config.volume_spike_percentile {
        flags.push("volume_spike_95th".to_string());
    }

    if card.max_drawdown > config.drawdown_limit {
        flags.push("drawdown_exceeds_20pct".to_string());
    }

    if card.calmar_ratio > config.exceptional_calmar {
        flags.push("exceptional_calmar".to_string());
    }

    if card.sortino_ratio < 0.0 {
        flags.push("negative_sortino".to_string());
    }

    if let Some(days) = ctx.days_to_earnings {
        if days > 0 && days <= config.earnings_window_days {
            flags.push(format!("earnings_in_{days}d_days"));
        }
    }

    if let Some(net) = ctx.net_insider_buying_usd {
        if net > config.insider_threshold_usd {
            flags.push("insider_buying_spike".to_string());
        } else if net < -config.insider_threshold_usd {
            flags.push("insider_selling_spike".to_string());
        }
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn base_card() -> QuantScorecard {
        QuantScorecard::neutral("TEST", Utc::now())
    }

    fn config() -> FlagConfig {
        FlagConfig::default()
    }

    // ============================================
    // Z-Score and Band Flags
    // ============================================

    #[test]
    fn high_and_low_z_are_mutually_exclusive() {
        let mut card = base_card();
        card.robust_z_score_20d = 2.5;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"z_score_high".to_string()));
        assert!(!flags.contains(&"z_score_low".to_string()));

        card.robust_z_score_20d = -2.5;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"z_score_low".to_string()));
        assert!(!flags.contains(&"z_score_high".to_string()));
    }

    #[test]
    fn band_breach_flags() {
        let mut card = base_card();
        card.bollinger_pct_b = 1.1;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"price_above_upper_band".to_string()));

        card.bollinger_pct_b = -0.1;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"price_below_lower_band".to_string()));
    }

    #[test]
    fn neutral_card_emits_nothing() {
        let flags = generate_flags(&base_card(), &FlagContext::default(), &config());
        assert!(flags.is_empty());
    }

    // ============================================
    // Volume, Drawdown, Ratio Flags
    // ============================================

    #[test]
    fn volume_spike_at_95th() {
        let mut card = base_card();
        card.percentile_rank_volume = 95.0;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"volume_spike_95th".to_string()));

        card.percentile_rank_volume = 94.9;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(!flags.contains(&"volume_spike_95th".to_string()));
    }

    #[test]
    fn drawdown_flag_above_20_pct() {
        let mut card = base_card();
        card.max_drawdown = 0.25;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"drawdown_exceeds_20pct".to_string()));
    }

    #[test]
    fn calmar_and_sortino_flags() {
        let mut card = base_card();
        card.calmar_ratio = 4.0;
        card.sortino_ratio = -0.3;
        let flags = generate_flags(&card, &FlagContext::default(), &config());
        assert!(flags.contains(&"exceptional_calmar".to_string()));
        assert!(flags.contains(&"negative_sortino".to_string()));
    }

    // ============================================
    // Contextual Signals
    // ============================================

    #[test]
    fn earnings_flag_only_within_window() {
        let card = base_card();
        for (days, expected) in [(0, false), (1, true), (5, true), (6, false)] {
            let ctx = FlagContext {
                days_to_earnings: Some(days),
                net_insider_buying_usd: None,
            };
            let flags = generate_flags(&card, &ctx, &config());
            assert_eq!(
                flags.iter().any(|f| f.starts_with("earnings_in_")),
                expected,
                "days = {days}"
            );
        }
    }

    #[test]
    fn earnings_flag_carries_day_count() {
        let ctx = FlagContext {
            days_to_earnings: Some(3),
            net_insider_buying_usd: None,
        };
        let flags = generate_flags(&base_card(), &ctx, &config());
        assert!(flags.contains(&"earnings_in_3d_days".to_string()));
    }

    #[test]
    fn insider_flags_at_half_million_threshold() {
        let card = base_card();
        let buying = FlagContext {
            days_to_earnings: None,
            net_insider_buying_usd: Some(600_000.0),
        };
        assert!(generate_flags(&card, &buying, &config())
            .contains(&"insider_buying_spike".to_string()));

        let selling = FlagContext {
            days_to_earnings: None,
            net_insider_buying_usd: Some(-600_000.0),
        };
        assert!(generate_flags(&card, &selling, &config())
            .contains(&"insider_selling_spike".to_string()));

        let quiet = FlagContext {
            days_to_earnings: None,
            net_insider_buying_usd: Some(400_000.0),
        };
        assert!(generate_flags(&card, &quiet, &config()).is_empty());
    }

    // ============================================
    // Ordering and Dedup
    // ============================================

    #[test]
    fn flags_are_order_stable_and_unique() {
        let mut card = base_card();
        card.robust_z_score_20d = 3.0;
        card.bollinger_pct_b = 1.2;
        card.percentile_rank_volume = 99.0;
        card.max_drawdown = 0.3;
        card.calmar_ratio = 5.0;
        card.sortino_ratio = -1.0;
        let ctx = FlagContext {
            days_to_earnings: Some(2),
            net_insider_buying_usd: Some(1_000_000.0),
        };

        let first = generate_flags(&card, &ctx, &config());
        let second = generate_flags(&card, &ctx, &config());
        assert_eq!(first, second);

        let mut deduped = first.clone();
        deduped.dedup();
        assert_eq!(first, deduped);
        assert_eq!(
            first,
            vec![
                "z_score_high",
                "price_above_upper_band",
                "volume_spike_95th",
                "drawdown_exceeds_20pct",
                "exceptional_calmar",
                "negative_sortino",
                "earnings_in_2d_days",
                "insider_buying_spike",
            ]
        );
    }
}
