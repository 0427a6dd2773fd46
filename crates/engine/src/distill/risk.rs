//! Risk report: ratio ladders, tail-loss framing, and drawdown room.

use dossier_core::models::{QuantScorecard, RiskMetrics};

use crate::distill::push_section;

pub(crate) const NO_DATA_MESSAGE: &str = "No risk data available.";

fn ratio_label(value: f64) -> &'static str {
    if value >= 2.0 {
        "excellent"
    } else if value >= 1.0 {
        "good"
    } else if value >= 0.5 {
        "adequate"
    } else if value >= 0.0 {
        "weak"
    } else {
        "negative (losing risk-adjusted money)"
    }
}

fn omega_label(omega: f64) -> &'static str {
    if omega >= 99.0 {
        "no losing periods in sample"
    } else if omega > 1.5 {
        "gains dominate losses"
    } else if omega > 1.0 {
        "modest edge over losses"
    } else {
        "losses outweigh gains"
    }
}

#[must_use]
pub(crate) fn distill(
    risk_metrics: Option<&RiskMetrics>,
    scorecard: Option<&QuantScorecard>,
    position_value: Option<f64>,
) -> String {
    if risk_metrics.is_none() && scorecard.is_none() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut out = String::new();

    if let Some(rm) = risk_metrics {
        push_section(&mut out, "Risk-Adjusted Returns");
        out.push_str(&format!(
            "Sharpe ratio:          {:.2} ({})\n",
            rm.sharpe_ratio,
            ratio_label(rm.sharpe_ratio)
        ));
        out.push_str(&format!(
            "Sortino ratio:         {:.2} ({})\n",
            rm.sortino_ratio,
            ratio_label(rm.sortino_ratio)
        ));
        out.push('\n');

        push_section(&mut out, "Tail Risk");
        match position_value {
            Some(value) => {
                out.push_str(&format!(
                    "VaR (95%, 1d):         {:.1}% (${:.0} on the current position)\n",
                    rm.var_95 * 100.0,
                    rm.var_95 * value
                ));
                out.push_str(&format!(
                    "CVaR (95%, 1d):        {:.1}% (${:.0} expected in the tail)\n",
                    rm.cvar_95 * 100.0,
                    rm.cvar_95 * value
                ));
            }
            None => {
                out.push_str(&format!("VaR (95%, 1d):         {:.1}%\n", rm.var_95 * 100.0));
                out.push_str(&format!("CVaR (95%, 1d):        {:.1}%\n", rm.cvar_95 * 100.0));
            }
        }
        out.push('\n');

        push_section(&mut out, "Drawdown");
        out.push_str(&format!(
            "Current drawdown:      {:.1}%\n",
            rm.current_drawdown * 100.0
        ));
        out.push_str(&format!(
            "Historical max:        {:.1}%\n",
            rm.max_drawdown * 100.0
        ));
        let room = rm.max_drawdown - rm.current_drawdown;
        if room > 0.0 {
            out.push_str(&format!(
                "Room to historical max: {:.1}pp before matching the worst decline\n",
                room * 100.0
            ));
        } else if rm.current_drawdown > 0.0 {
            out.push_str("Current drawdown has reached or exceeded the historical max\n");
        }
        out.push('\n');
    }

    if let Some(card) = scorecard {
        push_section(&mut out, "Position Sizing Signals");
        out.push_str(&format!(
            "Kelly fraction:        {:.1}% (half-Kelly {:.1}%)\n",
            card.kelly_fraction * 100.0,
            card.half_kelly * 100.0
        ));
        out.push_str(&format!(
            "Omega ratio:           {:.2} ({})\n",
            card.omega_ratio,
            omega_label(card.omega_ratio)
        ));
        if !card.flags.is_empty() {
            out.push_str(&format!("Active flags:          {}\n", card.flags.join(", ")));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn metrics() -> RiskMetrics {
        RiskMetrics {
            sharpe_ratio: 1.3,
            sortino_ratio: 1.8,
            var_95: 0.03,
            cvar_95: 0.05,
            max_drawdown: 0.25,
            current_drawdown: 0.08,
        }
    }

    // ============================================
    // Empty Input Handling
    // ============================================

    #[test]
    fn no_inputs_returns_literal_message() {
        assert_eq!(distill(None, None, None), "No risk data available.");
    }

    #[test]
    fn scorecard_alone_produces_sizing_section_only() {
        let card = QuantScorecard::neutral("TEST", Utc::now());
        let report = distill(None, Some(&card), None);
        assert!(report.contains("Position Sizing Signals"));
        assert!(!report.contains("Tail Risk"));
    }

    // ============================================
    // Ratio Ladder
    // ============================================

    #[test]
    fn ratio_ladder_boundaries() {
        assert_eq!(ratio_label(2.0), "excellent");
        assert_eq!(ratio_label(1.0), "good");
        assert_eq!(ratio_label(0.5), "adequate");
        assert_eq!(ratio_label(0.0), "weak");
        assert_eq!(ratio_label(-0.1), "negative (losing risk-adjusted money)");
    }

    #[test]
    fn omega_interpretation() {
        assert_eq!(omega_label(99.0), "no losing periods in sample");
        assert_eq!(omega_label(2.0), "gains dominate losses");
        assert_eq!(omega_label(1.2), "modest edge over losses");
        assert_eq!(omega_label(0.8), "losses outweigh gains");
    }

    // ============================================
    // Dollar Terms and Drawdown Room
    // ============================================

    #[test]
    fn position_value_switches_var_to_dollars() {
        let rm = metrics();
        let report = distill(Some(&rm), None, Some(100_000.0));
        assert!(report.contains("$3000"));
        assert!(report.contains("$5000"));
    }

    #[test]
    fn without_position_value_var_stays_in_percent() {
        let rm = metrics();
        let report = distill(Some(&rm), None, None);
        assert!(report.contains("3.0%"));
        assert!(!report.contains('$'));
    }

    #[test]
    fn drawdown_room_is_reported() {
        let rm = metrics();
        let report = distill(Some(&rm), None, None);
        assert!(report.contains("17.0pp"));
    }

    #[test]
    fn exhausted_drawdown_room_warns() {
        let rm = RiskMetrics {
            current_drawdown: 0.30,
            max_drawdown: 0.25,
            ..metrics()
        };
        let report = distill(Some(&rm), None, None);
        assert!(report.contains("reached or exceeded"));
    }

    #[test]
    fn flags_are_listed_verbatim() {
        let mut card = QuantScorecard::neutral("TEST", Utc::now());
        card.flags = vec!["z_score_high".to_string(), "volume_spike_95th".to_string()];
        let report = distill(None, Some(&card), None);
        assert!(report.contains("z_score_high, volume_spike_95th"));
    }
}
