//! Fundamentals report: valuation, quality, and multi-year trend lines.
//!
//! Every subsection is gated on its inputs being present; absent data
//! drops the line instead of printing a misleading zero.

use std::fmt;

use dossier_core::models::{FinancialHistoryRecord, FundamentalSnapshot};

use crate::distill::push_section;

pub(crate) const NO_DATA_MESSAGE: &str = "No fundamental data available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValuationBucket {
    Unprofitable,
    DeepValue,
    Fair,
    GrowthPremium,
    Rich,
}

impl fmt::Display for ValuationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ValuationBucket::Unprofitable => "negative earnings (unprofitable or distressed)",
            ValuationBucket::DeepValue => "deep value territory",
            ValuationBucket::Fair => "fairly valued",
            ValuationBucket::GrowthPremium => "growth premium",
            ValuationBucket::Rich => "richly valued",
        };
        f.write_str(text)
    }
}

fn classify_pe(pe: f64) -> ValuationBucket {
    if pe < 0.0 {
        ValuationBucket::Unprofitable
    } else if pe < 10.0 {
        ValuationBucket::DeepValue
    } else if pe < 18.0 {
        ValuationBucket::Fair
    } else if pe < 30.0 {
        ValuationBucket::GrowthPremium
    } else {
        ValuationBucket::Rich
    }
}

fn classify_peg(peg: f64) -> &'static str {
    if peg < 0.0 {
        "not meaningful (negative growth or earnings)"
    } else if peg < 1.0 {
        "cheap relative to growth"
    } else if peg < 2.0 {
        "fair relative to growth"
    } else {
        "expensive relative to growth"
    }
}

fn classify_ps(ps: f64) -> &'static str {
    if ps < 1.0 {
        "low sales multiple"
    } else if ps < 4.0 {
        "moderate sales multiple"
    } else {
        "high sales multiple"
    }
}

fn classify_pb(pb: f64) -> &'static str {
    if pb < 1.0 {
        "below book value"
    } else if pb < 3.0 {
        "moderate book multiple"
    } else {
        "high book multiple"
    }
}

fn classify_cash_conversion(ratio: f64) -> &'static str {
    if ratio >= 1.2 {
        "strong cash conversion"
    } else if ratio >= 0.8 {
        "adequate cash conversion"
    } else {
        "weak cash conversion (earnings-quality concern)"
    }
}

fn classify_altman(z: f64) -> &'static str {
    if z >= 3.0 {
        "safe zone"
    } else if z >= 1.8 {
        "grey zone"
    } else {
        "distress zone"
    }
}

fn classify_piotroski(f: f64) -> &'static str {
    if f >= 7.0 {
        "strong"
    } else if f >= 4.0 {
        "middling"
    } else {
        "weak"
    }
}

/// Compound annual growth rate across a multi-year span.
fn cagr(first: f64, last: f64, years: f64) -> Option<f64> {
    if first <= 0.0 || last <= 0.0 || years <= 0.0 {
        return None;
    }
    Some(((last / first).powf(1.0 / years) - 1.0) * 100.0)
}

fn direction(first: f64, last: f64) -> &'static str {
    if last > first {
        "expanding"
    } else if last < first {
        "contracting"
    } else {
        "flat"
    }
}

fn format_market_cap(cap: f64) -> String {
    if cap >= 1e12 {
        format!("${:.2}T", cap / 1e12)
    } else if cap >= 1e9 {
        format!("${:.2}B", cap / 1e9)
    } else {
        format!("${:.0}M", cap / 1e6)
    }
}

#[must_use]
pub(crate) fn distill(
    snapshot: Option<&FundamentalSnapshot>,
    history: &[FinancialHistoryRecord],
) -> String {
    let snapshot_empty = snapshot.map_or(true, FundamentalSnapshot::is_empty);
    if snapshot_empty && history.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut out = String::new();

    if let Some(snap) = snapshot.filter(|s| !s.is_empty()) {
        let mut lines = Vec::new();
        if let Some(cap) = snap.market_cap {
            lines.push(format!("Market cap:            {}", format_market_cap(cap)));
        }
        if let Some(pe) = snap.trailing_pe {
            lines.push(format!("Trailing P/E:          {pe:.1} ({})", classify_pe(pe)));
        }
        if let (Some(fwd), Some(trail)) = (snap.forward_pe, snap.trailing_pe) {
            let outlook = if fwd < trail {
                "market expects earnings growth"
            } else if fwd > trail {
                "market expects earnings contraction"
            } else {
                "flat earnings expected"
            };
            lines.push(format!("Forward P/E:           {fwd:.1} ({outlook})"));
        }
        if let Some(peg) = snap.peg_ratio {
            lines.push(format!("PEG ratio:             {peg:.2} ({})", classify_peg(peg)));
        }
        if let Some(ps) = snap.price_to_sales {
            lines.push(format!("Price/Sales:           {ps:.2} ({})", classify_ps(ps)));
        }
        if let Some(pb) = snap.price_to_book {
            lines.push(format!("Price/Book:            {pb:.2} ({})", classify_pb(pb)));
        }
        if !lines.is_empty() {
            push_section(&mut out, "Valuation");
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }

        let mut quality = Vec::new();
        if let (Some(ocf), Some(ni)) = (snap.operating_cash_flow, snap.net_income) {
            if ni != 0.0 {
                let ratio = ocf / ni;
                quality.push(format!(
                    "OCF / Net income:      {ratio:.2} ({})",
                    classify_cash_conversion(ratio)
                ));
            }
        }
        if let (Some(fcf), Some(cap)) = (snap.free_cash_flow, snap.market_cap) {
            if cap > 0.0 {
                let fcf_yield = fcf / cap * 100.0;
                quality.push(format!("FCF yield:             {fcf_yield:.1}%"));
            }
        }
        if let Some(z) = snap.altman_z {
            quality.push(format!("Altman Z-score:        {z:.2} ({})", classify_altman(z)));
        }
        if let Some(f_score) = snap.piotroski_f {
            quality.push(format!(
                "Piotroski F-score:     {f_score:.0}/9 ({})",
                classify_piotroski(f_score)
            ));
        }
        if let (Some(pe), Some(yield_10y)) = (snap.trailing_pe, snap.ten_year_treasury_yield) {
            if pe > 0.0 {
                let earnings_yield = 100.0 / pe;
                let gap = earnings_yield - yield_10y;
                let verdict = if gap > 0.0 {
                    "equity earns more than the 10-year"
                } else {
                    "bond yield beats the earnings yield"
                };
                quality.push(format!(
                    "Earnings-yield gap:    {gap:+.1}pp vs 10Y ({verdict})"
                ));
            }
        }
        if !quality.is_empty() {
            push_section(&mut out, "Financial Health");
            for line in quality {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
    }

    if !history.is_empty() {
        let mut sorted: Vec<&FinancialHistoryRecord> = history.iter().collect();
        sorted.sort_by_key(|r| r.year);
        let first = sorted[0];
        let last = sorted[sorted.len() - 1];
        let span_years = f64::from(last.year - first.year);

        let mut lines = Vec::new();
        if let (Some(r0), Some(r1)) = (first.revenue, last.revenue) {
            if let Some(growth) = cagr(r0, r1, span_years) {
                lines.push(format!(
                    "Revenue CAGR:          {growth:+.1}% over {}-{}",
                    first.year, last.year
                ));
            }
        }
        if let (Some(m0), Some(m1)) = (first.net_margin, last.net_margin) {
            lines.push(format!(
                "Net margin:            {:.1}% -> {:.1}% ({})",
                m0 * 100.0,
                m1 * 100.0,
                direction(m0, m1)
            ));
        }
        if let (Some(e0), Some(e1)) = (first.eps, last.eps) {
            lines.push(format!(
                "EPS:                   {e0:.2} -> {e1:.2} ({})",
                direction(e0, e1)
            ));
        }
        if !lines.is_empty() {
            push_section(&mut out, "Multi-Year Trend");
            for line in lines {
                out.push_str(&line);
                out.push('\n');
            }
        }
    }

    let trimmed = out.trim_end();
    if trimmed.is_empty() {
        NO_DATA_MESSAGE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, revenue: f64, net_margin: f64, eps: f64) -> FinancialHistoryRecord {
        FinancialHistoryRecord {
            year,
            revenue: Some(revenue),
            net_income: None,
            gross_margin: None,
            net_margin: Some(net_margin),
            eps: Some(eps),
        }
    }

    // ============================================
    // Empty Input Handling
    // ============================================

    #[test]
    fn no_inputs_returns_literal_message() {
        assert_eq!(distill(None, &[]), "No fundamental data available.");
    }

    #[test]
    fn empty_snapshot_counts_as_missing() {
        let snap = FundamentalSnapshot::default();
        assert_eq!(distill(Some(&snap), &[]), "No fundamental data available.");
    }

    // ============================================
    // Valuation Buckets
    // ============================================

    #[test]
    fn pe_buckets() {
        assert_eq!(classify_pe(-5.0), ValuationBucket::Unprofitable);
        assert_eq!(classify_pe(8.0), ValuationBucket::DeepValue);
        assert_eq!(classify_pe(15.0), ValuationBucket::Fair);
        assert_eq!(classify_pe(25.0), ValuationBucket::GrowthPremium);
        assert_eq!(classify_pe(45.0), ValuationBucket::Rich);
    }

    #[test]
    fn peg_buckets() {
        assert_eq!(classify_peg(0.8), "cheap relative to growth");
        assert_eq!(classify_peg(1.5), "fair relative to growth");
        assert_eq!(classify_peg(3.0), "expensive relative to growth");
    }

    #[test]
    fn altman_zones_at_boundaries() {
        assert_eq!(classify_altman(3.0), "safe zone");
        assert_eq!(classify_altman(1.8), "grey zone");
        assert_eq!(classify_altman(1.7), "distress zone");
    }

    #[test]
    fn piotroski_ladder() {
        assert_eq!(classify_piotroski(8.0), "strong");
        assert_eq!(classify_piotroski(5.0), "middling");
        assert_eq!(classify_piotroski(2.0), "weak");
    }

    // ============================================
    // Subsection Gating
    // ============================================

    #[test]
    fn pe_only_snapshot_reports_valuation_without_quality() {
        let snap = FundamentalSnapshot {
            trailing_pe: Some(22.0),
            ..FundamentalSnapshot::default()
        };
        let report = distill(Some(&snap), &[]);
        assert!(report.contains("Trailing P/E"));
        assert!(report.contains("growth premium"));
        assert!(!report.contains("Financial Health"));
    }

    #[test]
    fn cash_conversion_needs_both_fields() {
        let snap = FundamentalSnapshot {
            operating_cash_flow: Some(1.2e9),
            ..FundamentalSnapshot::default()
        };
        let report = distill(Some(&snap), &[]);
        assert!(!report.contains("OCF"));
    }

    #[test]
    fn earnings_yield_gap_uses_treasury_benchmark() {
        let snap = FundamentalSnapshot {
            trailing_pe: Some(20.0),
            ten_year_treasury_yield: Some(4.0),
            ..FundamentalSnapshot::default()
        };
        let report = distill(Some(&snap), &[]);
        // Earnings yield 5.0% vs 4.0% = +1.0pp.
        assert!(report.contains("+1.0pp"));
        assert!(report.contains("equity earns more"));
    }

    // ============================================
    // History Trend
    // ============================================

    #[test]
    fn history_is_sorted_before_trend_analysis() {
        // Deliberately unordered input; 2021 is the true base year.
        let history = vec![
            record(2023, 130.0, 0.22, 5.0),
            record(2021, 100.0, 0.20, 4.0),
            record(2022, 115.0, 0.21, 4.5),
        ];
        let report = distill(None, &history);
        assert!(report.contains("2021-2023"));
        assert!(report.contains("expanding"));
        // CAGR of 100 -> 130 over 2 years is ~14.0%.
        assert!(report.contains("+14.0%"));
    }

    #[test]
    fn contracting_margins_are_labelled() {
        let history = vec![record(2021, 100.0, 0.25, 4.0), record(2023, 120.0, 0.18, 3.0)];
        let report = distill(None, &history);
        assert!(report.contains("contracting"));
    }

    #[test]
    fn market_cap_formatting() {
        assert_eq!(format_market_cap(2.5e12), "$2.50T");
        assert_eq!(format_market_cap(3.4e9), "$3.40B");
        assert_eq!(format_market_cap(250e6), "$250M");
    }
}
