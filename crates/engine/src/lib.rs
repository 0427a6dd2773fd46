//! Deterministic quant signal and pattern distillation engine.
//!
//! Two stateless components over read-only time series: the scorecard
//! computer (robust z-score, Bollinger %B, percentile ranks, omega ratio,
//! Kelly sizing, anomaly flags) and the pattern distiller (trend regime,
//! crossovers, divergences, support/resistance clustering, volume profile,
//! plus fundamentals and risk text reports). Nothing here calls a model or
//! makes a trading decision; the output is one structured scorecard and
//! three plain-text context blocks for the orchestration layer.

pub mod distill;
pub mod flags;
pub mod scorecard;
pub mod service;
pub mod stats;

pub use distill::PatternDistiller;
pub use scorecard::ScorecardComputer;
pub use service::{DossierPacket, DossierService};
