//! Structured engine events.
//!
//! The engine emits events through an injected sink rather than a global
//! logger so that computation stays free of process-wide mutable state.

use serde::Serialize;

use crate::traits::EventSink;

/// Events the engine emits during computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EngineEvent {
    /// A scorecard was produced for a ticker.
    ScorecardComputed {
        ticker: String,
        flag_count: usize,
    },
    /// An input sequence was shorter than a component's minimum window.
    InsufficientData {
        ticker: String,
        points: usize,
        required: usize,
    },
    /// A text distillation was assembled.
    DistillationBuilt {
        ticker: String,
        domain: &'static str,
        bytes: usize,
    },
    /// A computed scorecard was appended through the storage collaborator.
    ScorecardPersisted {
        ticker: String,
    },
}

/// Default sink: forwards events to `tracing` with structured fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &EngineEvent) {
        match event {
            EngineEvent::ScorecardComputed { ticker, flag_count } => {
                tracing::info!(ticker, flag_count, "scorecard computed");
            }
            EngineEvent::InsufficientData {
                ticker,
                points,
                required,
            } => {
                tracing::warn!(ticker, points, required, "insufficient data");
            }
            EngineEvent::DistillationBuilt {
                ticker,
                domain,
                bytes,
            } => {
                tracing::debug!(ticker, domain, bytes, "distillation built");
            }
            EngineEvent::ScorecardPersisted { ticker } => {
                tracing::info!(ticker, "scorecard persisted");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingSink {
        events: Mutex<Vec<EngineEvent>>,
    }

    impl EventSink for CapturingSink {
        fn emit(&self, event: &EngineEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn sink_receives_emitted_events() {
        let sink = CapturingSink::default();
        sink.emit(&EngineEvent::ScorecardComputed {
            ticker: "NVDA".to_string(),
            flag_count: 2,
        });
        let events = sink.events.lock().unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn tracing_sink_accepts_all_variants() {
        let sink = TracingSink;
        sink.emit(&EngineEvent::InsufficientData {
            ticker: "NVDA".to_string(),
            points: 3,
            required: 20,
        });
        sink.emit(&EngineEvent::DistillationBuilt {
            ticker: "NVDA".to_string(),
            domain: "price_action",
            bytes: 512,
        });
        sink.emit(&EngineEvent::ScorecardPersisted {
            ticker: "NVDA".to_string(),
        });
    }
}
