use crate::events::EngineEvent;
use crate::models::QuantScorecard;
use anyhow::Result;
use async_trait::async_trait;

/// Structured event sink injected into the engine at construction.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &EngineEvent);
}

/// Storage collaborator for computed scorecards.
///
/// The engine issues exactly one append per computation; implementations
/// own durability concerns.
#[async_trait]
pub trait ScorecardStore: Send + Sync {
    async fn append(&self, scorecard: &QuantScorecard) -> Result<()>;
}
