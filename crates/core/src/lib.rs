pub mod config;
pub mod config_loader;
pub mod events;
pub mod models;
pub mod traits;

pub use config::{EngineConfig, FlagConfig, PatternConfig, SignalConfig};
pub use config_loader::ConfigLoader;
pub use events::{EngineEvent, TracingSink};
pub use models::{
    BollingerBounds, FinancialHistoryRecord, FlagContext, FundamentalSnapshot, PricePoint,
    QuantScorecard, RiskMetrics, TechnicalSnapshot, WinLossContext,
};
pub use traits::{EventSink, ScorecardStore};
