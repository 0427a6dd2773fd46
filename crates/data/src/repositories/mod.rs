mod corporate_repo;
mod daily_bar_repo;
mod fundamental_repo;
mod risk_repo;
mod scorecard_repo;
mod technical_repo;

pub use corporate_repo::CorporateSignalRepository;
pub use daily_bar_repo::DailyBarRepository;
pub use fundamental_repo::FundamentalRepository;
pub use risk_repo::RiskMetricsRepository;
pub use scorecard_repo::ScorecardRepository;
pub use technical_repo::TechnicalRepository;

use sqlx::PgPool;

/// Aggregate of every repository over one shared pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub daily_bars: DailyBarRepository,
    pub technicals: TechnicalRepository,
    pub risk_metrics: RiskMetricsRepository,
    pub fundamentals: FundamentalRepository,
    pub corporate: CorporateSignalRepository,
    pub scorecards: ScorecardRepository,
}

impl Repositories {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            daily_bars: DailyBarRepository::new(pool.clone()),
            technicals: TechnicalRepository::new(pool.clone()),
            risk_metrics: RiskMetricsRepository::new(pool.clone()),
            fundamentals: FundamentalRepository::new(pool.clone()),
            corporate: CorporateSignalRepository::new(pool.clone()),
            scorecards: ScorecardRepository::new(pool),
        }
    }
}
