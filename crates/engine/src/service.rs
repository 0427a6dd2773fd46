//! Database-backed orchestration of the pure engine.
//!
//! Loads point-in-time inputs from the repositories, runs the scorecard
//! computer and pattern distiller, and appends the resulting scorecard
//! through the storage collaborator. All data is filtered to be at or
//! before the requested date so the packet never sees the future.

use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use dossier_core::config::EngineConfig;
use dossier_core::events::{EngineEvent, TracingSink};
use dossier_core::models::{FlagContext, PricePoint, QuantScorecard, WinLossContext};
use dossier_core::traits::{EventSink, ScorecardStore};
use dossier_data::{Repositories, StoreError};

use crate::distill::PatternDistiller;
use crate::scorecard::ScorecardComputer;
use crate::stats;

/// Trading days of history loaded for a computation.
const HISTORY_LIMIT: i64 = 365;
/// Indicator rows loaded for pattern detection.
const TECHNICAL_LIMIT: i64 = 120;
/// Trailing window for net insider activity.
const INSIDER_WINDOW_DAYS: i64 = 90;

/// One assembled context packet for the LLM orchestration consumer.
///
/// The text blocks are passed verbatim into prompts; the scorecard is
/// serialized as a structured object.
#[derive(Debug, Clone, Serialize)]
pub struct DossierPacket {
    pub ticker: String,
    pub price_action: String,
    pub fundamentals: String,
    pub risk: String,
    pub scorecard: QuantScorecard,
}

/// Service wiring repositories to the pure engine.
pub struct DossierService {
    repos: Repositories,
    computer: ScorecardComputer,
    distiller: PatternDistiller,
    sink: Arc<dyn EventSink>,
}

impl DossierService {
    #[must_use]
    pub fn new(pool: PgPool, config: EngineConfig) -> Self {
        Self::with_sink(pool, config, Arc::new(TracingSink))
    }

    #[must_use]
    pub fn with_sink(pool: PgPool, config: EngineConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            repos: Repositories::new(pool),
            computer: ScorecardComputer::new(config.signal, config.flags, sink.clone()),
            distiller: PatternDistiller::new(config.pattern),
            sink,
        }
    }

    /// Computes and persists a fresh scorecard for `ticker` as of the
    /// given date.
    ///
    /// The computation itself cannot fail; only loading inputs or the
    /// final append can.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownTicker`] when the store has no bars for
    /// the ticker, or an error if a repository query or the append fails.
    pub async fn compute_scorecard(
        &self,
        ticker: &str,
        as_of: NaiveDate,
    ) -> Result<QuantScorecard> {
        let bars = self
            .repos
            .daily_bars
            .query_history(ticker, as_of, HISTORY_LIMIT)
            .await?;
        if bars.is_empty() {
            return Err(StoreError::UnknownTicker(ticker.to_string()).into());
        }
        let prices: Vec<PricePoint> = bars.iter().map(|b| b.to_point()).collect();

        let latest_technical = self.repos.technicals.latest(ticker, as_of).await?;
        let bollinger = latest_technical.as_ref().and_then(|t| t.bollinger_bounds());

        let risk_record = self.repos.risk_metrics.latest(ticker, as_of).await?;
        let risk_metrics = risk_record.as_ref().map(|r| r.to_metrics());

        let closes: Vec<f64> = prices.iter().map(|p| p.close).collect();
        let win_loss = win_loss_from_returns(&stats::simple_returns(&closes));

        let flag_ctx = FlagContext {
            days_to_earnings: self
                .repos
                .corporate
                .days_to_next_earnings(ticker, as_of)
                .await?,
            net_insider_buying_usd: self
                .repos
                .corporate
                .net_insider_buying(ticker, as_of, INSIDER_WINDOW_DAYS)
                .await?,
        };

        let card = self.computer.compute(
            ticker,
            &prices,
            risk_metrics.as_ref(),
            bollinger,
            win_loss,
            flag_ctx,
        );

        // The append is the only side effect; callers may cancel around it.
        self.repos.scorecards.append(&card).await?;
        self.sink.emit(&EngineEvent::ScorecardPersisted {
            ticker: ticker.to_string(),
        });

        Ok(card)
    }

    /// Builds the full three-report packet for `ticker`.
    ///
    /// Reuses the latest persisted scorecard when one exists, otherwise
    /// computes (and persists) a fresh one.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownTicker`] when the store has no bars for
    /// the ticker, or an error if a repository query fails.
    pub async fn build_dossier(
        &self,
        ticker: &str,
        as_of: NaiveDate,
        position_value: Option<f64>,
    ) -> Result<DossierPacket> {
        let bars = self
            .repos
            .daily_bars
            .query_history(ticker, as_of, HISTORY_LIMIT)
            .await?;
        if bars.is_empty() {
            return Err(StoreError::UnknownTicker(ticker.to_string()).into());
        }
        let prices: Vec<PricePoint> = bars.iter().map(|b| b.to_point()).collect();

        let technical_rows = self
            .repos
            .technicals
            .query_history(ticker, as_of, TECHNICAL_LIMIT)
            .await?;
        let technicals: Vec<_> = technical_rows.iter().map(|t| t.to_snapshot()).collect();

        let scorecard = match self.repos.scorecards.latest(ticker, as_of).await? {
            Some(record) => record.to_scorecard(),
            None => self.compute_scorecard(ticker, as_of).await?,
        };

        let fundamental_record = self
            .repos
            .fundamentals
            .latest_snapshot(ticker, as_of)
            .await?;
        let snapshot = fundamental_record.as_ref().map(|f| f.to_snapshot());
        let history: Vec<_> = self
            .repos
            .fundamentals
            .financial_history(ticker)
            .await?
            .iter()
            .map(|r| r.to_record())
            .collect();

        let risk_record = self.repos.risk_metrics.latest(ticker, as_of).await?;
        let risk_metrics = risk_record.as_ref().map(|r| r.to_metrics());

        let price_action =
            self.distiller
                .distill_price_action(&prices, &technicals, Some(&scorecard));
        let fundamentals = self
            .distiller
            .distill_fundamentals(snapshot.as_ref(), &history);
        let risk =
            self.distiller
                .distill_risk(risk_metrics.as_ref(), Some(&scorecard), position_value);

        for (domain, text) in [
            ("price_action", &price_action),
            ("fundamentals", &fundamentals),
            ("risk", &risk),
        ] {
            self.sink.emit(&EngineEvent::DistillationBuilt {
                ticker: ticker.to_string(),
                domain,
                bytes: text.len(),
            });
        }

        Ok(DossierPacket {
            ticker: ticker.to_string(),
            price_action,
            fundamentals,
            risk,
            scorecard,
        })
    }
}

/// Derives Kelly inputs from a daily return series.
///
/// Win rate is the fraction of up days; payoff sides are the mean win and
/// mean absolute loss. `None` when the series is empty.
fn win_loss_from_returns(returns: &[f64]) -> Option<WinLossContext> {
    if returns.is_empty() {
        return None;
    }
    let wins: Vec<f64> = returns.iter().copied().filter(|&r| r > 0.0).collect();
    let losses: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();

    Some(WinLossContext {
        win_rate: wins.len() as f64 / returns.len() as f64,
        avg_win: stats::mean(&wins).unwrap_or(0.0),
        avg_loss: stats::mean(&losses).map_or(0.0, f64::abs),
    })
}
