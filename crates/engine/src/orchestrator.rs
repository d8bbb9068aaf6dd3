use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use common::{
    Alert, AnalysisResult, Error, MarketDataProvider, NewsProvider, Result, SentimentClassifier,
    SentimentTally,
};
use signals::{AnalyzerConfig, IndicatorCalculator, SentimentAggregator, SignalDetector};

/// Drives each watchlist symbol through indicators, signal detection and
/// sentiment, and merges the alerts.
///
/// Symbols are processed one at a time in watchlist order. A failure for one
/// symbol is logged and never stops the run. The orchestrator keeps no state
/// between runs.
pub struct AlertOrchestrator {
    config: AnalyzerConfig,
    calculator: IndicatorCalculator,
    detector: SignalDetector,
    aggregator: SentimentAggregator,
    market: Arc<dyn MarketDataProvider>,
    news: Arc<dyn NewsProvider>,
    classifier: Arc<dyn SentimentClassifier>,
}

impl AlertOrchestrator {
    pub fn new(
        config: AnalyzerConfig,
        market: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsProvider>,
        classifier: Arc<dyn SentimentClassifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            calculator: IndicatorCalculator::from_config(&config)?,
            detector: SignalDetector::from_config(&config),
            aggregator: SentimentAggregator::from_config(&config),
            config,
            market,
            news,
            classifier,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Evaluate the whole watchlist once.
    pub async fn run(&self) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        for symbol in &self.config.symbols {
            info!(symbol = %symbol, "Analyzing");
            result.extend(self.analyze_symbol(symbol).await);
        }
        info!(
            symbols = self.config.symbols.len(),
            alerts = result.len(),
            "Run complete"
        );
        result
    }

    /// Run once per `period` tick, passing each result to `on_result`, until
    /// `shutdown` resolves. A run still in flight at shutdown is abandoned.
    /// Returns the number of completed runs.
    pub async fn run_every<S, F>(&self, period: Duration, shutdown: S, mut on_result: F) -> usize
    where
        S: Future<Output = ()>,
        F: FnMut(&AnalysisResult),
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(period);
        let mut runs = 0;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => {}
            }
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    warn!("Shutdown during a run — abandoning it");
                    break;
                }
                result = self.run() => {
                    runs += 1;
                    on_result(&result);
                }
            }
        }

        info!(runs, "Shutdown signal received. Exiting.");
        runs
    }

    /// Technical alerts followed by the sentiment alert, if any.
    ///
    /// Without usable price data the symbol contributes nothing and news is
    /// not queried. A news or classifier failure only drops the sentiment
    /// alert.
    pub async fn analyze_symbol(&self, symbol: &str) -> Vec<Alert> {
        let series = match self.market.price_history(symbol, self.config.lookback).await {
            Ok(series) => series,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price data unavailable — skipping symbol");
                return Vec::new();
            }
        };

        let Some(indicators) = self.calculator.compute(&series) else {
            warn!(symbol = %symbol, bars = series.len(), "No indicators — skipping symbol");
            return Vec::new();
        };

        let mut alerts = self.detector.detect(symbol, &indicators);

        let tally = match self.sentiment_tally(symbol).await {
            Ok(tally) => tally,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Sentiment unavailable");
                SentimentTally::default()
            }
        };
        if tally.is_empty() {
            debug!(symbol = %symbol, "No headlines classified");
        } else {
            info!(
                symbol = %symbol,
                positive = tally.positive,
                negative = tally.negative,
                neutral = tally.neutral,
                "Sentiment tally"
            );
        }
        alerts.extend(self.aggregator.evaluate(symbol, &tally));

        alerts
    }

    /// Fetch headlines and classify each non-empty title. Any failure makes
    /// the whole batch unavailable.
    async fn sentiment_tally(&self, symbol: &str) -> Result<SentimentTally> {
        let limit = self.config.sentiment.max_headlines;
        let titles = self
            .news
            .headlines(symbol, limit)
            .await
            .map_err(sentiment_unavailable)?;

        let mut labels = Vec::with_capacity(titles.len());
        for title in titles
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .take(limit)
        {
            let label = self
                .classifier
                .classify(title)
                .await
                .map_err(sentiment_unavailable)?;
            labels.push(label);
        }

        Ok(SentimentAggregator::tally(labels))
    }
}

fn sentiment_unavailable(e: Error) -> Error {
    match e {
        Error::SentimentUnavailable(_) => e,
        other => Error::SentimentUnavailable(other.to_string()),
    }
}
