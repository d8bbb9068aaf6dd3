use async_trait::async_trait;

use crate::{LookbackPeriod, PriceSeries, Result, SentimentLabel};

/// Source of historical daily bars.
///
/// `YahooFinanceClient` in `crates/engine` implements this. Implementations
/// return `Error::DataUnavailable` rather than an empty series when the
/// symbol has no data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn price_history(&self, symbol: &str, lookback: LookbackPeriod) -> Result<PriceSeries>;
}

/// Source of recent news headlines.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Titles of the most recent articles about `symbol`, newest first,
    /// at most `limit` of them. Titles may be empty strings.
    async fn headlines(&self, symbol: &str, limit: usize) -> Result<Vec<String>>;
}

/// Classifies one headline into a polarity label.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentLabel>;
}
