use tracing::debug;

use common::{Alert, AlertCategory, SentimentLabel, SentimentTally};

use crate::config::AnalyzerConfig;

/// Turns a tally of headline labels into at most one directional alert.
///
/// Positive fires when `positive > ratio * negative`, negative when
/// `negative > ratio * positive`. With no negatives, any positive headline
/// is enough; an even split or an empty tally stays quiet.
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    ratio: f64,
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self { ratio: 2.0 }
    }
}

impl SentimentAggregator {
    pub fn new(ratio: f64) -> Self {
        Self { ratio }
    }

    pub fn from_config(cfg: &AnalyzerConfig) -> Self {
        Self::new(cfg.sentiment.ratio)
    }

    pub fn tally(labels: impl IntoIterator<Item = SentimentLabel>) -> SentimentTally {
        labels.into_iter().collect()
    }

    pub fn evaluate(&self, symbol: &str, tally: &SentimentTally) -> Option<Alert> {
        let positive = tally.positive as f64;
        let negative = tally.negative as f64;

        let message = if positive > negative * self.ratio {
            "positive sentiment in news"
        } else if negative > positive * self.ratio {
            "negative sentiment in news"
        } else {
            debug!(symbol = %symbol, ?tally, "Sentiment inconclusive");
            return None;
        };
        Some(Alert::new(symbol, AlertCategory::Sentiment, message))
    }
}
