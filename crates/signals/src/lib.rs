pub mod calculator;
pub mod config;
pub mod detector;
pub mod indicators;
pub mod sentiment;

pub use calculator::IndicatorCalculator;
pub use config::{AnalyzerConfig, RsiConfig, SentimentConfig};
pub use detector::{SignalCheck, SignalDetector};
pub use indicators::{IndicatorSeries, IndicatorSet};
pub use sentiment::SentimentAggregator;
