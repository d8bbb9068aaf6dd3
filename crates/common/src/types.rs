use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// One OHLCV bar as returned by the market-data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Chronological bars for one symbol over a lookback window.
///
/// Timestamps are expected to be strictly increasing. The indicator
/// calculator rejects series that break this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Close prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn is_chronological(&self) -> bool {
        self.bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
    }
}

/// How far back to request price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LookbackPeriod {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[default]
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl LookbackPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookbackPeriod::OneDay => "1d",
            LookbackPeriod::FiveDays => "5d",
            LookbackPeriod::OneMonth => "1mo",
            LookbackPeriod::ThreeMonths => "3mo",
            LookbackPeriod::SixMonths => "6mo",
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::TwoYears => "2y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::TenYears => "10y",
            LookbackPeriod::YearToDate => "ytd",
            LookbackPeriod::Max => "max",
        }
    }
}

impl fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookbackPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let period = match s.trim().to_lowercase().as_str() {
            "1d" => LookbackPeriod::OneDay,
            "5d" => LookbackPeriod::FiveDays,
            "1mo" => LookbackPeriod::OneMonth,
            "3mo" => LookbackPeriod::ThreeMonths,
            "6mo" => LookbackPeriod::SixMonths,
            "1y" => LookbackPeriod::OneYear,
            "2y" => LookbackPeriod::TwoYears,
            "5y" => LookbackPeriod::FiveYears,
            "10y" => LookbackPeriod::TenYears,
            "ytd" => LookbackPeriod::YearToDate,
            "max" => LookbackPeriod::Max,
            other => {
                return Err(Error::Config(format!("unknown lookback period '{other}'")));
            }
        };
        Ok(period)
    }
}

/// Polarity assigned to a single headline by the sentiment classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Negative => write!(f, "negative"),
            SentimentLabel::Neutral => write!(f, "neutral"),
        }
    }
}

impl FromStr for SentimentLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            other => Err(Error::SentimentUnavailable(format!(
                "unrecognised sentiment label '{other}'"
            ))),
        }
    }
}

/// Per-category headline counts for one symbol in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentTally {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

impl SentimentTally {
    pub fn new(positive: usize, negative: usize, neutral: usize) -> Self {
        Self {
            positive,
            negative,
            neutral,
        }
    }

    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl FromIterator<SentimentLabel> for SentimentTally {
    fn from_iter<I: IntoIterator<Item = SentimentLabel>>(iter: I) -> Self {
        let mut tally = SentimentTally::default();
        for label in iter {
            tally.record(label);
        }
        tally
    }
}

/// Which rule produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Rsi,
    SmaCross,
    Sentiment,
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Rsi => write!(f, "RSI"),
            AlertCategory::SmaCross => write!(f, "SMA_CROSS"),
            AlertCategory::Sentiment => write!(f, "SENTIMENT"),
        }
    }
}

/// A single human-readable alert raised for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub symbol: String,
    pub message: String,
    pub category: AlertCategory,
}

impl Alert {
    pub fn new(symbol: impl Into<String>, category: AlertCategory, message: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            message: message.into(),
            category,
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.symbol, self.message)
    }
}

/// Ordered alerts produced by one run across the whole watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub alerts: Vec<Alert>,
}

impl AnalysisResult {
    pub fn extend(&mut self, alerts: Vec<Alert>) {
        self.alerts.extend(alerts);
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn for_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a Alert> + 'a {
        self.alerts.iter().filter(move |a| a.symbol == symbol)
    }
}
