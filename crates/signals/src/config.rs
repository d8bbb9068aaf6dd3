use std::path::Path;

use serde::{Deserialize, Serialize};

use common::{Error, LookbackPeriod, Result};

/// Analyzer settings file (TOML). Every field is optional; missing fields
/// fall back to the defaults below.
///
/// Example `config/analyzer.toml`:
/// ```toml
/// symbols = ["AAPL", "MSFT", "GOOGL", "AMZN", "META"]
/// lookback = "1mo"
/// sma_periods = [20, 50, 200]
///
/// [rsi]
/// period = 14
/// overbought = 70.0
/// oversold = 30.0
///
/// [sentiment]
/// ratio = 2.0
/// max_headlines = 10
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Watchlist, processed in this order.
    pub symbols: Vec<String>,
    /// Price history requested per symbol.
    pub lookback: LookbackPeriod,
    pub rsi: RsiConfig,
    /// SMA windows. Crossovers are checked between adjacent periods once
    /// sorted ascending.
    pub sma_periods: Vec<usize>,
    pub sentiment: SentimentConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub overbought: f64,
    pub oversold: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SentimentConfig {
    /// One side must outnumber the other by more than this factor.
    pub ratio: f64,
    /// Cap on headlines fetched per symbol.
    pub max_headlines: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            symbols: ["AAPL", "MSFT", "GOOGL", "AMZN", "META"]
                .into_iter()
                .map(String::from)
                .collect(),
            lookback: LookbackPeriod::default(),
            rsi: RsiConfig::default(),
            sma_periods: vec![20, 50, 200],
            sentiment: SentimentConfig::default(),
        }
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            ratio: 2.0,
            max_headlines: 10,
        }
    }
}

impl AnalyzerConfig {
    /// Read, parse and validate a settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut cfg: AnalyzerConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        cfg.symbols = cfg
            .symbols
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(Error::Config("watchlist is empty".into()));
        }
        if self.rsi.period < 2 {
            return Err(Error::Config(format!(
                "rsi.period must be >= 2, got {}",
                self.rsi.period
            )));
        }
        let (lo, hi) = (self.rsi.oversold, self.rsi.overbought);
        if !(0.0..=100.0).contains(&lo) || !(0.0..=100.0).contains(&hi) || lo >= hi {
            return Err(Error::Config(format!(
                "rsi thresholds must satisfy 0 <= oversold < overbought <= 100, got {lo}/{hi}"
            )));
        }
        if self.sma_periods.is_empty() {
            return Err(Error::Config("sma_periods is empty".into()));
        }
        if self.sma_periods.contains(&0) {
            return Err(Error::Config("sma_periods must all be > 0".into()));
        }
        if !self.sentiment.ratio.is_finite() || self.sentiment.ratio <= 0.0 {
            return Err(Error::Config(format!(
                "sentiment.ratio must be a positive number, got {}",
                self.sentiment.ratio
            )));
        }
        if self.sentiment.max_headlines == 0 {
            return Err(Error::Config("sentiment.max_headlines must be >= 1".into()));
        }
        Ok(())
    }
}
