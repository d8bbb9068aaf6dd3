use tracing::{debug, info};

use common::{Alert, AlertCategory};

use crate::config::AnalyzerConfig;
use crate::indicators::{ascending_periods, sma_name, IndicatorSet};

/// A single alert rule evaluated against the latest bars of an indicator set.
pub trait SignalCheck: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Returns `None` when the rule does not fire or its inputs are
    /// undefined.
    fn evaluate(&self, symbol: &str, indicators: &IndicatorSet) -> Option<Alert>;
}

/// Runs every registered check in order and collects the alerts.
///
/// Checks are registered RSI first, then one crossover check per adjacent
/// pair of SMA periods in ascending order, which fixes alert order.
pub struct SignalDetector {
    checks: Vec<Box<dyn SignalCheck>>,
}

impl SignalDetector {
    pub fn new(overbought: f64, oversold: f64, sma_periods: &[usize]) -> Self {
        let periods = ascending_periods(sma_periods);

        let mut checks: Vec<Box<dyn SignalCheck>> = Vec::new();
        checks.push(Box::new(RsiThresholdCheck::new(overbought, oversold)));
        for pair in periods.windows(2) {
            checks.push(Box::new(SmaCrossoverCheck::new(pair[0], pair[1])));
        }

        for check in &checks {
            debug!(check = %check.name(), "Registered signal check");
        }
        Self { checks }
    }

    pub fn from_config(cfg: &AnalyzerConfig) -> Self {
        Self::new(cfg.rsi.overbought, cfg.rsi.oversold, &cfg.sma_periods)
    }

    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn detect(&self, symbol: &str, indicators: &IndicatorSet) -> Vec<Alert> {
        self.checks
            .iter()
            .filter_map(|check| {
                let alert = check.evaluate(symbol, indicators)?;
                info!(symbol = %symbol, check = %check.name(), message = %alert.message, "Signal raised");
                Some(alert)
            })
            .collect()
    }
}

// ─── Checks ───────────────────────────────────────────────────────────────────

/// Overbought above `overbought`, oversold below `oversold`. Both bounds are
/// exclusive, so a reading exactly on a threshold is quiet.
pub struct RsiThresholdCheck {
    pub overbought: f64,
    pub oversold: f64,
}

impl RsiThresholdCheck {
    pub fn new(overbought: f64, oversold: f64) -> Self {
        Self { overbought, oversold }
    }
}

impl SignalCheck for RsiThresholdCheck {
    fn name(&self) -> &str {
        "rsi_threshold"
    }

    fn evaluate(&self, symbol: &str, indicators: &IndicatorSet) -> Option<Alert> {
        let rsi = indicators.rsi.latest()?;

        let message = if rsi > self.overbought {
            format!("RSI overbought ({rsi:.2})")
        } else if rsi < self.oversold {
            format!("RSI oversold ({rsi:.2})")
        } else {
            return None;
        };
        Some(Alert::new(symbol, AlertCategory::Rsi, message))
    }
}

/// Fires on the bar where the short SMA moves from at-or-below to strictly
/// above the long SMA. Only upward crosses are reported.
pub struct SmaCrossoverCheck {
    pub short: usize,
    pub long: usize,
    name: String,
}

impl SmaCrossoverCheck {
    pub fn new(short: usize, long: usize) -> Self {
        Self {
            short,
            long,
            name: format!("sma_cross_{short}_{long}"),
        }
    }
}

impl SignalCheck for SmaCrossoverCheck {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, symbol: &str, indicators: &IndicatorSet) -> Option<Alert> {
        let (prev_short, curr_short) = indicators.sma(self.short)?.last_two()?;
        let (prev_long, curr_long) = indicators.sma(self.long)?.last_two()?;

        if !is_bullish_cross(prev_short, prev_long, curr_short, curr_long) {
            return None;
        }
        Some(Alert::new(
            symbol,
            AlertCategory::SmaCross,
            format!(
                "bullish cross {} over {}",
                sma_name(self.short),
                sma_name(self.long)
            ),
        ))
    }
}

/// `short` was at or below `long` on the previous bar and is strictly above
/// it on the latest one.
pub fn is_bullish_cross(prev_short: f64, prev_long: f64, curr_short: f64, curr_long: f64) -> bool {
    prev_short <= prev_long && curr_short > curr_long
}
