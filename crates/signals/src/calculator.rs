use tracing::{debug, warn};

use common::{Error, PriceSeries, Result};

use crate::config::AnalyzerConfig;
use crate::indicators::{
    ascending_periods, IndicatorSeries, IndicatorSet, RsiIndicator, SmaIndicator,
};

/// Derives the RSI series and one SMA series per configured period from a
/// symbol's price history.
#[derive(Debug, Clone)]
pub struct IndicatorCalculator {
    rsi: RsiIndicator,
    smas: Vec<SmaIndicator>,
}

impl IndicatorCalculator {
    pub fn new(rsi_period: usize, sma_periods: &[usize]) -> Result<Self> {
        if rsi_period < 2 {
            return Err(Error::Config(format!("RSI period must be >= 2, got {rsi_period}")));
        }
        if let Some(p) = sma_periods.iter().find(|&&p| p == 0) {
            return Err(Error::Config(format!("SMA period must be > 0, got {p}")));
        }

        Ok(Self {
            rsi: RsiIndicator::new(rsi_period),
            smas: ascending_periods(sma_periods)
                .into_iter()
                .map(SmaIndicator::new)
                .collect(),
        })
    }

    pub fn from_config(cfg: &AnalyzerConfig) -> Result<Self> {
        Self::new(cfg.rsi.period, &cfg.sma_periods)
    }

    /// Bars needed before every configured indicator has a value.
    pub fn warmup_bars(&self) -> usize {
        let longest_sma = self.smas.iter().map(|s| s.period).max().unwrap_or(0);
        longest_sma.max(self.rsi.period) + 1
    }

    /// Compute all indicators.
    ///
    /// Fails with `DataUnavailable` on an empty series and with
    /// `IndicatorCompute` when closes are non-finite or timestamps are not
    /// strictly increasing. A short series is not an error: its leading
    /// values are simply undefined.
    pub fn try_compute(&self, series: &PriceSeries) -> Result<IndicatorSet> {
        if series.is_empty() {
            return Err(Error::data_unavailable(&series.symbol, "empty price series"));
        }
        if !series.is_chronological() {
            return Err(Error::IndicatorCompute(format!(
                "{}: bar timestamps are not strictly increasing",
                series.symbol
            )));
        }

        let closes = series.closes();
        if let Some(i) = closes.iter().position(|c| !c.is_finite()) {
            return Err(Error::IndicatorCompute(format!(
                "{}: non-finite close at bar {i}",
                series.symbol
            )));
        }

        let rsi = IndicatorSeries::new("RSI", self.rsi.series(&closes));
        let smas = self
            .smas
            .iter()
            .map(|sma| (sma.period, IndicatorSeries::new(sma.name(), sma.series(&closes))));

        Ok(IndicatorSet::new(rsi, smas))
    }

    /// Like [`try_compute`](Self::try_compute) but returns `None` instead of
    /// an error, logging the cause.
    pub fn compute(&self, series: &PriceSeries) -> Option<IndicatorSet> {
        match self.try_compute(series) {
            Ok(set) => {
                if series.len() < self.warmup_bars() {
                    debug!(
                        symbol = %series.symbol,
                        bars = series.len(),
                        warmup = self.warmup_bars(),
                        "Short price history — some indicators undefined"
                    );
                }
                Some(set)
            }
            Err(e @ Error::DataUnavailable { .. }) => {
                debug!(symbol = %series.symbol, error = %e, "No indicators");
                None
            }
            Err(e) => {
                warn!(symbol = %series.symbol, error = %e, "Indicator computation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use common::Bar;

    use super::*;

    fn series_from_closes(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 21, 0, 0).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000.0,
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    fn default_calc() -> IndicatorCalculator {
        IndicatorCalculator::new(14, &[20, 50, 200]).unwrap()
    }

    #[test]
    fn empty_series_yields_no_indicators() {
        let calc = default_calc();
        let series = PriceSeries::new("TEST", vec![]);
        assert!(calc.compute(&series).is_none());
        assert!(matches!(
            calc.try_compute(&series),
            Err(Error::DataUnavailable { .. })
        ));
    }

    #[test]
    fn short_series_is_partial_not_an_error() {
        let calc = default_calc();
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 4) as f64).collect();
        let set = calc.compute(&series_from_closes(&closes)).unwrap();

        assert_eq!(set.rsi.len(), 30);
        assert!(set.rsi.latest().is_some());
        assert!(set.sma(20).unwrap().latest().is_some());
        assert!(set.sma(50).unwrap().latest().is_none());
        assert!(set.sma(200).unwrap().values().iter().all(Option::is_none));
    }

    #[test]
    fn non_finite_close_is_a_compute_error() {
        let calc = default_calc();
        let series = series_from_closes(&[100.0, f64::NAN, 101.0]);
        assert!(matches!(
            calc.try_compute(&series),
            Err(Error::IndicatorCompute(_))
        ));
        assert!(calc.compute(&series).is_none());
    }

    #[test]
    fn unordered_timestamps_are_a_compute_error() {
        let calc = default_calc();
        let mut series = series_from_closes(&[100.0, 101.0, 102.0]);
        series.bars.swap(0, 2);
        assert!(calc.compute(&series).is_none());
    }

    #[test]
    fn periods_are_sorted_and_named() {
        let calc = IndicatorCalculator::new(14, &[50, 20]).unwrap();
        let set = calc.compute(&series_from_closes(&[1.0; 60])).unwrap();
        let names: Vec<&str> = set.sma.values().map(|s| s.name()).collect();
        assert_eq!(names, vec!["SMA_20", "SMA_50"]);
        assert_eq!(calc.warmup_bars(), 51);
    }

    #[test]
    fn rejects_invalid_periods() {
        assert!(IndicatorCalculator::new(1, &[20]).is_err());
        assert!(IndicatorCalculator::new(14, &[20, 0]).is_err());
    }
}
