use chrono::{Duration, TimeZone, Utc};
use common::{AlertCategory, Bar, PriceSeries, SentimentTally};
use proptest::prelude::*;
use signals::indicators::sma_name;
use signals::{IndicatorCalculator, IndicatorSeries, IndicatorSet, SentimentAggregator, SignalDetector};

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
            volume: 1.0,
        })
        .collect();
    PriceSeries::new("PROP", bars)
}

proptest! {
    /// Overbought ⟺ v > 70, oversold ⟺ v < 30, neither inside the band.
    #[test]
    fn rsi_alert_matches_thresholds(v in 0.0f64..=100.0) {
        let detector = SignalDetector::new(70.0, 30.0, &[20, 50]);
        let set = IndicatorSet::new(IndicatorSeries::from_values("RSI", &[50.0, v]), []);
        let alerts = detector.detect("PROP", &set);

        let overbought = alerts.iter().any(|a| a.message.contains("overbought"));
        let oversold = alerts.iter().any(|a| a.message.contains("oversold"));
        prop_assert_eq!(overbought, v > 70.0);
        prop_assert_eq!(oversold, v < 30.0);
        prop_assert!(alerts.len() <= 1);
    }

    /// The crossover alert fires exactly on a fresh upward cross.
    #[test]
    fn crossover_fires_iff_fresh_upward_cross(
        prev_short in 50.0f64..150.0,
        prev_long in 50.0f64..150.0,
        curr_short in 50.0f64..150.0,
        curr_long in 50.0f64..150.0,
    ) {
        let detector = SignalDetector::new(70.0, 30.0, &[20, 50]);
        let set = IndicatorSet::new(
            IndicatorSeries::new("RSI", vec![None, None]),
            [
                (20, IndicatorSeries::from_values(sma_name(20), &[prev_short, curr_short])),
                (50, IndicatorSeries::from_values(sma_name(50), &[prev_long, curr_long])),
            ],
        );
        let fired = detector
            .detect("PROP", &set)
            .iter()
            .any(|a| a.category == AlertCategory::SmaCross);
        prop_assert_eq!(fired, prev_short <= prev_long && curr_short > curr_long);
    }

    /// Positive ⟺ p > 2n, negative ⟺ n > 2p, never both.
    #[test]
    fn sentiment_alert_matches_ratio(p in 0usize..50, n in 0usize..50, neutral in 0usize..10) {
        let alert = SentimentAggregator::default().evaluate("PROP", &SentimentTally::new(p, n, neutral));
        let positive = alert.as_ref().is_some_and(|a| a.message.starts_with("positive"));
        let negative = alert.as_ref().is_some_and(|a| a.message.starts_with("negative"));
        prop_assert_eq!(positive, p > 2 * n);
        prop_assert_eq!(negative, n > 2 * p);
        prop_assert!(!(positive && negative));
    }

    /// RSI stays in [0, 100] and every series stays aligned with the input.
    #[test]
    fn indicators_bounded_and_aligned(closes in prop::collection::vec(1.0f64..1_000.0, 0..260)) {
        let calc = IndicatorCalculator::new(14, &[20, 50, 200]).unwrap();
        let series = series_from_closes(&closes);
        match calc.compute(&series) {
            None => prop_assert!(closes.is_empty()),
            Some(set) => {
                prop_assert_eq!(set.rsi.len(), closes.len());
                for v in set.rsi.values().iter().flatten() {
                    prop_assert!((0.0..=100.0).contains(v), "RSI out of range: {}", v);
                }
                for (period, sma) in &set.sma {
                    prop_assert_eq!(sma.len(), closes.len());
                    let defined = sma.values().iter().filter(|v| v.is_some()).count();
                    prop_assert_eq!(defined, closes.len().saturating_sub(period - 1));
                }
            }
        }
    }

    /// Same input, same alerts: nothing is carried between evaluations.
    #[test]
    fn detection_is_idempotent(closes in prop::collection::vec(1.0f64..1_000.0, 0..120)) {
        let calc = IndicatorCalculator::new(14, &[5, 10, 20]).unwrap();
        let detector = SignalDetector::new(70.0, 30.0, &[5, 10, 20]);
        let series = series_from_closes(&closes);

        let run = || {
            calc.compute(&series)
                .map(|set| detector.detect("PROP", &set))
                .unwrap_or_default()
        };
        prop_assert_eq!(run(), run());
    }
}
