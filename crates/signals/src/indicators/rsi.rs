/// RSI (Relative Strength Index) indicator.
///
/// Uses Wilder's smoothed moving average (same as TradingView / standard RSI).
/// The produced series is aligned with the input closes; entries before index
/// `period` are `None`.
#[derive(Debug, Clone)]
pub struct RsiIndicator {
    pub period: usize,
}

impl RsiIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "RSI period must be >= 2");
        Self { period }
    }

    /// RSI for every close (oldest first).
    ///
    /// A bar where both average gain and average loss are zero (flat prices)
    /// has no defined RSI and is left as `None`.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let mut out = vec![None; closes.len()];
        if closes.len() < self.period + 1 {
            return out;
        }

        let period = self.period as f64;
        let changes: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

        // First average gain/loss over the initial `period` changes
        let initial = &changes[..self.period];
        let mut avg_gain = initial.iter().filter(|&&c| c > 0.0).sum::<f64>() / period;
        let mut avg_loss = initial.iter().filter(|&&c| c < 0.0).map(|c| c.abs()).sum::<f64>() / period;
        out[self.period] = rsi_value(avg_gain, avg_loss);

        // changes[i] ends at close i + 1
        for (i, &change) in changes.iter().enumerate().skip(self.period) {
            let gain = if change > 0.0 { change } else { 0.0 };
            let loss = if change < 0.0 { change.abs() } else { 0.0 };
            avg_gain = (avg_gain * (period - 1.0) + gain) / period;
            avg_loss = (avg_loss * (period - 1.0) + loss) / period;
            out[i + 1] = rsi_value(avg_gain, avg_loss);
        }

        out
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { None } else { Some(100.0) };
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsi_undefined_when_insufficient_data() {
        let rsi = RsiIndicator::new(14);
        // Need at least period+1 = 15 values
        let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
        let series = rsi.series(&prices);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_first_value_at_period_index() {
        let rsi = RsiIndicator::new(14);
        // 15 values — exactly period+1
        let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let series = rsi.series(&prices);
        assert!(series[..14].iter().all(Option::is_none));
        assert!(series[14].is_some());
    }

    #[test]
    fn rsi_all_gains_returns_100() {
        let rsi = RsiIndicator::new(3);
        // Strictly increasing prices → RSI = 100
        let prices = vec![10.0, 11.0, 12.0, 13.0, 14.0];
        let value = rsi.series(&prices)[4].unwrap();
        assert!((value - 100.0).abs() < 1e-6, "Expected ~100, got {value}");
    }

    #[test]
    fn rsi_all_losses_returns_0() {
        let rsi = RsiIndicator::new(3);
        // Strictly decreasing prices → RSI = 0
        let prices = vec![14.0, 13.0, 12.0, 11.0, 10.0];
        let value = rsi.series(&prices)[4].unwrap();
        assert!(value.abs() < 1e-6, "Expected ~0, got {value}");
    }

    #[test]
    fn rsi_flat_prices_are_undefined() {
        let rsi = RsiIndicator::new(3);
        let series = rsi.series(&[50.0; 6]);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_matches_hand_computed_wilder_value() {
        let rsi = RsiIndicator::new(2);
        // changes: +2, -1, +1
        // seed: gain 1.0, loss 0.5 → RSI 66.67
        // next: gain (1.0 + 1) / 2 = 1.0, loss (0.5 + 0) / 2 = 0.25 → RSI 80
        let series = rsi.series(&[10.0, 12.0, 11.0, 12.0]);
        assert!((series[2].unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert!((series[3].unwrap() - 80.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_known_series_stays_in_range() {
        // Prices sourced from Investopedia RSI example (rounded)
        let rsi = RsiIndicator::new(14);
        let prices = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.15, 43.61, 44.33, 44.83, 45.10,
            45.15, 44.34, 44.09, 44.83, 45.10,
        ];
        let series = rsi.series(&prices);
        for v in series.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "RSI out of range: {v}");
        }
        assert!(series[16].is_some());
    }
}
