/// Simple Moving Average over closing prices.
#[derive(Debug, Clone)]
pub struct SmaIndicator {
    pub period: usize,
}

impl SmaIndicator {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self { period }
    }

    /// Series name used in alert messages, e.g. `SMA_20`.
    pub fn name(&self) -> String {
        sma_name(self.period)
    }

    /// Trailing mean for every close (oldest first); the first
    /// `period - 1` entries are `None`.
    pub fn series(&self, closes: &[f64]) -> Vec<Option<f64>> {
        let lead = (self.period - 1).min(closes.len());
        let mut out: Vec<Option<f64>> = vec![None; lead];
        out.extend(
            closes
                .windows(self.period)
                .map(|w| Some(w.iter().sum::<f64>() / self.period as f64)),
        );
        out
    }
}

pub fn sma_name(period: usize) -> String {
    format!("SMA_{period}")
}

/// Periods ascending with duplicates removed. Adjacent entries form the
/// crossover pairs.
pub fn ascending_periods(periods: &[usize]) -> Vec<usize> {
    let mut sorted = periods.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    sorted
}
