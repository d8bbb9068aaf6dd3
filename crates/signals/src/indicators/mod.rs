pub mod rsi;
pub mod sma;

use std::collections::BTreeMap;

pub use rsi::RsiIndicator;
pub use sma::{ascending_periods, sma_name, SmaIndicator};

/// A named indicator series aligned 1:1 with the bars it was derived from.
/// `None` marks bars where the indicator is not yet computable.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    name: String,
    values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a fully defined series.
    pub fn from_values(name: impl Into<String>, values: &[f64]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at the most recent bar, if defined.
    pub fn latest(&self) -> Option<f64> {
        self.values.last().copied().flatten()
    }

    /// `(previous, latest)` when both of the last two bars are defined.
    pub fn last_two(&self) -> Option<(f64, f64)> {
        match self.values.as_slice() {
            [.., prev, last] => Some(((*prev)?, (*last)?)),
            _ => None,
        }
    }
}

/// Everything the signal detector reads for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub rsi: IndicatorSeries,
    /// Keyed by period, so iteration is ascending.
    pub sma: BTreeMap<usize, IndicatorSeries>,
}

impl IndicatorSet {
    pub fn new(rsi: IndicatorSeries, sma: impl IntoIterator<Item = (usize, IndicatorSeries)>) -> Self {
        Self {
            rsi,
            sma: sma.into_iter().collect(),
        }
    }

    pub fn sma(&self, period: usize) -> Option<&IndicatorSeries> {
        self.sma.get(&period)
    }
}
