use serde::{Deserialize, Serialize};

use crate::utils::round_half_up;

/// Price samples for one query window, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries(Vec<f64>);

impl PriceSeries {
    pub fn new(prices: Vec<f64>) -> Self {
        Self(prices)
    }

    /// Builds a series from provider `[timestamp_ms, price]` samples, keeping only the
    /// price rounded to the nearest integer. The rounding is lossy on purpose: stored
    /// history and exports carry whole-unit prices.
    pub fn from_samples(samples: &[(f64, f64)]) -> Self {
        Self(
            samples
                .iter()
                .map(|&(_ts, price)| round_half_up(price))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// `[index, price]` pairs ready for plotting.
    pub fn indexed_points(&self) -> Vec<[f64; 2]> {
        self.0
            .iter()
            .enumerate()
            .map(|(i, &p)| [i as f64, p])
            .collect()
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(prices: Vec<f64>) -> Self {
        Self(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_keep_price_and_round() {
        let s = PriceSeries::from_samples(&[
            (1_704_067_200_000.0, 42_000.4),
            (1_704_070_800_000.0, 42_100.5),
            (1_704_074_400_000.0, 0.49),
        ]);
        assert_eq!(s.as_slice(), &[42_000.0, 42_101.0, 0.0]);
        assert_eq!(s.first(), Some(42_000.0));
        assert_eq!(s.last(), Some(0.0));
    }

    #[test]
    fn indexed_points_start_at_zero() {
        let s = PriceSeries::new(vec![3.0, 4.0]);
        assert_eq!(s.indexed_points(), vec![[0.0, 3.0], [1.0, 4.0]]);
    }
}
