use argminmax::ArgMinMax;
use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Summary of one price series.
///
/// The change metrics are anchored on the first and last samples while `min`/`max` are
/// the true extrema of the window. The two are deliberately not the same points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub current: f64,
    pub absolute_change: f64,
    /// Signed, relative to the first sample. Non-finite when the first sample is zero.
    pub percent_change: f64,
    pub min: f64,
    pub max: f64,
}

impl DerivedStats {
    /// Computes the summary, or `None` when fewer than two samples exist. `None` means
    /// "loading / not enough data", never an error.
    pub fn derive(series: &PriceSeries) -> Option<Self> {
        let prices = series.as_slice();
        if prices.len() < 2 {
            return None;
        }

        let first = prices[0];
        let current = prices[prices.len() - 1];
        let absolute_change = current - first;
        // Zero first sample gives a non-finite value here; callers show it as-is.
        let percent_change = absolute_change / first * 100.0;

        let (min_idx, max_idx) = prices.argminmax();

        Some(Self {
            current,
            absolute_change,
            percent_change,
            min: prices[min_idx],
            max: prices[max_idx],
        })
    }

    pub fn is_up(&self) -> bool {
        self.absolute_change >= 0.0
    }

    /// True when the move is large enough to raise an alert.
    pub fn is_significant_move(&self, threshold_pct: f64) -> bool {
        self.percent_change.abs() >= threshold_pct
    }

    /// Percent change as stored in history: two decimals, `Infinity`/`-Infinity`/`NaN`
    /// for a zero first sample.
    pub fn percent_text(&self) -> String {
        format_percent(self.percent_change)
    }
}

pub fn format_percent(pct: f64) -> String {
    if pct.is_infinite() {
        let sign = if pct < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }
    format!("{:.2}", pct)
}
