mod history;
mod price_series;
mod stats;

pub use history::{HistoryLog, HistoryRecord};
pub use price_series::PriceSeries;
pub use stats::{DerivedStats, format_percent};

#[cfg(test)]
pub(crate) use history::test_support;
