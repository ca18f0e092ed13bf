//! Configuration module for the dashboard.

// Can all be private now because we have a public re-export.
mod coingecko;
mod debug;
mod persistence;

// Public
pub mod constants;

// Re-export commonly used items
pub use coingecko::{COINGECKO, CoinGeckoApiConfig};
pub use constants::{ALERT_THRESHOLD_PCT, HISTORY_CAPACITY, REPAINT_WHILE_FETCHING};
pub use debug::DF;
pub use persistence::PERSISTENCE;
