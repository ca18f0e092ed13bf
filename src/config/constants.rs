use std::time::Duration;

/// Most recent records kept in the history log. Not configurable at runtime.
pub const HISTORY_CAPACITY: usize = 20;

/// Absolute percent move at or above which a completed cycle logs an alert.
pub const ALERT_THRESHOLD_PCT: f64 = 10.0;

/// How often the UI polls the worker while a fetch is outstanding.
pub const REPAINT_WHILE_FETCHING: Duration = Duration::from_millis(200);

pub mod query {
    pub const DEFAULT_ASSET: &str = "bitcoin";
    pub const DEFAULT_WINDOW_DAYS: u32 = 7;
    pub const DEFAULT_CURRENCY: &str = "usd";

    /// (provider id, ticker label)
    pub const ASSET_CHOICES: &[(&str, &str)] = &[
        ("bitcoin", "BTC"),
        ("ethereum", "ETH"),
        ("dogecoin", "DOGE"),
    ];
    pub const WINDOW_CHOICES: &[u32] = &[7, 14, 30];
    pub const CURRENCY_CHOICES: &[&str] = &["usd", "eur"];
}

pub mod csv {
    pub const HEADER: [&str; 9] = [
        "Timestamp", "Coin", "Days", "Currency", "Current", "Change", "Percent", "Min", "Max",
    ];
    pub const SEPARATOR: &str = ",";
}
