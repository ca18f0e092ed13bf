pub struct CoinGeckoApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

impl Default for CoinGeckoApiConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO.client.base_url.to_string(),
            timeout_ms: COINGECKO.client.timeout_ms,
            user_agent: COINGECKO.client.user_agent,
        }
    }
}

impl CoinGeckoApiConfig {
    /// Same defaults, pointed at a different host (mirrors, local fixtures).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }
}

pub struct ClientDefaults {
    pub base_url: &'static str,
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

pub struct CoinGeckoConfig {
    pub client: ClientDefaults,
}

pub const COINGECKO: CoinGeckoConfig = CoinGeckoConfig {
    client: ClientDefaults {
        base_url: "https://api.coingecko.com/api/v3",
        // Single attempt, no retries. Timeout only stops a hung socket from pinning the worker.
        timeout_ms: 10_000,
        user_agent: concat!("coin-dashboard/", env!("CARGO_PKG_VERSION")),
    },
};
