use {
    crate::{config::CoinGeckoApiConfig, domain::QueryParameters, models::PriceSeries},
    anyhow::Context,
    async_trait::async_trait,
    reqwest::Client,
    serde::Deserialize,
    std::{collections::HashMap, error::Error, fmt, time::Duration},
};

/// Why a fetch produced no series. Division by zero in the statistics is not an
/// error and never shows up here.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request did not complete or the provider answered with a failure status.
    Network(String),
    /// The body arrived but was not the expected shape.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl Error for FetchError {}

/// Abstract interface for fetching market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// One attempt, no retry.
    async fn fetch(&self, params: &QueryParameters) -> Result<PriceSeries, FetchError>;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    /// `[timestamp_ms, price]`
    prices: Vec<(f64, f64)>,
}

/// Maps a `market_chart` body to a series. Only `prices` is read.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries, FetchError> {
    let parsed: MarketChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    Ok(PriceSeries::from_samples(&parsed.prices))
}

pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(config: CoinGeckoApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    pub fn market_chart_url(&self, asset: &str) -> String {
        format!("{}/coins/{}/market_chart", self.base_url, asset)
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch(&self, params: &QueryParameters) -> Result<PriceSeries, FetchError> {
        let days = params.window_days.to_string();
        let response = self
            .client
            .get(self.market_chart_url(&params.asset))
            .query(&[("vs_currency", params.currency.as_str()), ("days", days.as_str())])
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_market_chart(&body)
    }

    fn name(&self) -> &'static str {
        "CoinGecko"
    }
}

/// Serves canned series keyed by asset id. Unknown assets fail with a network error.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    series: HashMap<String, Vec<f64>>,
    delay: Option<Duration>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, asset: impl Into<String>, prices: Vec<f64>) -> Self {
        self.series.insert(asset.into(), prices);
        self
    }

    /// Holds every response back by `delay`, to mimic a slow provider.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch(&self, params: &QueryParameters) -> Result<PriceSeries, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.series
            .get(&params.asset)
            .map(|prices| PriceSeries::new(prices.clone()))
            .ok_or_else(|| FetchError::Network(format!("no canned series for {}", params.asset)))
    }

    fn name(&self) -> &'static str {
        "Static"
    }
}
