use anyhow::{Context, Result, bail};
use clap::Parser;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tabled::{Table, Tabled, settings::Style};

use coin_dashboard::{
    CycleOutcome, DashboardEngine, PERSISTENCE, SharedIdentity,
    config::CoinGeckoApiConfig,
    data::{CoinGeckoProvider, JsonFileStore, KeyValueStore, MarketDataProvider, StaticProvider},
    domain::{QueryParameters, QueryUpdate},
    models::{DerivedStats, HistoryRecord},
};

/// Runs one fetch-and-derive cycle without the GUI and prints the result.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Display name to log in with
    #[arg(long)]
    user: String,
    #[arg(long)]
    asset: Option<String>,
    #[arg(long)]
    days: Option<u32>,
    #[arg(long)]
    currency: Option<String>,
    #[arg(long)]
    state_path: Option<PathBuf>,
    #[arg(long)]
    api_base: Option<String>,
    /// Write history.csv into this directory after the cycle
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, default_value_t = 15)]
    timeout_secs: u64,
    /// Comma-separated prices served instead of calling the API, e.g. "100,105,95,120"
    #[arg(long)]
    offline_prices: Option<String>,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Query")]
    query: String,
    #[tabled(rename = "Current")]
    current: f64,
    #[tabled(rename = "Change")]
    change: f64,
    #[tabled(rename = "Percent")]
    percent: String,
    #[tabled(rename = "Min")]
    min: f64,
    #[tabled(rename = "Max")]
    max: f64,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Coin")]
    coin: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Currency")]
    currency: String,
    #[tabled(rename = "Current")]
    current: f64,
    #[tabled(rename = "Change")]
    change: f64,
    #[tabled(rename = "Percent")]
    percent: String,
}

impl From<&HistoryRecord> for HistoryRow {
    fn from(r: &HistoryRecord) -> Self {
        Self {
            timestamp: r.timestamp.clone(),
            coin: r.asset.clone(),
            days: r.window_days,
            currency: r.currency.clone(),
            current: r.current,
            change: r.absolute_change,
            percent: r.percent_change.clone(),
        }
    }
}

fn parse_prices(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .with_context(|| format!("Invalid price '{}'", p.trim()))
        })
        .collect()
}

fn build_provider(args: &Args, asset: &str) -> Result<Arc<dyn MarketDataProvider>> {
    if let Some(raw) = &args.offline_prices {
        let prices = parse_prices(raw)?;
        log::info!("Serving {} offline prices for {}", prices.len(), asset);
        return Ok(Arc::new(StaticProvider::new().with_series(asset, prices)));
    }
    let config = match &args.api_base {
        Some(base) => CoinGeckoApiConfig::with_base_url(base.as_str()),
        None => CoinGeckoApiConfig::default(),
    };
    Ok(Arc::new(CoinGeckoProvider::new(config)?))
}

fn print_stats(query: String, stats: &DerivedStats) {
    let row = StatsRow {
        query,
        current: stats.current,
        change: stats.absolute_change,
        percent: format!("{}%", stats.percent_text()),
        min: stats.min,
        max: stats.max,
    };
    println!("{}", Table::new([row]).with(Style::rounded()));
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let state_path = args
        .state_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(PERSISTENCE.app.state_path));
    let store = JsonFileStore::open(&state_path);

    let update = QueryUpdate {
        asset: args.asset.clone(),
        window_days: args.days,
        currency: args.currency.clone(),
    };

    // The provider has to know the asset up front when serving offline prices.
    let asset = update
        .asset
        .clone()
        .or_else(|| store.get(PERSISTENCE.keys.coin))
        .unwrap_or_else(|| QueryParameters::default().asset);
    let provider = build_provider(&args, &asset)?;

    let mut engine = DashboardEngine::new(Box::new(store), provider, SharedIdentity::new());

    // A restored username has already issued a cycle; a changed query or user supersedes it.
    engine.set_params(update)?;
    if !engine.login(&args.user) {
        bail!("User name must not be blank");
    }

    log::info!("Fetching {} as '{}'", engine.params(), engine.current_user());
    match engine.wait_for_result(Duration::from_secs(args.timeout_secs)) {
        Some(CycleOutcome::Applied { stats: Some(stats) }) => {
            print_stats(engine.params().to_string(), &stats)
        }
        Some(CycleOutcome::Applied { stats: None }) => {
            println!("Not enough data to derive statistics for {}", engine.params())
        }
        Some(CycleOutcome::Failed(e)) => bail!("Fetch failed: {}", e),
        Some(CycleOutcome::Stale) | None => bail!(
            "No result within {}s for {}",
            args.timeout_secs,
            engine.params()
        ),
    }

    let rows: Vec<HistoryRow> = engine.history().iter().map(HistoryRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));

    if let Some(dir) = &args.export {
        let path = engine.write_csv(dir)?;
        println!("History written to {}", path.display());
    }
    Ok(())
}
