mod csv_export;
mod history_io;
mod provider;
mod query_store;
mod storage;

pub use {
    csv_export::{export_csv, write_csv},
    provider::{
        CoinGeckoProvider, FetchError, MarketDataProvider, StaticProvider, parse_market_chart,
    },
    query_store::QueryParamsStore,
    storage::{JsonFileStore, KeyValueStore, MemoryStore},
};

pub(crate) use history_io::{load_history, save_history};

#[cfg(test)]
pub(crate) use storage::test_support;
