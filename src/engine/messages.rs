use crate::data::FetchError;
use crate::domain::QueryParameters;
use crate::models::{DerivedStats, PriceSeries};

/// A request to fetch the series for one parameter set.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Parameter-set version this request was issued for.
    pub generation: u64,
    pub params: QueryParameters,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub generation: u64,
    pub params: QueryParameters,
    pub provider: &'static str,
    pub duration_ms: u128,
    pub result: Result<PriceSeries, FetchError>,
}

/// What the engine did with a completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Series accepted. `stats` is `None` when it had fewer than two samples.
    Applied { stats: Option<DerivedStats> },
    /// Fetch failed; displayed state left as it was.
    Failed(FetchError),
    /// Parameters or identity moved on while this was in flight; thrown away.
    Stale,
}
