use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

use anyhow::Result;
use web_time::Instant;

use super::messages::{CycleOutcome, FetchRequest, FetchResult};
use super::worker::spawn_worker_thread;

use crate::config::{ALERT_THRESHOLD_PCT, PERSISTENCE};
use crate::data::{KeyValueStore, MarketDataProvider, QueryParamsStore, export_csv, write_csv};
use crate::domain::{QueryParameters, QueryUpdate, ThemeMode};
use crate::models::{DerivedStats, HistoryLog, HistoryRecord, PriceSeries};
use crate::shared::{SharedIdentity, SubscriptionId};
use crate::utils::now_record_timestamp;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Owns the dashboard state and drives the fetch-and-derive cycle.
///
/// All state lives on the thread that calls [`update`](Self::update); the worker only
/// performs network calls. Every request carries a generation number and a result is
/// applied only while its generation is still the newest one issued.
pub struct DashboardEngine {
    identity: SharedIdentity,
    identity_sub: SubscriptionId,
    identity_rx: Receiver<String>,
    /// Identity the engine last acted on.
    active_user: String,

    store: Box<dyn KeyValueStore>,
    params: QueryParamsStore,
    history: HistoryLog,
    theme: Option<ThemeMode>,

    series: Option<PriceSeries>,
    /// Latest statistics and the parameters they were computed for.
    stats: Option<(QueryParameters, DerivedStats)>,

    generation: u64,
    pending: Option<u64>,
    job_tx: Sender<FetchRequest>,
    result_rx: Receiver<FetchResult>,

    clock: fn() -> String,
}

impl DashboardEngine {
    /// Restores parameters, history, theme and username from `store`, then starts
    /// the fetch worker. A restored username activates the core straight away.
    pub fn new(
        store: Box<dyn KeyValueStore>,
        provider: Arc<dyn MarketDataProvider>,
        identity: SharedIdentity,
    ) -> Self {
        let params = QueryParamsStore::load(store.as_ref());
        let history = HistoryLog::load(store.as_ref());
        let theme = store
            .get(PERSISTENCE.keys.theme)
            .and_then(|s| ThemeMode::from_str(&s).ok());
        let stored_user = store
            .get(PERSISTENCE.keys.username)
            .filter(|s| !s.trim().is_empty());

        let (job_tx, job_rx) = mpsc::channel();
        let (result_tx, result_rx) = mpsc::channel();
        spawn_worker_thread(provider, job_rx, result_tx);

        let (identity_tx, identity_rx) = mpsc::channel();
        let identity_sub = identity.subscribe(move |name| {
            let _ = identity_tx.send(name.to_string());
        });

        log::info!(
            "Engine ready: {} | {} history records",
            params.get(),
            history.len()
        );

        let mut engine = Self {
            identity,
            identity_sub,
            identity_rx,
            active_user: String::new(),
            store,
            params,
            history,
            theme,
            series: None,
            stats: None,
            generation: 0,
            pending: None,
            job_tx,
            result_rx,
            clock: now_record_timestamp,
        };

        if let Some(name) = stored_user {
            engine.identity.login(&name);
        }
        engine.sync_identity();
        engine
    }

    /// Replaces the wall clock used to stamp history records.
    pub fn with_clock(mut self, clock: fn() -> String) -> Self {
        self.clock = clock;
        self
    }

    // --- Per-frame driving ---

    /// Applies identity changes and every completed fetch. Returns `true` when
    /// anything visible may have changed.
    pub fn update(&mut self) -> bool {
        let mut changed = self.sync_identity();
        loop {
            match self.result_rx.try_recv() {
                Ok(result) => {
                    self.handle_result(result);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.pending.take().is_some() {
                        log::error!("Fetch worker stopped; dropping outstanding request");
                    }
                    break;
                }
            }
        }
        changed
    }

    /// Blocks until the outstanding fetch resolves (stale results are discarded on the
    /// way) or `timeout` passes. `None` when nothing is outstanding or on timeout.
    pub fn wait_for_result(&mut self, timeout: Duration) -> Option<CycleOutcome> {
        self.sync_identity();
        let deadline = Instant::now() + timeout;
        while self.pending.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.result_rx.recv_timeout(remaining) {
                Ok(result) => match self.handle_result(result) {
                    CycleOutcome::Stale => continue,
                    outcome => return Some(outcome),
                },
                Err(RecvTimeoutError::Timeout) => return None,
                Err(RecvTimeoutError::Disconnected) => {
                    log::error!("Fetch worker stopped; dropping outstanding request");
                    self.pending = None;
                    return None;
                }
            }
        }
        None
    }

    // --- Identity ---

    pub fn identity(&self) -> &SharedIdentity {
        &self.identity
    }

    pub fn current_user(&self) -> String {
        self.identity.get()
    }

    /// The core only fetches and derives while someone is logged in.
    pub fn is_active(&self) -> bool {
        self.identity.is_logged_in()
    }

    /// Accepts any non-blank name. Returns whether the login was accepted.
    pub fn login(&mut self, input: &str) -> bool {
        let accepted = self.identity.login(input);
        self.sync_identity();
        accepted
    }

    pub fn logout(&mut self) {
        self.identity.logout();
        self.sync_identity();
    }

    /// Reacts to whatever the shared identity holds now, no matter who set it.
    fn sync_identity(&mut self) -> bool {
        // Notifications only say "something changed"; the cell holds the truth.
        let mut notified = false;
        while self.identity_rx.try_recv().is_ok() {
            notified = true;
        }
        let current = self.identity.get();
        if current == self.active_user {
            return notified;
        }

        #[cfg(debug_assertions)]
        if DF.log_identity {
            log::info!("IDENTITY: '{}' -> '{}'", self.active_user, current);
        }

        let key = PERSISTENCE.keys.username;
        let persisted = if current.is_empty() {
            self.store.remove(key)
        } else {
            self.store.set(key, &current)
        };
        if let Err(e) = persisted {
            log::error!("Failed to persist username: {:#}", e);
        }

        self.active_user = current;
        if self.active_user.is_empty() {
            // Going inert: anything in flight is now stale.
            self.supersede();
        } else {
            self.dispatch_fetch();
        }
        true
    }

    // --- Query parameters ---

    pub fn params(&self) -> &QueryParameters {
        self.params.get()
    }

    /// Persists each provided field, and when a value changed invalidates the series
    /// and (if logged in) issues a new fetch.
    pub fn set_params(&mut self, update: QueryUpdate) -> Result<()> {
        self.sync_identity();
        let changed = self.params.set(update, self.store.as_mut())?;
        if !changed {
            return Ok(());
        }
        self.series = None;
        if self.is_active() {
            self.dispatch_fetch();
        } else {
            self.supersede();
        }
        Ok(())
    }

    // --- Fetch cycle ---

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn supersede(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn dispatch_fetch(&mut self) {
        self.supersede();
        self.series = None;
        let request = FetchRequest {
            generation: self.generation,
            params: self.params.get().clone(),
        };
        match self.job_tx.send(request) {
            Ok(()) => self.pending = Some(self.generation),
            Err(e) => log::error!("Fetch worker unavailable, request #{} lost", e.0.generation),
        }
    }

    pub(crate) fn handle_result(&mut self, response: FetchResult) -> CycleOutcome {
        if self.pending != Some(response.generation) {
            #[cfg(debug_assertions)]
            if DF.log_stale {
                log::debug!(
                    "Discarding stale result #{} for {} (current #{})",
                    response.generation,
                    response.params,
                    self.generation
                );
            }
            return CycleOutcome::Stale;
        }
        self.pending = None;

        let series = match response.result {
            Ok(series) => series,
            Err(e) => {
                log::error!(
                    "Failed to load {} from {}: {}",
                    response.params,
                    response.provider,
                    e
                );
                return CycleOutcome::Failed(e);
            }
        };

        let stats = DerivedStats::derive(&series);
        self.series = Some(series);

        if let Some(stats) = stats {
            let record = HistoryRecord::new((self.clock)(), &response.params, &stats);
            if let Err(e) = self.history.append(record, self.store.as_mut()) {
                log::error!("Failed to persist history: {:#}", e);
            }
            if stats.is_significant_move(ALERT_THRESHOLD_PCT) {
                log::info!(
                    "ALERT: {} moved {}% over {} days",
                    response.params.asset,
                    stats.percent_text(),
                    response.params.window_days
                );
            }
            self.stats = Some((response.params, stats));
        }

        CycleOutcome::Applied { stats }
    }

    // --- Read side ---

    pub fn series(&self) -> Option<&PriceSeries> {
        self.series.as_ref()
    }

    pub fn stats(&self) -> Option<&DerivedStats> {
        self.stats.as_ref().map(|(_, s)| s)
    }

    /// Parameters the current statistics were computed for; may lag `params()` while
    /// a fetch is outstanding.
    pub fn stats_params(&self) -> Option<&QueryParameters> {
        self.stats.as_ref().map(|(p, _)| p)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn export_csv(&self) -> Vec<u8> {
        export_csv(&self.history)
    }

    pub fn write_csv(&self, dir: &Path) -> Result<PathBuf> {
        write_csv(&self.history, dir)
    }

    // --- Theme ---

    pub fn theme(&self) -> Option<ThemeMode> {
        self.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = Some(theme);
        if let Err(e) = self
            .store
            .set(PERSISTENCE.keys.theme, &theme.to_string())
        {
            log::error!("Failed to persist theme: {:#}", e);
        }
    }
}

impl Drop for DashboardEngine {
    fn drop(&mut self) {
        self.identity.unsubscribe(self.identity_sub);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FetchError, MemoryStore, StaticProvider};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const WAIT: Duration = Duration::from_secs(5);

    fn fixed_clock() -> String {
        "2026-10-19 12:00:00".to_string()
    }

    fn fixture_provider() -> Arc<StaticProvider> {
        Arc::new(
            StaticProvider::new()
                .with_series("bitcoin", vec![100.0, 105.0, 95.0, 120.0])
                .with_series("ethereum", vec![2000.0, 1900.0])
                .with_series("dogecoin", vec![1.0]),
        )
    }

    fn engine_with(store: MemoryStore) -> DashboardEngine {
        DashboardEngine::new(Box::new(store), fixture_provider(), SharedIdentity::new())
            .with_clock(fixed_clock)
    }

    /// Counts calls so tests can prove nothing was requested.
    struct CountingProvider(AtomicUsize);

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        async fn fetch(&self, _params: &QueryParameters) -> Result<PriceSeries, FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(PriceSeries::new(vec![1.0, 2.0]))
        }

        fn name(&self) -> &'static str {
            "Counting"
        }
    }

    #[test]
    fn login_fetches_derives_and_records() {
        let mut engine = engine_with(MemoryStore::new());
        assert!(!engine.is_fetching());

        assert!(engine.login("alice"));
        assert!(engine.is_fetching());

        let outcome = engine.wait_for_result(WAIT).unwrap();
        let expected = DerivedStats {
            current: 120.0,
            absolute_change: 20.0,
            percent_change: 20.0,
            min: 95.0,
            max: 120.0,
        };
        assert_eq!(outcome, CycleOutcome::Applied { stats: Some(expected) });
        assert_eq!(engine.stats(), Some(&expected));
        assert_eq!(engine.series().map(|s| s.len()), Some(4));

        let head = engine.history().newest().unwrap();
        assert_eq!(head.timestamp, "2026-10-19 12:00:00");
        assert_eq!(head.asset, "bitcoin");
        assert_eq!(head.window_days, 7);
        assert_eq!(head.currency, "usd");
        assert_eq!(head.current, 120.0);
        assert_eq!(head.absolute_change, 20.0);
        assert_eq!(head.percent_change, "20.00");
        assert_eq!((head.min, head.max), (95.0, 120.0));
    }

    #[test]
    fn blank_login_is_rejected() {
        let mut engine = engine_with(MemoryStore::new());
        assert!(!engine.login("   "));
        assert!(!engine.is_active());
        assert!(!engine.is_fetching());
    }

    #[test]
    fn logged_out_core_is_inert() {
        let provider = Arc::new(CountingProvider(AtomicUsize::new(0)));
        let mut engine = DashboardEngine::new(
            Box::new(MemoryStore::new()),
            provider.clone(),
            SharedIdentity::new(),
        );

        engine.set_params(QueryUpdate::asset("ethereum")).unwrap();
        engine.set_params(QueryUpdate::window_days(30)).unwrap();
        engine.set_params(QueryUpdate::currency("eur")).unwrap();
        assert!(!engine.is_fetching());
        assert!(engine.wait_for_result(Duration::from_millis(50)).is_none());
        engine.update();

        assert_eq!(provider.0.load(Ordering::SeqCst), 0);
        assert!(engine.stats().is_none());
        assert!(engine.history().is_empty());
        // Parameters are still remembered for later.
        assert_eq!(engine.params(), &QueryParameters::new("ethereum", 30, "eur"));
    }

    #[test]
    fn param_change_refetches_and_persists() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();

        engine.set_params(QueryUpdate::asset("ethereum")).unwrap();
        assert!(engine.is_fetching());
        assert!(engine.series().is_none());
        // Old stats stay visible, labelled with their own parameters.
        assert_eq!(engine.stats_params().map(|p| p.asset.as_str()), Some("bitcoin"));

        let outcome = engine.wait_for_result(WAIT).unwrap();
        let CycleOutcome::Applied { stats: Some(stats) } = outcome else {
            panic!("expected stats, got {outcome:?}");
        };
        assert_eq!(stats.percent_change, -5.0);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history().newest().unwrap().asset, "ethereum");
        assert_eq!(engine.store.get("coin").as_deref(), Some("ethereum"));
    }

    #[test]
    fn unchanged_param_does_not_refetch() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();
        let generation = engine.generation();

        engine.set_params(QueryUpdate::window_days(7)).unwrap();
        assert!(!engine.is_fetching());
        assert_eq!(engine.generation(), generation);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();

        engine.set_params(QueryUpdate::asset("ethereum")).unwrap();
        let stale_gen = engine.generation();
        engine.set_params(QueryUpdate::asset("bitcoin")).unwrap();

        // A late answer for the superseded request must not land.
        let late = FetchResult {
            generation: stale_gen,
            params: QueryParameters::new("ethereum", 7, "usd"),
            provider: "test",
            duration_ms: 1,
            result: Ok(PriceSeries::new(vec![1.0, 500.0])),
        };
        assert_eq!(engine.handle_result(late), CycleOutcome::Stale);
        assert!(engine.is_fetching());
        assert_eq!(engine.history().len(), 1);

        let outcome = engine.wait_for_result(WAIT).unwrap();
        assert!(matches!(outcome, CycleOutcome::Applied { stats: Some(_) }));
        assert!(engine.history().iter().all(|r| r.asset == "bitcoin"));
        assert_eq!(engine.history().len(), 2);
    }

    #[test]
    fn rapid_changes_apply_only_the_last() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.set_params(QueryUpdate::asset("ethereum")).unwrap();
        engine.set_params(QueryUpdate::asset("bitcoin")).unwrap();
        engine.set_params(QueryUpdate::asset("ethereum")).unwrap();

        let outcome = engine.wait_for_result(WAIT).unwrap();
        assert!(matches!(outcome, CycleOutcome::Applied { .. }));
        assert!(!engine.is_fetching());
        assert_eq!(engine.stats_params().map(|p| p.asset.as_str()), Some("ethereum"));
        assert!(engine.history().iter().all(|r| r.asset == "ethereum"));
    }

    #[test]
    fn failed_fetch_leaves_state_alone() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();
        let before = *engine.stats().unwrap();

        engine.set_params(QueryUpdate::asset("solana")).unwrap();
        let outcome = engine.wait_for_result(WAIT).unwrap();
        assert!(matches!(outcome, CycleOutcome::Failed(FetchError::Network(_))));
        assert_eq!(engine.stats(), Some(&before));
        assert_eq!(engine.history().len(), 1);
        assert!(!engine.is_fetching());
    }

    #[test]
    fn short_series_applies_without_stats_or_record() {
        let mut engine = engine_with(MemoryStore::new());
        engine.set_params(QueryUpdate::asset("dogecoin")).unwrap();
        engine.login("alice");
        let outcome = engine.wait_for_result(WAIT).unwrap();
        assert_eq!(outcome, CycleOutcome::Applied { stats: None });
        assert_eq!(engine.series().map(|s| s.len()), Some(1));
        assert!(engine.stats().is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn logout_discards_in_flight_and_forgets_user() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        assert_eq!(engine.store.get("username").as_deref(), Some("alice"));

        engine.logout();
        assert!(!engine.is_fetching());
        assert!(engine.wait_for_result(Duration::from_millis(50)).is_none());
        assert!(engine.store.get("username").is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn identity_set_elsewhere_activates_engine() {
        let identity = SharedIdentity::new();
        let mut engine = DashboardEngine::new(
            Box::new(MemoryStore::new()),
            fixture_provider(),
            identity.clone(),
        );

        identity.set("bob");
        assert!(engine.update());
        assert!(engine.is_fetching());
        assert!(engine.wait_for_result(WAIT).is_some());
        assert_eq!(engine.current_user(), "bob");
    }

    #[test]
    fn restores_everything_from_store() {
        let mut first = engine_with(MemoryStore::new());
        first.login("alice");
        first.wait_for_result(WAIT).unwrap();
        first.set_params(QueryUpdate::window_days(30)).unwrap();
        first.set_theme(ThemeMode::Dark);
        let snapshot = first.store.get(PERSISTENCE.keys.history).unwrap();

        let store = MemoryStore::with_values([
            ("username", "alice"),
            ("days", "30"),
            ("theme", "dark"),
            ("history", snapshot.as_str()),
        ]);
        let mut second = engine_with(store);
        assert_eq!(second.current_user(), "alice");
        assert!(second.is_fetching());
        assert_eq!(second.params().window_days, 30);
        assert_eq!(second.theme(), Some(ThemeMode::Dark));
        assert_eq!(second.history().len(), 1);
        second.wait_for_result(WAIT).unwrap();
        assert_eq!(second.history().len(), 2);
    }

    #[test]
    fn export_matches_history() {
        let mut engine = engine_with(MemoryStore::new());
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();
        let text = String::from_utf8(engine.export_csv()).unwrap();
        assert_eq!(
            text,
            "Timestamp,Coin,Days,Currency,Current,Change,Percent,Min,Max\n\
             2026-10-19 12:00:00,bitcoin,7,usd,120,20,20.00,95,120\n"
        );
    }

    #[test]
    fn rejected_param_write_keeps_displayed_query_consistent() {
        let store = crate::data::test_support::FailingStore::failing_on("currency");
        let mut engine = DashboardEngine::new(
            Box::new(store),
            fixture_provider(),
            SharedIdentity::new(),
        )
        .with_clock(fixed_clock);
        engine.login("alice");
        engine.wait_for_result(WAIT).unwrap();

        let update = QueryUpdate {
            asset: Some("ethereum".to_string()),
            currency: Some("eur".to_string()),
            ..QueryUpdate::default()
        };
        assert!(engine.set_params(update).is_err());
        assert_eq!(engine.params(), &QueryParameters::default());
        assert!(!engine.is_fetching());
        assert_eq!(engine.stats_params(), Some(&QueryParameters::default()));
    }
}
