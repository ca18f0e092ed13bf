use {
    crate::{
        config::PERSISTENCE,
        data::KeyValueStore,
        domain::{QueryParameters, QueryUpdate},
    },
    anyhow::Result,
};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Current query parameters, each field persisted under its own key.
#[derive(Debug, Clone, Default)]
pub struct QueryParamsStore {
    current: QueryParameters,
}

impl QueryParamsStore {
    /// Restores each field independently; absent or unusable values fall back to the
    /// default for that field only.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = QueryParameters::default();
        let keys = &PERSISTENCE.keys;

        let asset = store
            .get(keys.coin)
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.asset);
        let window_days = store
            .get(keys.days)
            .and_then(|s| parse_stored_days(&s))
            .filter(|&d| d > 0)
            .unwrap_or(defaults.window_days);
        let currency = store
            .get(keys.currency)
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.currency);

        Self {
            current: QueryParameters {
                asset,
                window_days,
                currency,
            },
        }
    }

    pub fn get(&self) -> &QueryParameters {
        &self.current
    }

    /// Persists every provided field, one key write per field, and adopts the new
    /// values only once every write succeeded. Returns `true` when any value actually
    /// changed (which calls for a new fetch).
    pub fn set(&mut self, update: QueryUpdate, store: &mut dyn KeyValueStore) -> Result<bool> {
        let keys = &PERSISTENCE.keys;
        let mut next = self.current.clone();

        if let Some(asset) = update.asset {
            store.set(keys.coin, &asset)?;
            next.asset = asset;
        }
        if let Some(days) = update.window_days {
            store.set(keys.days, &days.to_string())?;
            next.window_days = days;
        }
        if let Some(currency) = update.currency {
            store.set(keys.currency, &currency)?;
            next.currency = currency;
        }

        let changed = next != self.current;
        self.current = next;

        #[cfg(debug_assertions)]
        if DF.log_params {
            log::info!("PARAMS: now {} (changed: {})", self.current, changed);
        }
        Ok(changed)
    }
}

/// Reads a stored day count the lenient way earlier releases did: leading whitespace
/// is skipped and the leading digits are used, so `"14d"` is 14.
fn parse_stored_days(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
