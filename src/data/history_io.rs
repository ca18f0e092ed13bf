use {
    crate::{config::PERSISTENCE, data::KeyValueStore, models::HistoryLog},
    anyhow::{Context, Result},
};

#[cfg(debug_assertions)]
use crate::config::DF;

pub(crate) fn save_history(store: &mut dyn KeyValueStore, log: &HistoryLog) -> Result<()> {
    let json = serde_json::to_string(log).context("Failed to serialize history")?;
    store
        .set(PERSISTENCE.keys.history, &json)
        .context("Failed to persist history")?;

    #[cfg(debug_assertions)]
    if DF.log_history {
        log::info!("HISTORY: persisted {} records", log.len());
    }
    Ok(())
}

pub(crate) fn load_history(store: &dyn KeyValueStore) -> HistoryLog {
    let Some(json) = store.get(PERSISTENCE.keys.history) else {
        return HistoryLog::new();
    };
    match serde_json::from_str::<HistoryLog>(&json) {
        Ok(mut log) => {
            let dropped = log.truncate_to_capacity();
            if !dropped.is_empty() {
                log::warn!(
                    "Stored history held {} records past capacity, dropping the oldest",
                    dropped.len()
                );
            }
            log
        }
        Err(e) => {
            log::warn!("Stored history is corrupt, resetting to empty: {}", e);
            HistoryLog::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;

    #[test]
    fn absent_key_is_empty() {
        assert!(load_history(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn corrupt_json_resets_to_empty() {
        let store = MemoryStore::with_values([(PERSISTENCE.keys.history, "[{\"coin\": 3")]);
        assert!(load_history(&store).is_empty());
    }

    #[test]
    fn reads_history_written_by_earlier_releases() {
        let json = r#"[{"timestamp":"19.10.2026, 12:00:00","coin":"ethereum","days":14,
            "currency":"eur","currentPrice":3100,"priceChange":-50,"percentChange":"-1.59",
            "minPrice":3000,"maxPrice":3200}]"#;
        let store = MemoryStore::with_values([(PERSISTENCE.keys.history, json)]);
        let log = load_history(&store);
        assert_eq!(log.len(), 1);
        let r = log.newest().unwrap();
        assert_eq!(r.asset, "ethereum");
        assert_eq!(r.window_days, 14);
        assert_eq!(r.absolute_change, -50.0);
        assert_eq!(r.percent_change, "-1.59");
    }
}
