use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::HISTORY_CAPACITY;
use crate::data::{KeyValueStore, load_history, save_history};
use crate::domain::QueryParameters;
use crate::models::DerivedStats;

#[cfg(debug_assertions)]
use crate::config::DF;

/// Snapshot of one completed fetch-and-derive cycle. Never mutated after creation.
///
/// Serialized field names match the `history` value written by earlier releases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub timestamp: String,
    #[serde(rename = "coin")]
    pub asset: String,
    #[serde(rename = "days")]
    pub window_days: u32,
    pub currency: String,
    #[serde(rename = "currentPrice")]
    pub current: f64,
    #[serde(rename = "priceChange")]
    pub absolute_change: f64,
    /// Two decimal places, kept as text so `inf`/`NaN` survive JSON.
    #[serde(rename = "percentChange")]
    pub percent_change: String,
    #[serde(rename = "minPrice")]
    pub min: f64,
    #[serde(rename = "maxPrice")]
    pub max: f64,
}

impl HistoryRecord {
    pub fn new(timestamp: impl Into<String>, params: &QueryParameters, stats: &DerivedStats) -> Self {
        Self {
            timestamp: timestamp.into(),
            asset: params.asset.clone(),
            window_days: params.window_days,
            currency: params.currency.clone(),
            current: stats.current,
            absolute_change: stats.absolute_change,
            percent_change: stats.percent_text(),
            min: stats.min,
            max: stats.max,
        }
    }

    /// Literal field values in export column order.
    pub fn csv_fields(&self) -> [String; 9] {
        [
            self.timestamp.clone(),
            self.asset.clone(),
            self.window_days.to_string(),
            self.currency.clone(),
            self.current.to_string(),
            self.absolute_change.to_string(),
            self.percent_change.clone(),
            self.min.to_string(),
            self.max.to_string(),
        ]
    }
}

/// Past query results, newest first, never longer than [`HISTORY_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores the persisted log. Missing or corrupt storage yields an empty log.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        load_history(store)
    }

    /// Prepends `record`, evicts past capacity, then persists the whole log.
    ///
    /// The in-memory log is updated even if the write fails; the next successful
    /// append rewrites the full sequence so storage catches up within one cycle.
    pub fn append(&mut self, record: HistoryRecord, store: &mut dyn KeyValueStore) -> Result<()> {
        self.push_newest(record);
        save_history(store, self)
    }

    /// In-memory half of [`append`](Self::append). Returns whatever fell off the end,
    /// oldest last.
    pub fn push_newest(&mut self, record: HistoryRecord) -> Vec<HistoryRecord> {
        self.records.insert(0, record);
        let evicted = self.truncate_to_capacity();

        #[cfg(debug_assertions)]
        if DF.log_history {
            for old in &evicted {
                log::info!("HISTORY: evicted record from {}", old.timestamp);
            }
        }
        evicted
    }

    /// Drops everything past [`HISTORY_CAPACITY`], keeping the newest records.
    pub(crate) fn truncate_to_capacity(&mut self) -> Vec<HistoryRecord> {
        if self.records.len() > HISTORY_CAPACITY {
            self.records.split_off(HISTORY_CAPACITY)
        } else {
            Vec::new()
        }
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn newest(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::HistoryRecord;

    /// Record whose every field encodes `n`, so order is easy to assert.
    pub(crate) fn record(n: u32) -> HistoryRecord {
        HistoryRecord {
            timestamp: format!("2024-01-{:02} 10:00:00", n % 28 + 1),
            asset: "bitcoin".to_string(),
            window_days: 7,
            currency: "usd".to_string(),
            current: n as f64,
            absolute_change: n as f64 - 1.0,
            percent_change: format!("{:.2}", n as f64),
            min: 0.0,
            max: n as f64 + 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::record;
    use super::*;
    use crate::config::PERSISTENCE;
    use crate::data::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn append_is_newest_first() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        log.append(record(1), &mut store).unwrap();
        log.append(record(2), &mut store).unwrap();
        assert_eq!(log.newest().map(|r| r.current), Some(2.0));
        assert_eq!(log.records()[1].current, 1.0);
    }

    #[test]
    fn twenty_first_append_evicts_exactly_the_oldest() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        for n in 1..=20 {
            log.append(record(n), &mut store).unwrap();
        }
        assert_eq!(log.len(), 20);

        log.append(record(21), &mut store).unwrap();
        assert_eq!(log.len(), 20);

        let currents: Vec<f64> = log.iter().map(|r| r.current).collect();
        let expected: Vec<f64> = (2..=21).rev().map(|n| n as f64).collect();
        assert_eq!(currents, expected);
        assert!(log.iter().all(|r| r.current != 1.0));
    }

    #[test]
    fn push_newest_reports_eviction() {
        let mut log = HistoryLog::new();
        for n in 1..=20 {
            assert!(log.push_newest(record(n)).is_empty());
        }
        let evicted = log.push_newest(record(21));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].current, 1.0);
    }

    #[test]
    fn oversized_stored_history_is_capped_on_load_and_append() {
        let oversized: Vec<HistoryRecord> = (1..=25).rev().map(record).collect();
        let json = serde_json::to_string(&oversized).unwrap();
        let mut store = MemoryStore::with_values([(PERSISTENCE.keys.history, json)]);

        let mut log = HistoryLog::load(&store);
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.newest().map(|r| r.current), Some(25.0));
        assert_eq!(log.records().last().map(|r| r.current), Some(6.0));

        log.append(record(26), &mut store).unwrap();
        assert_eq!(log.len(), HISTORY_CAPACITY);
        assert_eq!(log.newest().map(|r| r.current), Some(26.0));
        assert_eq!(log.records().last().map(|r| r.current), Some(7.0));
        assert_eq!(HistoryLog::load(&store).len(), HISTORY_CAPACITY);
    }

    #[test]
    fn push_newest_onto_oversized_log_drains_the_whole_tail() {
        let mut log = HistoryLog {
            records: (1..=23).rev().map(record).collect(),
        };
        let evicted = log.push_newest(record(24));
        assert_eq!(log.len(), HISTORY_CAPACITY);
        let gone: Vec<f64> = evicted.iter().map(|r| r.current).collect();
        assert_eq!(gone, vec![4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn every_append_persists_full_log() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        log.append(record(1), &mut store).unwrap();
        log.append(record(2), &mut store).unwrap();

        let restored = HistoryLog::load(&store);
        assert_eq!(restored, log);
    }

    #[test]
    fn stored_json_uses_legacy_field_names() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        log.append(record(3), &mut store).unwrap();
        let json = store.get(PERSISTENCE.keys.history).unwrap();
        for field in [
            "\"coin\"", "\"days\"", "\"currentPrice\"", "\"priceChange\"",
            "\"percentChange\"", "\"minPrice\"", "\"maxPrice\"",
        ] {
            assert!(json.contains(field), "missing {field} in {json}");
        }
    }

    #[test]
    fn record_from_stats() {
        let params = QueryParameters::default();
        let stats = DerivedStats {
            current: 120.0,
            absolute_change: 20.0,
            percent_change: 20.0,
            min: 95.0,
            max: 120.0,
        };
        let r = HistoryRecord::new("2024-01-01 00:00:00", &params, &stats);
        assert_eq!(r.asset, "bitcoin");
        assert_eq!(r.percent_change, "20.00");
        assert_eq!(
            r.csv_fields(),
            ["2024-01-01 00:00:00", "bitcoin", "7", "usd", "120", "20", "20.00", "95", "120"]
                .map(String::from)
        );
    }

    proptest! {
        #[test]
        fn never_exceeds_capacity(n in 0u32..80) {
            let mut log = HistoryLog::new();
            for i in 0..n {
                log.push_newest(record(i));
                prop_assert!(log.len() <= HISTORY_CAPACITY);
            }
            prop_assert_eq!(log.len(), (n as usize).min(HISTORY_CAPACITY));
        }
    }
}
