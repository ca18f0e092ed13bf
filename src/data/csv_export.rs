//! History export. Plain comma joins: values are not quoted, so a field that itself
//! contains a comma shifts the columns of its row.
use {
    crate::{
        config::{
            PERSISTENCE,
            constants::csv::{HEADER, SEPARATOR},
        },
        models::HistoryLog,
    },
    anyhow::{Context, Result},
    itertools::Itertools,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// Header line plus one line per record, newest first. Every line ends in `\n`.
pub fn export_csv(log: &HistoryLog) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&HEADER.iter().join(SEPARATOR));
    out.push('\n');
    for record in log.iter() {
        out.push_str(&record.csv_fields().iter().join(SEPARATOR));
        out.push('\n');
    }
    out.into_bytes()
}

/// Writes the export as `history.csv` inside `dir`, returning the file path.
pub fn write_csv(log: &HistoryLog, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(PERSISTENCE.export.csv_filename);
    fs::write(&path, export_csv(log))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Exported {} history records to {}", log.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::models::test_support::record;

    const HEADER_LINE: &str = "Timestamp,Coin,Days,Currency,Current,Change,Percent,Min,Max";

    #[test]
    fn empty_log_is_header_and_newline() {
        let bytes = export_csv(&HistoryLog::new());
        assert_eq!(String::from_utf8(bytes).unwrap(), format!("{HEADER_LINE}\n"));
    }

    #[test]
    fn rows_round_trip_newest_first() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        for n in 1..=3 {
            log.append(record(n), &mut store).unwrap();
        }

        let text = String::from_utf8(export_csv(&log)).unwrap();
        assert!(text.ends_with('\n'));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);

        let header: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(header, HEADER.to_vec());

        for (line, rec) in lines[1..].iter().zip(log.iter()) {
            let cells: Vec<String> = line.split(',').map(String::from).collect();
            assert_eq!(cells, rec.csv_fields().to_vec());
        }
        assert!(lines[1].contains(",3,"));
        assert!(lines[3].starts_with(&record(1).timestamp));
    }

    #[test]
    fn fixture_row_literals() {
        let mut store = MemoryStore::new();
        let mut log = HistoryLog::new();
        let mut r = record(0);
        r.timestamp = "2026-10-19 09:30:00".into();
        r.current = 120.0;
        r.absolute_change = 20.0;
        r.percent_change = "20.00".into();
        r.min = 95.0;
        r.max = 120.0;
        log.append(r, &mut store).unwrap();

        let text = String::from_utf8(export_csv(&log)).unwrap();
        assert_eq!(
            text,
            format!("{HEADER_LINE}\n2026-10-19 09:30:00,bitcoin,7,usd,120,20,20.00,95,120\n")
        );
    }

    #[test]
    fn write_csv_names_file_history_csv() {
        let dir = std::env::temp_dir().join(format!("coin_dashboard_csv_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = write_csv(&HistoryLog::new(), &dir).unwrap();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("history.csv"));
        assert_eq!(fs::read_to_string(&path).unwrap(), format!("{HEADER_LINE}\n"));
        let _ = fs::remove_dir_all(&dir);
    }
}
