use chrono::{DateTime, Local, TimeZone};

pub struct TimeUtils;

impl TimeUtils {
    /// No commas, so timestamps stay one CSV cell.
    pub const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Local wall-clock time for stamping history records.
pub fn now_record_timestamp() -> String {
    format_record_timestamp(&Local::now())
}

pub fn format_record_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(TimeUtils::RECORD_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn record_format_has_no_commas() {
        let dt = Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 3).unwrap();
        let s = format_record_timestamp(&dt);
        assert_eq!(s, "2026-10-19 09:05:03");
        assert!(!now_record_timestamp().contains(','));
    }
}
