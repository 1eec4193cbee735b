//! 时间工具函数 - 业务时区转换
//!
//! Draft dates and times are wall-clock values in the restaurant's business
//! timezone; bookings are stored as UTC instants.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// 解析时间字符串 (HH:MM)
pub fn parse_time(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()
}

/// 日期 + 时分 → UTC instant (业务时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
pub fn local_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> DateTime<Utc> {
    let naive = date.and_time(time);
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}

/// Calendar date of an instant in the business timezone
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_and_time() {
        assert_eq!(parse_date("2026-11-02"), NaiveDate::from_ymd_opt(2026, 11, 2));
        assert_eq!(parse_date(" 2026-11-02 "), NaiveDate::from_ymd_opt(2026, 11, 2));
        assert!(parse_date("02/11/2026").is_none());
        assert!(parse_date("").is_none());
        assert_eq!(parse_time("19:30"), NaiveTime::from_hms_opt(19, 30, 0));
        assert!(parse_time("7pm").is_none());
    }

    #[test]
    fn test_local_to_utc_applies_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let time = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
        // Madrid is UTC+2 in summer
        let utc = local_to_utc(date, time, chrono_tz::Europe::Madrid);
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 7, 1, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_local_to_utc_dst_gap_falls_back() {
        // 2026-03-29 02:30 does not exist in Madrid
        let date = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();
        let time = NaiveTime::from_hms_opt(2, 30, 0).unwrap();
        let utc = local_to_utc(date, time, chrono_tz::Europe::Madrid);
        assert_eq!(utc, Utc.with_ymd_and_hms(2026, 3, 29, 2, 30, 0).unwrap());
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let instant = Utc.with_ymd_and_hms(2026, 7, 1, 23, 0, 0).unwrap();
        assert_eq!(local_date(instant, Tz::UTC), NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(
            local_date(instant, chrono_tz::Europe::Madrid),
            NaiveDate::from_ymd_opt(2026, 7, 2).unwrap()
        );
    }
}
