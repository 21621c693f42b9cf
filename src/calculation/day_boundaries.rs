//! Local day detection and midnight splitting.
//!
//! Shifts are stored as absolute instants but pricing rules speak in local
//! calendar days and clock times. This module maps between the two and
//! splits a span at every local midnight so that no priced segment ever
//! crosses a weekday transition.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Longest DST gap we search across when a local time does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// A sub-range of a shift that lies within one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRange {
    /// Range start (inclusive).
    pub start: DateTime<Utc>,
    /// Range end (exclusive).
    pub end: DateTime<Utc>,
    /// The local calendar date the range belongs to.
    pub local_date: NaiveDate,
}

/// Converts a local wall-clock time to an instant.
///
/// Ambiguous times (clocks going back) resolve to the earliest instant.
/// Times inside a DST gap resolve to the first valid instant after the gap.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::local_instant;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // Lisbon springs forward at 01:00 on 2026-03-29; 01:30 does not exist.
/// let naive = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap().and_hms_opt(1, 30, 0).unwrap();
/// let instant = local_instant(chrono_tz::Europe::Lisbon, naive);
/// assert_eq!(instant, Utc.with_ymd_and_hms(2026, 3, 29, 1, 0, 0).unwrap());
/// ```
pub fn local_instant(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
        return instant.with_timezone(&Utc);
    }

    // Walk forward to the end of the gap.
    let mut candidate = naive.with_second(0).unwrap_or(naive).with_nanosecond(0).unwrap_or(naive);
    for _ in 0..MAX_GAP_MINUTES {
        candidate += Duration::minutes(1);
        if let Some(instant) = tz.from_local_datetime(&candidate).earliest() {
            return instant.with_timezone(&Utc);
        }
    }

    Utc.from_utc_datetime(&naive)
}

/// Returns the local calendar date of an instant.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Splits `[start, end)` at every local midnight strictly inside it.
///
/// Returns the day ranges in chronological order. Their union is exactly
/// `[start, end)`. An empty or inverted span yields no ranges.
///
/// # Example
///
/// ```
/// use shift_earnings::calculation::split_by_local_day;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // Saturday 22:00 to Sunday 06:00 in winter Lisbon (UTC+0)
/// let start = Utc.with_ymd_and_hms(2026, 1, 17, 22, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 18, 6, 0, 0).unwrap();
///
/// let days = split_by_local_day(start, end, chrono_tz::Europe::Lisbon);
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[0].local_date, NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
/// assert_eq!(days[1].start, Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap());
/// ```
pub fn split_by_local_day(start: DateTime<Utc>, end: DateTime<Utc>, tz: Tz) -> Vec<DayRange> {
    let mut ranges = Vec::new();
    let mut current = start;

    while current < end {
        let date = local_date(current, tz);
        let next_midnight = date
            .succ_opt()
            .map(|next| local_instant(tz, next.and_time(NaiveTime::MIN)));

        let range_end = match next_midnight {
            Some(midnight) if midnight > current && midnight < end => midnight,
            _ => end,
        };

        ranges.push(DayRange {
            start: current,
            end: range_end,
            local_date: date,
        });
        current = range_end;
    }

    ranges
}

/// Returns the number of hours between two instants.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    Decimal::from(millis_between(start, end)) / Decimal::from(MILLIS_PER_HOUR)
}

/// Returns the number of milliseconds between two instants.
pub fn millis_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_milliseconds()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};
    use chrono_tz::Europe::Lisbon;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_span_is_one_range() {
        let days = split_by_local_day(utc(2026, 1, 14, 9, 0), utc(2026, 1, 14, 17, 0), Lisbon);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].local_date, date(2026, 1, 14));
        assert_eq!(hours_between(days[0].start, days[0].end), Decimal::from(8));
    }

    #[test]
    fn test_overnight_span_splits_at_midnight() {
        let days = split_by_local_day(utc(2026, 1, 17, 22, 0), utc(2026, 1, 18, 6, 0), Lisbon);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].local_date.weekday(), Weekday::Sat);
        assert_eq!(days[0].end, utc(2026, 1, 18, 0, 0));
        assert_eq!(days[1].local_date.weekday(), Weekday::Sun);
        assert_eq!(days[1].start, utc(2026, 1, 18, 0, 0));
        assert_eq!(hours_between(days[0].start, days[0].end), Decimal::from(2));
        assert_eq!(hours_between(days[1].start, days[1].end), Decimal::from(6));
    }

    #[test]
    fn test_span_ending_at_midnight_is_not_split() {
        let days = split_by_local_day(utc(2026, 1, 17, 20, 0), utc(2026, 1, 18, 0, 0), Lisbon);
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].local_date, date(2026, 1, 17));
    }

    #[test]
    fn test_multi_day_span() {
        let days = split_by_local_day(utc(2026, 1, 16, 20, 0), utc(2026, 1, 19, 8, 0), Lisbon);
        assert_eq!(days.len(), 4);
        let total: Decimal = days.iter().map(|d| hours_between(d.start, d.end)).sum();
        assert_eq!(total, Decimal::from(60));
        for pair in days.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_midnight_follows_local_timezone() {
        // Lisbon summer time is UTC+1, so local midnight is 23:00 UTC.
        let days = split_by_local_day(utc(2026, 7, 10, 20, 0), utc(2026, 7, 11, 4, 0), Lisbon);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].end, utc(2026, 7, 10, 23, 0));
        assert_eq!(days[1].local_date, date(2026, 7, 11));
    }

    #[test]
    fn test_empty_span_has_no_ranges() {
        let at = utc(2026, 1, 14, 9, 0);
        assert!(split_by_local_day(at, at, Lisbon).is_empty());
    }

    #[test]
    fn test_ambiguous_local_time_resolves_to_earliest() {
        // Lisbon falls back at 02:00 summer time on 2026-10-25; 01:30 happens twice.
        let naive = date(2026, 10, 25).and_hms_opt(1, 30, 0).unwrap();
        assert_eq!(local_instant(Lisbon, naive), utc(2026, 10, 25, 0, 30));
    }

    #[test]
    fn test_gap_local_time_resolves_after_gap() {
        let naive = date(2026, 3, 29).and_hms_opt(1, 15, 0).unwrap();
        assert_eq!(local_instant(Lisbon, naive), utc(2026, 3, 29, 1, 0));
    }

    #[test]
    fn test_local_date_uses_timezone() {
        let instant = utc(2026, 7, 10, 23, 30);
        assert_eq!(local_date(instant, Lisbon), date(2026, 7, 11));
        assert_eq!(local_date(instant, chrono_tz::UTC), date(2026, 7, 10));
    }
}
