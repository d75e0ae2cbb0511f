//! Raw daily records → canonical time series.
//!
//! Records are filtered by symbol and lookback window, their dates parsed
//! from either `YYYY-MM-DD` or `DD-MM-YYYY`, numeric fields coerced, and the
//! result deduplicated by timestamp (later input wins) and sorted ascending.

use crate::models::{Point, RawRecord, RawValue, Series};
use chrono::{NaiveDate, TimeDelta};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Bars are stamped at noon UTC so a calendar date never drifts across a
/// day boundary when shown in a local timezone.
pub const NORMALIZATION_HOUR: u32 = 12;

/// Parse a date in ISO `YYYY-MM-DD` (optionally followed by a `T…` time) or
/// `DD-MM-YYYY` form. The layout is decided by where the dashes sit, so a
/// two-digit day is never mistaken for a year.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let s = s.split_once('T').map_or(s, |(day, _)| day);
    let bytes = s.as_bytes();
    if bytes.len() != 10 {
        return None;
    }

    if bytes[4] == b'-' && bytes[7] == b'-' {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
    } else if bytes[2] == b'-' && bytes[5] == b'-' {
        NaiveDate::parse_from_str(s, "%d-%m-%Y").ok()
    } else {
        None
    }
}

/// Seconds since the epoch at [`NORMALIZATION_HOUR`] UTC of `date`.
pub fn timestamp_of(date: NaiveDate) -> i64 {
    date.and_hms_opt(NORMALIZATION_HOUR, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// First calendar day inside a `days` lookback ending at `reference`.
///
/// A negative lookback is treated as zero; one reaching past chrono's
/// calendar saturates to [`NaiveDate::MIN`].
pub fn lookback_start(reference: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days.max(0))
        .and_then(|span| reference.checked_sub_signed(span))
        .unwrap_or(NaiveDate::MIN)
}

pub fn normalise_symbol(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Build the series for `symbol` covering `timeframe_days` before `reference`.
///
/// Never fails: records with an unparseable date or price are skipped, and
/// no matching record yields an empty series.
pub fn normalize(
    records: &[RawRecord],
    symbol: &str,
    timeframe_days: i64,
    reference: NaiveDate,
) -> Series {
    let symbol = normalise_symbol(symbol);
    let cutoff = lookback_start(reference, timeframe_days);

    let mut by_time: BTreeMap<i64, Point> = BTreeMap::new();
    let mut skipped = 0usize;

    for rec in records.iter().filter(|r| normalise_symbol(&r.symbol) == symbol) {
        let Some(date) = parse_date(&rec.date) else {
            debug!("{}: skipping record with unparseable date {:?}", symbol, rec.date);
            skipped += 1;
            continue;
        };
        if date < cutoff {
            continue;
        }

        let Some(point) = to_point(rec, date) else {
            debug!("{}: skipping {} with non-numeric prices", symbol, date);
            skipped += 1;
            continue;
        };

        by_time.insert(point.time, point);
    }

    let points: Vec<Point> = by_time.into_values().collect();
    info!(
        "{}: {} points in {}-day window ({} skipped)",
        symbol,
        points.len(),
        timeframe_days,
        skipped
    );

    Series {
        symbol,
        timeframe_days,
        points,
    }
}

fn to_point(rec: &RawRecord, date: NaiveDate) -> Option<Point> {
    Some(Point {
        time: timestamp_of(date),
        open: rec.open.as_f64()?,
        high: rec.high.as_f64()?,
        low: rec.low.as_f64()?,
        close: rec.close.as_f64()?,
        volume: rec.volume.as_ref().and_then(RawValue::as_f64).unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(symbol: &str, date: &str, close: &str) -> RawRecord {
        RawRecord {
            symbol: symbol.to_string(),
            date: date.to_string(),
            open: "10".into(),
            high: "12".into(),
            low: "9".into(),
            close: close.into(),
            volume: None,
        }
    }

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    #[test]
    fn test_both_date_formats_agree() {
        let iso = parse_date("2024-12-15").unwrap();
        let dmy = parse_date("15-12-2024").unwrap();
        assert_eq!(iso, dmy);
        assert_eq!(timestamp_of(iso), timestamp_of(dmy));
        // 2024-12-15T12:00:00Z
        assert_eq!(timestamp_of(iso), 1_734_264_000);
        assert_eq!(parse_date("2024-12-15T00:00:00.000Z"), Some(iso));
    }

    #[test]
    fn test_bad_dates_rejected() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("15/12/2024"), None);
        assert_eq!(parse_date("31-02-2024"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("Dec 15, 2024"), None);
    }

    #[test]
    fn test_sorted_and_unique() {
        let records = vec![
            rec("AAPL", "03-01-2025", "3"),
            rec("AAPL", "2025-01-01", "1"),
            rec("AAPL", "02-01-2025", "2"),
            rec("AAPL", "2025-01-03", "3.5"),
        ];
        let series = normalize(&records, "AAPL", 30, reference());
        assert_eq!(series.len(), 3);
        assert!(series.points.windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let records = vec![
            rec("AAPL", "2025-01-02", "100"),
            rec("AAPL", "02-01-2025", "105"),
        ];
        let series = normalize(&records, "AAPL", 30, reference());
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].close, 105.0);
    }

    #[test]
    fn test_timeframe_cutoff() {
        let records = vec![
            rec("AAPL", "2024-11-01", "1"),
            rec("AAPL", "2024-12-15", "2"),
        ];
        let series = normalize(&records, "AAPL", 30, reference());
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].close, 2.0);
    }

    #[test]
    fn test_filters_symbol_and_skips_garbage() {
        let mut no_volume = rec("aapl ", "2025-01-05", "7");
        no_volume.volume = Some("n/a".into());
        let records = vec![
            rec("MSFT", "2025-01-05", "300"),
            rec("AAPL", "not a date", "1"),
            rec("AAPL", "2025-01-06", "n/a"),
            no_volume,
        ];
        let series = normalize(&records, "AAPL", 30, reference());
        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].close, 7.0);
        assert_eq!(series.points[0].volume, 0.0);
    }

    #[test]
    fn test_lookback_start_saturates() {
        let reference = reference();
        assert_eq!(lookback_start(reference, 30), NaiveDate::from_ymd_opt(2024, 12, 11).unwrap());
        assert_eq!(lookback_start(reference, -5), reference);
        assert_eq!(lookback_start(reference, 1_000_000_000), NaiveDate::MIN);
        assert_eq!(lookback_start(reference, i64::MAX), NaiveDate::MIN);
    }

    #[test]
    fn test_huge_lookback_keeps_everything() {
        let records = vec![
            rec("AAPL", "1990-01-02", "1"),
            rec("AAPL", "2025-01-09", "2"),
        ];
        let series = normalize(&records, "AAPL", 1_000_000_000, reference());
        assert_eq!(series.len(), 2);
        assert!(normalize(&[], "AAPL", i64::MAX, reference()).is_empty());
    }

    #[test]
    fn test_negative_lookback_keeps_reference_day_onward() {
        let records = vec![
            rec("AAPL", "2025-01-09", "1"),
            rec("AAPL", "2025-01-10", "2"),
        ];
        let series = normalize(&records, "AAPL", -3, reference());
        assert_eq!(series.len(), 1);
        assert_eq!(series.points[0].close, 2.0);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let series = normalize(&[], "AAPL", 30, reference());
        assert!(series.is_empty());
        assert_eq!(series.timeframe_days, 30);
    }
}
