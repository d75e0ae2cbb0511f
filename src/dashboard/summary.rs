use crate::models::{Series, StockSummary};

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Summary of the latest bar against the one before it.
///
/// With a single bar the previous close is the latest close (zero change);
/// a zero previous close yields a zero percent change.
pub fn summarize(series: &Series) -> Option<StockSummary> {
    let latest = series.last()?;
    let prev_close = series
        .points
        .len()
        .checked_sub(2)
        .map(|i| series.points[i].close)
        .unwrap_or(latest.close);

    let change = latest.close - prev_close;
    let change_pct = if prev_close != 0.0 {
        change / prev_close * 100.0
    } else {
        0.0
    };

    Some(StockSummary {
        symbol: series.symbol.clone(),
        latest_price: latest.close,
        daily_change: round2(change),
        daily_change_percent: round2(change_pct),
        day_high: latest.high,
        day_low: latest.low,
        volume: latest.volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    fn point(time: i64, close: f64) -> Point {
        Point { time, open: close, high: close + 1.0, low: close - 1.0, close, volume: 500.0 }
    }

    fn series(closes: &[f64]) -> Series {
        Series {
            symbol: "JPM".to_string(),
            timeframe_days: 30,
            points: closes.iter().enumerate().map(|(i, c)| point(i as i64, *c)).collect(),
        }
    }

    #[test]
    fn test_change_against_previous_bar() {
        let s = summarize(&series(&[140.0, 150.0, 153.333])).unwrap();
        assert_eq!(s.latest_price, 153.333);
        assert_eq!(s.daily_change, 3.33);
        assert_eq!(s.daily_change_percent, 2.22);
        assert_eq!(s.day_high, 153.333 + 1.0);
        assert_eq!(s.volume, 500.0);
    }

    #[test]
    fn test_single_bar_and_empty() {
        let s = summarize(&series(&[99.0])).unwrap();
        assert_eq!(s.daily_change, 0.0);
        assert_eq!(s.daily_change_percent, 0.0);
        assert!(summarize(&series(&[])).is_none());

        let s = summarize(&series(&[0.0, 5.0])).unwrap();
        assert_eq!(s.daily_change, 5.0);
        assert_eq!(s.daily_change_percent, 0.0);
    }
}
