use serde::{Deserialize, Serialize};

// ── Raw snapshot rows ─────────────────────────────────────────────────────────

/// A numeric field as it appears in a snapshot: exported sheets carry prices
/// as strings ("182.50"), the generator emits real numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Coerce to `f64`. Text is cleaned of everything except digits, dot and
    /// minus, so "USD 1,234.56" → 1234.56.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) if n.is_finite() => Some(*n),
            RawValue::Number(_) => None,
            RawValue::Text(s) => parse_price(s),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

/// Parse price: strip everything except digits, dot, minus.
/// "USD 1,234.56" → 1234.56 | "610.00" → 610.0
pub fn parse_price(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "N/A" || s == "-" || s == "—" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// One daily OHLCV row, in whichever shape the data provider produced it.
///
/// Accepts both the capitalised column names of the bundled snapshot
/// (`Symbol`, `Date`, `Close`, …) and the lowercase names of generated data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "Symbol", default)]
    pub symbol: String,
    #[serde(alias = "Date")]
    pub date: String,
    #[serde(alias = "Open")]
    pub open: RawValue,
    #[serde(alias = "High")]
    pub high: RawValue,
    #[serde(alias = "Low")]
    pub low: RawValue,
    #[serde(alias = "Close")]
    pub close: RawValue,
    #[serde(alias = "Volume", default)]
    pub volume: Option<RawValue>,
}

// ── Canonical series ──────────────────────────────────────────────────────────

/// Canonical daily bar. `time` is seconds since the epoch at the fixed
/// normalisation hour of the bar's calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Time-ascending points for one symbol and one timeframe window.
/// Timestamps are strictly increasing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Series {
    pub symbol: String,
    pub timeframe_days: i64,
    pub points: Vec<Point>,
}

impl Series {
    pub fn empty(symbol: impl Into<String>, timeframe_days: i64) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe_days,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub sector: String,
}

/// Generator parameters for a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    pub base_price: f64,
    pub volatility: f64,
}

// ── Derived views ─────────────────────────────────────────────────────────────

/// Latest-bar summary: price, change against the previous bar, day range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockSummary {
    pub symbol: String,
    pub latest_price: f64,
    pub daily_change: f64,
    pub daily_change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchlistEntry {
    pub symbol: String,
    pub name: String,
    pub latest_price: f64,
    pub change_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("USD 1,234.56"), Some(1234.56));
        assert_eq!(parse_price("610.00"), Some(610.0));
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price("  "), None);
    }

    #[test]
    fn test_raw_record_accepts_both_casings() {
        let snapshot = r#"{"Symbol":"AAPL","Date":"15-12-2024","Open":"180.1","High":"182","Low":"179.5","Close":"181.25","Volume":"1200"}"#;
        let rec: RawRecord = serde_json::from_str(snapshot).unwrap();
        assert_eq!(rec.symbol, "AAPL");
        assert_eq!(rec.close.as_f64(), Some(181.25));
        assert_eq!(rec.volume.and_then(|v| v.as_f64()), Some(1200.0));

        let generated = r#"{"symbol":"MSFT","date":"2024-12-15","open":320.0,"high":321.5,"low":318.0,"close":319.8}"#;
        let rec: RawRecord = serde_json::from_str(generated).unwrap();
        assert_eq!(rec.date, "2024-12-15");
        assert_eq!(rec.high.as_f64(), Some(321.5));
        assert!(rec.volume.is_none());
    }
}
