//! Dashboard selection state: symbol, lookback window, chart type and the
//! indicator toggle. Transient; never persisted.

use crate::error::DashboardError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Timeframe ─────────────────────────────────────────────────────────────────

/// Named lookback window used to filter the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    OneDay,
    FiveDays,
    #[default]
    OneMonth,
    ThreeMonths,
    FiveMonths,
    SixMonths,
    YearToDate,
    OneYear,
    FiveYears,
}

impl Timeframe {
    pub fn all() -> &'static [Timeframe] {
        &[
            Timeframe::OneDay,
            Timeframe::FiveDays,
            Timeframe::OneMonth,
            Timeframe::ThreeMonths,
            Timeframe::FiveMonths,
            Timeframe::SixMonths,
            Timeframe::YearToDate,
            Timeframe::OneYear,
            Timeframe::FiveYears,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::FiveDays => "5D",
            Timeframe::OneMonth => "1M",
            Timeframe::ThreeMonths => "3M",
            Timeframe::FiveMonths => "5M",
            Timeframe::SixMonths => "6M",
            Timeframe::YearToDate => "YTD",
            Timeframe::OneYear => "1Y",
            Timeframe::FiveYears => "5Y",
        }
    }

    /// Lookback length in days. `YTD` depends on the reference date.
    pub fn days(&self, reference: NaiveDate) -> i64 {
        match self {
            Timeframe::OneDay => 1,
            Timeframe::FiveDays => 5,
            Timeframe::OneMonth => 30,
            Timeframe::ThreeMonths => 90,
            Timeframe::FiveMonths => 150,
            Timeframe::SixMonths => 180,
            Timeframe::YearToDate => NaiveDate::from_ymd_opt(reference.year(), 1, 1)
                .map(|jan1| (reference - jan1).num_days())
                .unwrap_or(0),
            Timeframe::OneYear => 365,
            Timeframe::FiveYears => 1825,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Timeframe {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Timeframe::all()
            .iter()
            .copied()
            .find(|tf| tf.label() == wanted)
            .ok_or_else(|| DashboardError::UnknownTimeframe(s.to_string()))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.label().to_string()
    }
}

// ── Chart type ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Line,
    VertexLine,
    Candles,
    Bar,
    ColouredBar,
    Histogram,
}

impl ChartType {
    pub fn all() -> &'static [ChartType] {
        &[
            ChartType::Line,
            ChartType::VertexLine,
            ChartType::Candles,
            ChartType::Bar,
            ChartType::ColouredBar,
            ChartType::Histogram,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::VertexLine => "Vertex Line",
            ChartType::Candles => "Candles",
            ChartType::Bar => "Bar",
            ChartType::ColouredBar => "Coloured Bar",
            ChartType::Histogram => "Histogram",
        }
    }

    /// Candles and bars draw full OHLC; everything else draws the close.
    pub fn needs_ohlc(&self) -> bool {
        matches!(self, ChartType::Candles | ChartType::Bar)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartType {
    type Err = DashboardError;

    /// Case-, space- and dash-insensitive: "coloured-bar" == "Coloured Bar".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = |v: &str| -> String {
            v.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        };
        let wanted = key(s);
        ChartType::all()
            .iter()
            .copied()
            .find(|ct| key(ct.label()) == wanted)
            .ok_or_else(|| DashboardError::UnknownChartType(s.to_string()))
    }
}

impl TryFrom<String> for ChartType {
    type Error = DashboardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ChartType> for String {
    fn from(ct: ChartType) -> Self {
        ct.label().to_string()
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub chart_type: ChartType,
    pub indicators: bool,
}

impl SelectionState {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: Timeframe::default(),
            chart_type: ChartType::default(),
            indicators: false,
        }
    }
}
