//! The seam between the renderer and a concrete charting backend.

use crate::range::LogicalRange;
use serde::Serialize;

// ── Surface options ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub text_color: String,
    pub grid_color: String,
    pub time_visible: bool,
    pub seconds_visible: bool,
    pub border_visible: bool,
}

impl ChartOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: "#ffffff".to_string(),
            text_color: "#333".to_string(),
            grid_color: "#f0f0f0".to_string(),
            time_visible: true,
            seconds_visible: false,
            border_visible: false,
        }
    }
}

// ── Series descriptions ───────────────────────────────────────────────────────

/// Drawing primitive. Candlestick and bar take OHLC data, the others a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesKind {
    Line,
    Candlestick,
    Bar,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Solid,
    Dotted,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub color: &'static str,
    pub up_color: Option<&'static str>,
    pub down_color: Option<&'static str>,
    pub line_width: u8,
    pub line_style: LineStyle,
    pub crosshair_marker_radius: Option<u8>,
    pub price_precision: Option<u8>,
    pub border_visible: bool,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: "#2563eb",
            up_color: None,
            down_color: None,
            line_width: 2,
            line_style: LineStyle::Solid,
            crosshair_marker_radius: None,
            price_precision: None,
            border_visible: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OhlcDatum {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueDatum {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SeriesData {
    Ohlc(Vec<OhlcDatum>),
    Values(Vec<ValueDatum>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Ohlc(d) => d.len(),
            SeriesData::Values(d) => d.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn times(&self) -> Vec<i64> {
        match self {
            SeriesData::Ohlc(d) => d.iter().map(|p| p.time).collect(),
            SeriesData::Values(d) => d.iter().map(|p| p.time).collect(),
        }
    }

    /// One scalar per datum: the value, or the close for OHLC data.
    pub fn scalars(&self) -> Vec<f64> {
        match self {
            SeriesData::Ohlc(d) => d.iter().map(|p| p.close).collect(),
            SeriesData::Values(d) => d.iter().map(|p| p.value).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SeriesId(pub u64);

// ── Surface trait ─────────────────────────────────────────────────────────────

/// A persistent drawing surface owned by one mounted renderer.
pub trait ChartSurface {
    fn create(options: &ChartOptions) -> Self
    where
        Self: Sized;

    fn add_series(&mut self, kind: SeriesKind, style: SeriesStyle) -> SeriesId;
    fn set_data(&mut self, id: SeriesId, data: SeriesData);
    fn remove_series(&mut self, id: SeriesId);

    fn set_width(&mut self, width: u32);
    fn fit_content(&mut self);
    fn set_visible_logical_range(&mut self, range: LogicalRange);

    /// Release the native drawing context. Called exactly once, on unmount.
    fn dispose(&mut self);
}
