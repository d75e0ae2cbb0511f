//! Chart type → drawing primitive, palette and value shape.

use super::surface::{LineStyle, OhlcDatum, SeriesData, SeriesKind, SeriesStyle, ValueDatum};
use crate::models::Point;
use crate::selection::ChartType;

const UP: &str = "#26a69a";
const DOWN: &str = "#ef5350";
const BLUE: &str = "#2563eb";
const LIGHT_BLUE: &str = "#93C5FD";
const HIGH_GREEN: &str = "#10B981";
const LOW_RED: &str = "#EF4444";

pub fn primary_series(chart_type: ChartType) -> (SeriesKind, SeriesStyle) {
    match chart_type {
        ChartType::Candles => (
            SeriesKind::Candlestick,
            SeriesStyle {
                up_color: Some(UP),
                down_color: Some(DOWN),
                border_visible: false,
                ..SeriesStyle::default()
            },
        ),
        ChartType::Bar => (
            SeriesKind::Bar,
            SeriesStyle {
                up_color: Some(UP),
                down_color: Some(DOWN),
                ..SeriesStyle::default()
            },
        ),
        ChartType::ColouredBar => (
            SeriesKind::Histogram,
            SeriesStyle {
                color: BLUE,
                price_precision: Some(2),
                ..SeriesStyle::default()
            },
        ),
        ChartType::Histogram => (
            SeriesKind::Histogram,
            SeriesStyle {
                color: LIGHT_BLUE,
                price_precision: Some(2),
                ..SeriesStyle::default()
            },
        ),
        ChartType::VertexLine => (
            SeriesKind::Line,
            SeriesStyle {
                line_style: LineStyle::Dotted,
                crosshair_marker_radius: Some(4),
                ..SeriesStyle::default()
            },
        ),
        ChartType::Line => (
            SeriesKind::Line,
            SeriesStyle {
                crosshair_marker_radius: Some(4),
                ..SeriesStyle::default()
            },
        ),
    }
}

fn overlay(color: &'static str) -> SeriesStyle {
    SeriesStyle {
        color,
        line_width: 1,
        line_style: LineStyle::Dashed,
        ..SeriesStyle::default()
    }
}

pub fn high_overlay() -> SeriesStyle {
    overlay(HIGH_GREEN)
}

pub fn low_overlay() -> SeriesStyle {
    overlay(LOW_RED)
}

/// Shape the points for `chart_type`: OHLC for candles and bars, the close
/// as a scalar for everything else.
pub fn primary_data(chart_type: ChartType, points: &[Point]) -> SeriesData {
    if chart_type.needs_ohlc() {
        SeriesData::Ohlc(
            points
                .iter()
                .map(|p| OhlcDatum {
                    time: p.time,
                    open: p.open,
                    high: p.high,
                    low: p.low,
                    close: p.close,
                })
                .collect(),
        )
    } else {
        scalar_data(points, |p| p.close)
    }
}

pub fn scalar_data(points: &[Point], value: impl Fn(&Point) -> f64) -> SeriesData {
    SeriesData::Values(
        points
            .iter()
            .map(|p| ValueDatum {
                time: p.time,
                value: value(p),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<Point> {
        vec![
            Point {
                time: 1,
                open: 1.0,
                high: 3.0,
                low: 0.5,
                close: 2.0,
                volume: 0.0,
            },
            Point {
                time: 2,
                open: 2.0,
                high: 4.0,
                low: 1.5,
                close: 3.5,
                volume: 0.0,
            },
        ]
    }

    #[test]
    fn test_dispatch_kinds() {
        assert_eq!(primary_series(ChartType::Candles).0, SeriesKind::Candlestick);
        assert_eq!(primary_series(ChartType::Bar).0, SeriesKind::Bar);
        assert_eq!(primary_series(ChartType::Histogram).0, SeriesKind::Histogram);
        assert_eq!(primary_series(ChartType::ColouredBar).0, SeriesKind::Histogram);
        assert_eq!(primary_series(ChartType::Line).0, SeriesKind::Line);

        let (kind, style) = primary_series(ChartType::VertexLine);
        assert_eq!(kind, SeriesKind::Line);
        assert_eq!(style.line_style, LineStyle::Dotted);
    }

    #[test]
    fn test_value_shapes() {
        match primary_data(ChartType::Candles, &points()) {
            SeriesData::Ohlc(d) => assert_eq!(d[1].high, 4.0),
            other => panic!("expected OHLC, got {:?}", other),
        }
        match primary_data(ChartType::Histogram, &points()) {
            SeriesData::Values(d) => {
                assert_eq!(d.iter().map(|v| v.value).collect::<Vec<_>>(), vec![2.0, 3.5])
            }
            other => panic!("expected values, got {:?}", other),
        }
    }

    #[test]
    fn test_overlays_are_dashed() {
        assert_eq!(high_overlay().line_style, LineStyle::Dashed);
        assert_eq!(low_overlay().color, LOW_RED);
        assert_eq!(scalar_data(&points(), |p| p.low).scalars(), vec![0.5, 1.5]);
    }
}
