//! In-memory surface that records the scene instead of drawing it.
//! Used by the headless binary and by tests.

use super::surface::{ChartOptions, ChartSurface, SeriesData, SeriesId, SeriesKind, SeriesStyle};
use crate::range::LogicalRange;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

#[derive(Debug, Clone, PartialEq)]
pub struct DrawnSeries {
    pub kind: SeriesKind,
    pub style: SeriesStyle,
    pub data: SeriesData,
}

#[derive(Debug)]
pub struct RecordingSurface {
    options: ChartOptions,
    series: BTreeMap<SeriesId, DrawnSeries>,
    next_id: u64,
    visible_range: Option<LogicalRange>,
    fit_count: usize,
    dispose_count: usize,
}

impl RecordingSurface {
    pub fn width(&self) -> u32 {
        self.options.width
    }

    pub fn height(&self) -> u32 {
        self.options.height
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self, id: SeriesId) -> Option<&DrawnSeries> {
        self.series.get(&id)
    }

    pub fn all_series(&self) -> impl Iterator<Item = (&SeriesId, &DrawnSeries)> {
        self.series.iter()
    }

    pub fn count_of(&self, kind: SeriesKind) -> usize {
        self.series.values().filter(|s| s.kind == kind).count()
    }

    pub fn visible_range(&self) -> Option<LogicalRange> {
        self.visible_range
    }

    pub fn fit_count(&self) -> usize {
        self.fit_count
    }

    pub fn dispose_count(&self) -> usize {
        self.dispose_count
    }

    /// Sparkline of the first-added series, restricted to the visible range.
    pub fn sparkline(&self) -> String {
        let Some(drawn) = self.series.values().next() else {
            return String::new();
        };
        let values = drawn.data.scalars();
        let values = match self.visible_range {
            Some(r) => &values[r.from.min(values.len())..r.to.min(values.len())],
            None => &values[..],
        };

        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
        let span = max - min;

        values
            .iter()
            .map(|v| {
                if span <= f64::EPSILON {
                    SPARK[SPARK.len() / 2]
                } else {
                    let level = ((v - min) / span * (SPARK.len() - 1) as f64).round() as usize;
                    SPARK[level.min(SPARK.len() - 1)]
                }
            })
            .collect()
    }
}

impl ChartSurface for RecordingSurface {
    fn create(options: &ChartOptions) -> Self {
        debug!("surface created {}x{}", options.width, options.height);
        Self {
            options: options.clone(),
            series: BTreeMap::new(),
            next_id: 0,
            visible_range: None,
            fit_count: 0,
            dispose_count: 0,
        }
    }

    fn add_series(&mut self, kind: SeriesKind, style: SeriesStyle) -> SeriesId {
        self.next_id += 1;
        let id = SeriesId(self.next_id);
        self.series.insert(
            id,
            DrawnSeries {
                kind,
                style,
                data: SeriesData::Values(Vec::new()),
            },
        );
        id
    }

    fn set_data(&mut self, id: SeriesId, data: SeriesData) {
        match self.series.get_mut(&id) {
            Some(drawn) => drawn.data = data,
            None => warn!("set_data on unknown series {:?}", id),
        }
    }

    fn remove_series(&mut self, id: SeriesId) {
        if self.series.remove(&id).is_none() {
            warn!("remove_series on unknown series {:?}", id);
        }
    }

    fn set_width(&mut self, width: u32) {
        self.options.width = width;
    }

    fn fit_content(&mut self) {
        self.fit_count += 1;
        self.visible_range = None;
    }

    fn set_visible_logical_range(&mut self, range: LogicalRange) {
        self.visible_range = Some(range);
    }

    fn dispose(&mut self) {
        self.dispose_count += 1;
        self.series.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::surface::ValueDatum;

    fn values(vs: &[f64]) -> SeriesData {
        SeriesData::Values(
            vs.iter()
                .enumerate()
                .map(|(i, v)| ValueDatum { time: i as i64, value: *v })
                .collect(),
        )
    }

    #[test]
    fn test_records_series_lifecycle() {
        let mut surface = RecordingSurface::create(&ChartOptions::new(640, 500));
        let id = surface.add_series(SeriesKind::Line, SeriesStyle::default());
        surface.set_data(id, values(&[1.0, 2.0]));
        assert_eq!(surface.series(id).unwrap().data.len(), 2);

        surface.remove_series(id);
        assert_eq!(surface.series_count(), 0);

        surface.set_width(320);
        assert_eq!(surface.width(), 320);
    }

    #[test]
    fn test_sparkline_respects_visible_range() {
        let mut surface = RecordingSurface::create(&ChartOptions::new(640, 500));
        let id = surface.add_series(SeriesKind::Line, SeriesStyle::default());
        surface.set_data(id, values(&[1.0, 2.0, 3.0, 4.0]));
        assert_eq!(surface.sparkline(), "▁▃▆█");

        surface.set_visible_logical_range(LogicalRange { from: 2, to: 4 });
        assert_eq!(surface.sparkline(), "▁█");
    }
}
