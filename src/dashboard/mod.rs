//! Dashboard: the parent view that owns selection state and drives the
//! normalizer, the main chart, the overview chart and the range selector.
//!
//! ## Update flow
//!
//! `select_symbol` / `select_timeframe` re-fetch records from the source;
//! chart type and indicator changes reuse the cached records. Either way the
//! series is re-normalized and replaced before the renderers see it, and the
//! range window's index range is recomputed against the new length.

pub mod summary;

use crate::catalog::company_info;
use crate::chart::{ChartRenderer, ChartSurface};
use crate::config::AppConfig;
use crate::events::EventRegistry;
use crate::models::{RawRecord, Series, StockSummary, WatchlistEntry};
use crate::normalizer::{normalise_symbol, normalize};
use crate::range::{Handle, RangeSelector, RangeWindow, SelectorBounds};
use crate::selection::{ChartType, SelectionState, Timeframe};
use crate::source::MarketDataSource;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

pub use self::summary::summarize;

/// Days requested from the source for watchlist prices and summaries.
/// Normalization of those records is not cut off: the latest bar counts
/// however old it is.
const SUMMARY_FETCH: Timeframe = Timeframe::FiveYears;

pub struct Dashboard<P: MarketDataSource, S: ChartSurface> {
    source: P,
    reference: NaiveDate,
    selection: SelectionState,
    records: Vec<RawRecord>,
    series: Series,
    main: ChartRenderer<S>,
    overview: Option<ChartRenderer<S>>,
    selector: RangeSelector,
    bounds: SelectorBounds,
    events: EventRegistry,
    watchlist: Vec<String>,
}

impl<P: MarketDataSource, S: ChartSurface> Dashboard<P, S> {
    /// Mount the charts and draw the configured initial selection.
    pub fn new(source: P, config: &AppConfig) -> Result<Self> {
        let mut events = EventRegistry::new();
        let width = config.chart.width;

        let mut main = ChartRenderer::new("main", config.chart.height);
        main.mount(width, &mut events)?;

        let overview = if config.dashboard.range_selector {
            let mut overview = ChartRenderer::new("overview", config.chart.overview_height);
            overview.mount(width, &mut events)?;
            Some(overview)
        } else {
            None
        };

        let selection = SelectionState {
            timeframe: config.dashboard.default_timeframe,
            chart_type: config.dashboard.default_chart_type,
            ..SelectionState::new(normalise_symbol(&config.dashboard.default_symbol))
        };

        let mut dashboard = Self {
            source,
            reference: config.data.reference_date,
            series: Series::empty(selection.symbol.clone(), 0),
            selection,
            records: Vec::new(),
            main,
            overview,
            selector: RangeSelector::default(),
            bounds: SelectorBounds {
                left: 0.0,
                width: f64::from(width),
            },
            events,
            watchlist: config.dashboard.watchlist.iter().map(|s| normalise_symbol(s)).collect(),
        };

        dashboard.reload()?;
        Ok(dashboard)
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn select_symbol(&mut self, symbol: &str) -> Result<()> {
        self.selection.symbol = normalise_symbol(symbol);
        self.reload()
    }

    pub fn select_timeframe(&mut self, timeframe: Timeframe) -> Result<()> {
        self.selection.timeframe = timeframe;
        self.reload()
    }

    pub fn set_chart_type(&mut self, chart_type: ChartType) -> Result<()> {
        self.selection.chart_type = chart_type;
        self.refresh()
    }

    pub fn toggle_indicators(&mut self) -> Result<()> {
        self.selection.indicators = !self.selection.indicators;
        self.refresh()
    }

    /// Set the range window directly, as if the handles had been dragged there.
    pub fn set_range(&mut self, window: RangeWindow) -> Result<()> {
        self.selector.set_window(window);
        self.apply_range()
    }

    // ── Window events ─────────────────────────────────────────────────────────

    /// Container resize: reapply widths only.
    pub fn resize(&mut self, width: u32) -> Result<()> {
        self.main.resize(width)?;
        if let Some(overview) = self.overview.as_mut() {
            overview.resize(width)?;
        }
        self.bounds.width = f64::from(width);
        Ok(())
    }

    pub fn pointer_down(&mut self, handle: Handle, x: f64) {
        if self.overview.is_none() {
            return;
        }
        self.selector.pointer_down(handle, x, &mut self.events);
    }

    pub fn pointer_move(&mut self, x: f64) -> Result<()> {
        if self.selector.pointer_move(x, self.bounds).is_some() {
            self.apply_range()?;
        }
        Ok(())
    }

    pub fn pointer_up(&mut self) {
        self.selector.pointer_up(&mut self.events);
    }

    // ── Derived views ─────────────────────────────────────────────────────────

    pub fn watchlist(&mut self) -> Result<Vec<WatchlistEntry>> {
        let symbols = self.watchlist.clone();
        symbols
            .iter()
            .map(|symbol| {
                let summary = self.summary(symbol)?;
                Ok(WatchlistEntry {
                    symbol: symbol.clone(),
                    name: company_info(symbol).name,
                    latest_price: summary.as_ref().map_or(0.0, |s| s.latest_price),
                    change_percent: summary.as_ref().map_or(0.0, |s| s.daily_change_percent),
                })
            })
            .collect()
    }

    /// Latest-bar summary for `symbol`, or `None` when it has no data.
    pub fn summary(&mut self, symbol: &str) -> Result<Option<StockSummary>> {
        let records = self
            .source
            .records(symbol, SUMMARY_FETCH.days(self.reference))
            .with_context(|| format!("records({})", symbol))?;
        Ok(summarize(&normalize(&records, symbol, i64::MAX, self.reference)))
    }

    pub fn available_symbols(&self) -> Vec<String> {
        self.source.symbols()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference
    }

    pub fn range_window(&self) -> RangeWindow {
        self.selector.window()
    }

    pub fn main_chart(&self) -> &ChartRenderer<S> {
        &self.main
    }

    pub fn overview_chart(&self) -> Option<&ChartRenderer<S>> {
        self.overview.as_ref()
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    /// Release any drag capture and unmount both charts.
    pub fn shutdown(&mut self) -> Result<()> {
        self.selector.pointer_up(&mut self.events);
        if self.main.is_mounted() {
            self.main.unmount(&mut self.events)?;
        }
        if let Some(overview) = self.overview.as_mut() {
            if overview.is_mounted() {
                overview.unmount(&mut self.events)?;
            }
        }
        debug!("dashboard shut down, {} listeners left", self.events.active_count());
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn reload(&mut self) -> Result<()> {
        let days = self.selection.timeframe.days(self.reference);
        self.records = self
            .source
            .records(&self.selection.symbol, days)
            .with_context(|| format!("records({})", self.selection.symbol))?;
        info!(
            "{} {}: {} raw records",
            self.selection.symbol,
            self.selection.timeframe,
            self.records.len()
        );
        self.refresh()
    }

    fn refresh(&mut self) -> Result<()> {
        let days = self.selection.timeframe.days(self.reference);
        self.series = normalize(&self.records, &self.selection.symbol, days, self.reference);

        self.main
            .render(&self.series, self.selection.chart_type, self.selection.indicators)?;
        if let Some(overview) = self.overview.as_mut() {
            overview.render(&self.series, ChartType::Line, false)?;
        }
        self.apply_range()
    }

    fn apply_range(&mut self) -> Result<()> {
        if self.overview.is_none() {
            return Ok(());
        }
        if self.series.is_empty() {
            warn!("{}: empty series, range window not applied", self.selection.symbol);
            return Ok(());
        }
        let range = self.selector.window().logical_range(self.series.len());
        self.main.apply_visible_range(range)?;
        Ok(())
    }
}

impl<P: MarketDataSource, S: ChartSurface> Drop for Dashboard<P, S> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("dashboard shutdown: {:#}", e);
        }
    }
}
