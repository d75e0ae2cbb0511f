//! Chart renderer: owns one surface for its mounted lifetime and redraws the
//! primary series (plus optional high/low overlays) on every update.
//!
//! Lifecycle: `Uninitialized → Mounted → Unmounted`. Updates only happen
//! while mounted; each one removes everything the previous update drew.

use super::style::{high_overlay, low_overlay, primary_data, primary_series, scalar_data};
use super::surface::{ChartOptions, ChartSurface, SeriesId, SeriesKind};
use crate::error::{DashboardError, Result};
use crate::events::{EventRegistry, ListenerId, ListenerKind};
use crate::models::Series;
use crate::range::LogicalRange;
use crate::selection::ChartType;
use tracing::{debug, info, warn};

struct Mounted<S> {
    surface: S,
    resize_listener: ListenerId,
    primary: Option<SeriesId>,
    overlays: Vec<SeriesId>,
}

enum Lifecycle<S> {
    Uninitialized,
    Mounted(Mounted<S>),
    Unmounted,
}

pub struct ChartRenderer<S: ChartSurface> {
    name: &'static str,
    height: u32,
    state: Lifecycle<S>,
    updates: u64,
}

impl<S: ChartSurface> ChartRenderer<S> {
    pub fn new(name: &'static str, height: u32) -> Self {
        Self {
            name,
            height,
            state: Lifecycle::Uninitialized,
            updates: 0,
        }
    }

    /// Allocate the surface at the container's width and start listening
    /// for window resizes. Only valid once per renderer.
    pub fn mount(&mut self, container_width: u32, events: &mut EventRegistry) -> Result<()> {
        if !matches!(self.state, Lifecycle::Uninitialized) {
            return Err(DashboardError::AlreadyMounted);
        }

        let surface = S::create(&ChartOptions::new(container_width, self.height));
        let resize_listener = events.attach(ListenerKind::Resize);
        self.state = Lifecycle::Mounted(Mounted {
            surface,
            resize_listener,
            primary: None,
            overlays: Vec::new(),
        });

        info!("{}: mounted at {}x{}", self.name, container_width, self.height);
        Ok(())
    }

    /// Replace the drawn series with `series` shaped for `chart_type`.
    ///
    /// An empty series is not an error: nothing is drawn and a warning is
    /// logged.
    pub fn render(
        &mut self,
        series: &Series,
        chart_type: ChartType,
        show_indicators: bool,
    ) -> Result<()> {
        let name = self.name;
        let m = self.mounted_mut()?;

        if series.is_empty() {
            warn!("{}: no stock data for {}, nothing to draw", name, series.symbol);
            return Ok(());
        }

        if let Some(id) = m.primary.take() {
            m.surface.remove_series(id);
        }
        for id in m.overlays.drain(..) {
            m.surface.remove_series(id);
        }

        let (kind, style) = primary_series(chart_type);
        let id = m.surface.add_series(kind, style);
        m.surface.set_data(id, primary_data(chart_type, &series.points));
        m.primary = Some(id);
        m.surface.fit_content();

        if show_indicators {
            let high = m.surface.add_series(SeriesKind::Line, high_overlay());
            m.surface.set_data(high, scalar_data(&series.points, |p| p.high));
            let low = m.surface.add_series(SeriesKind::Line, low_overlay());
            m.surface.set_data(low, scalar_data(&series.points, |p| p.low));
            m.overlays.extend([high, low]);
        }

        self.updates += 1;
        debug!(
            "{}: drew {} {} points as {} (indicators: {})",
            name,
            series.len(),
            series.symbol,
            chart_type,
            show_indicators
        );
        Ok(())
    }

    /// Reapply the container width. Data is left untouched.
    pub fn resize(&mut self, width: u32) -> Result<()> {
        self.mounted_mut()?.surface.set_width(width);
        Ok(())
    }

    pub fn apply_visible_range(&mut self, range: LogicalRange) -> Result<()> {
        self.mounted_mut()?.surface.set_visible_logical_range(range);
        Ok(())
    }

    /// Dispose the surface and detach the resize listener. Returns the
    /// disposed surface.
    pub fn unmount(&mut self, events: &mut EventRegistry) -> Result<S> {
        match std::mem::replace(&mut self.state, Lifecycle::Unmounted) {
            Lifecycle::Mounted(mut m) => {
                m.surface.dispose();
                events.detach(m.resize_listener);
                info!("{}: unmounted after {} updates", self.name, self.updates);
                Ok(m.surface)
            }
            other => {
                self.state = other;
                Err(DashboardError::NotMounted)
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.state, Lifecycle::Mounted(_))
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            Lifecycle::Mounted(m) => Some(&m.surface),
            _ => None,
        }
    }

    pub fn primary_series(&self) -> Option<SeriesId> {
        match &self.state {
            Lifecycle::Mounted(m) => m.primary,
            _ => None,
        }
    }

    pub fn overlay_series(&self) -> &[SeriesId] {
        match &self.state {
            Lifecycle::Mounted(m) => &m.overlays,
            _ => &[],
        }
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    fn mounted_mut(&mut self) -> Result<&mut Mounted<S>> {
        match &mut self.state {
            Lifecycle::Mounted(m) => Ok(m),
            _ => Err(DashboardError::NotMounted),
        }
    }
}

impl<S: ChartSurface> Drop for ChartRenderer<S> {
    fn drop(&mut self) {
        if let Lifecycle::Mounted(m) = &mut self.state {
            warn!("{}: dropped while mounted; disposing surface", self.name);
            m.surface.dispose();
        }
    }
}
