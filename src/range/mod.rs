//! Three-handle range selector over the overview plot.
//!
//! The window is held in basis points (hundredths of a percent) so that
//! dragging the middle handle moves both bounds by the same integer amount
//! and the span never drifts.

use crate::events::{EventRegistry, ListenerId, ListenerKind};
use serde::Serialize;
use tracing::{debug, trace};

const SCALE: u32 = 100;
const FULL: u32 = 100 * SCALE;

/// Narrowest window the handles can produce, in percent.
pub const MIN_SPAN_PERCENT: u32 = 5;
const MIN_SPAN: u32 = MIN_SPAN_PERCENT * SCALE;

// ── Window ────────────────────────────────────────────────────────────────────

/// Visible sub-range of a series, as percentages of its length.
///
/// Always `0 ≤ start < end ≤ 100` and `end − start ≥ 5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeWindow {
    start: u32,
    end: u32,
}

impl Default for RangeWindow {
    fn default() -> Self {
        Self::full()
    }
}

impl RangeWindow {
    pub fn full() -> Self {
        Self { start: 0, end: FULL }
    }

    /// Clamp arbitrary percentages into a valid window. `end` is pushed out
    /// to the minimum span first; if that overflows 100, `start` is pulled back.
    pub fn new(start: f64, end: f64) -> Self {
        let start = to_bp(start).min(FULL - MIN_SPAN);
        let end = to_bp(end).max(start + MIN_SPAN).min(FULL);
        Self { start, end }
    }

    pub fn start(&self) -> f64 {
        f64::from(self.start) / f64::from(SCALE)
    }

    pub fn end(&self) -> f64 {
        f64::from(self.end) / f64::from(SCALE)
    }

    pub fn span(&self) -> f64 {
        f64::from(self.end - self.start) / f64::from(SCALE)
    }

    fn center_bp(&self) -> u32 {
        (self.start + self.end) / 2
    }

    /// Index range over a series of `total` points:
    /// `floor(total·start/100) .. floor(total·end/100)`.
    pub fn logical_range(&self, total: usize) -> LogicalRange {
        let at = |bp: u32| (total as u64 * u64::from(bp) / u64::from(FULL)) as usize;
        LogicalRange {
            from: at(self.start),
            to: at(self.end),
        }
    }

    fn apply(&mut self, handle: Handle, pointer: u32) {
        match handle {
            Handle::Start => {
                self.start = pointer.min(self.end - MIN_SPAN);
            }
            Handle::End => {
                self.end = pointer.max(self.start + MIN_SPAN).min(FULL);
            }
            Handle::Middle => {
                let span = self.end - self.start;
                let shifted =
                    i64::from(self.start) + i64::from(pointer) - i64::from(self.center_bp());
                self.start = shifted.clamp(0, i64::from(FULL - span)) as u32;
                self.end = self.start + span;
            }
        }
    }
}

fn to_bp(percent: f64) -> u32 {
    if percent.is_nan() {
        return 0;
    }
    (percent.clamp(0.0, 100.0) * f64::from(SCALE)).round() as u32
}

/// Half-open index range `[from, to)` into the primary series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LogicalRange {
    pub from: usize,
    pub to: usize,
}

// ── Drag interaction ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Start,
    End,
    Middle,
}

/// Horizontal extent of the selector element, in pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorBounds {
    pub left: f64,
    pub width: f64,
}

impl SelectorBounds {
    /// Pointer position as a percentage of the selector, clamped to [0, 100].
    pub fn fraction(&self, x: f64) -> Option<f64> {
        if !(self.width > 0.0) || !x.is_finite() {
            return None;
        }
        Some(((x - self.left) / self.width * 100.0).clamp(0.0, 100.0))
    }
}

#[derive(Debug)]
struct Capture {
    handle: Handle,
    origin_x: f64,
    listeners: Vec<ListenerId>,
}

#[derive(Debug, Default)]
pub struct RangeSelector {
    window: RangeWindow,
    capture: Option<Capture>,
}

impl RangeSelector {
    pub fn new(window: RangeWindow) -> Self {
        Self {
            window,
            capture: None,
        }
    }

    pub fn window(&self) -> RangeWindow {
        self.window
    }

    pub fn set_window(&mut self, window: RangeWindow) {
        self.window = window;
    }

    pub fn is_dragging(&self) -> bool {
        self.capture.is_some()
    }

    pub fn captured_handle(&self) -> Option<Handle> {
        self.capture.as_ref().map(|c| c.handle)
    }

    /// Capture `handle` and attach the window-level move/up listeners.
    /// A second pointer-down while captured replaces the first capture.
    pub fn pointer_down(&mut self, handle: Handle, x: f64, events: &mut EventRegistry) {
        self.release(events);

        let listeners = [
            ListenerKind::PointerMove,
            ListenerKind::PointerUp,
            ListenerKind::TouchMove,
            ListenerKind::TouchEnd,
        ]
        .into_iter()
        .map(|kind| events.attach(kind))
        .collect();

        debug!("range drag start: {:?} at x={}", handle, x);
        self.capture = Some(Capture {
            handle,
            origin_x: x,
            listeners,
        });
    }

    /// Apply a pointer move. Returns the new window, or `None` if nothing is
    /// captured or the bounds are degenerate.
    pub fn pointer_move(&mut self, x: f64, bounds: SelectorBounds) -> Option<RangeWindow> {
        let capture = self.capture.as_ref()?;
        let fraction = bounds.fraction(x)?;

        self.window.apply(capture.handle, to_bp(fraction));
        trace!(
            "range drag {:?}: x={} (origin {}) → {:.2}..{:.2}",
            capture.handle,
            x,
            capture.origin_x,
            self.window.start(),
            self.window.end()
        );
        Some(self.window)
    }

    /// Release capture on pointer-up or touch-end, detaching exactly the
    /// listeners attached by the matching pointer-down.
    pub fn pointer_up(&mut self, events: &mut EventRegistry) {
        if self.capture.is_some() {
            debug!(
                "range drag end: {:.2}..{:.2}",
                self.window.start(),
                self.window.end()
            );
        }
        self.release(events);
    }

    fn release(&mut self, events: &mut EventRegistry) {
        if let Some(capture) = self.capture.take() {
            for id in capture.listeners {
                events.detach(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: SelectorBounds = SelectorBounds { left: 100.0, width: 400.0 };

    fn x_at(percent: f64) -> f64 {
        BOUNDS.left + BOUNDS.width * percent / 100.0
    }

    fn assert_valid(w: RangeWindow) {
        assert!(0.0 <= w.start() && w.start() < w.end() && w.end() <= 100.0, "{:?}", w);
        assert!(w.end() - w.start() >= 5.0, "{:?}", w);
    }

    #[test]
    fn test_new_clamps() {
        let w = RangeWindow::new(-10.0, 250.0);
        assert_eq!((w.start(), w.end()), (0.0, 100.0));

        let w = RangeWindow::new(50.0, 52.0);
        assert_eq!((w.start(), w.end()), (50.0, 55.0));

        let w = RangeWindow::new(99.0, 99.5);
        assert_eq!((w.start(), w.end()), (95.0, 100.0));
        assert_valid(RangeWindow::new(f64::NAN, f64::NAN));
    }

    #[test]
    fn test_start_handle_stops_at_min_span() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::new(RangeWindow::new(20.0, 60.0));
        sel.pointer_down(Handle::Start, x_at(20.0), &mut events);

        let w = sel.pointer_move(x_at(30.0), BOUNDS).unwrap();
        assert_eq!((w.start(), w.end()), (30.0, 60.0));

        let w = sel.pointer_move(x_at(90.0), BOUNDS).unwrap();
        assert_eq!((w.start(), w.end()), (55.0, 60.0));

        let w = sel.pointer_move(0.0, BOUNDS).unwrap();
        assert_eq!(w.start(), 0.0);
    }

    #[test]
    fn test_end_handle_stops_at_min_span() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::new(RangeWindow::new(20.0, 60.0));
        sel.pointer_down(Handle::End, x_at(60.0), &mut events);

        let w = sel.pointer_move(x_at(10.0), BOUNDS).unwrap();
        assert_eq!((w.start(), w.end()), (20.0, 25.0));

        let w = sel.pointer_move(x_at(150.0), BOUNDS).unwrap();
        assert_eq!(w.end(), 100.0);
    }

    #[test]
    fn test_middle_handle_preserves_span() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::new(RangeWindow::new(20.0, 33.33));
        let span = sel.window().span();
        sel.pointer_down(Handle::Middle, x_at(26.0), &mut events);

        for pct in [40.0, 97.3, 99.9, 3.7, 0.0, 51.234, 12.5] {
            let w = sel.pointer_move(x_at(pct), BOUNDS).unwrap();
            assert_eq!(w.span(), span);
            assert_valid(w);
        }

        let w = sel.pointer_move(x_at(100.0), BOUNDS).unwrap();
        assert_eq!(w.end(), 100.0);
        let w = sel.pointer_move(x_at(0.0), BOUNDS).unwrap();
        assert_eq!(w.start(), 0.0);
    }

    #[test]
    fn test_middle_shift_follows_pointer() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::new(RangeWindow::new(20.0, 40.0));
        sel.pointer_down(Handle::Middle, x_at(30.0), &mut events);
        let w = sel.pointer_move(x_at(50.0), BOUNDS).unwrap();
        assert_eq!((w.start(), w.end()), (40.0, 60.0));
    }

    #[test]
    fn test_invariant_holds_over_drag_sequence() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::default();
        let script = [
            (Handle::Start, [10.0, 99.0, 96.0, -5.0, 47.0]),
            (Handle::End, [0.0, 48.0, 52.1, 120.0, 60.0]),
            (Handle::Middle, [100.0, 0.0, 33.3, 66.6, 250.0]),
            (Handle::Start, [99.99, 0.01, 58.0, 59.0, 100.0]),
            (Handle::End, [0.0, 0.0, 100.0, 1.0, 0.5]),
        ];
        for (handle, moves) in script {
            sel.pointer_down(handle, 0.0, &mut events);
            for pct in moves {
                sel.pointer_move(x_at(pct), BOUNDS);
                assert_valid(sel.window());
            }
            sel.pointer_up(&mut events);
        }
    }

    #[test]
    fn test_listeners_scoped_to_capture() {
        let mut events = EventRegistry::new();
        let resize = events.attach(ListenerKind::Resize);
        let mut sel = RangeSelector::default();

        assert!(sel.pointer_move(x_at(50.0), BOUNDS).is_none());

        sel.pointer_down(Handle::End, x_at(100.0), &mut events);
        assert!(sel.is_dragging());
        assert_eq!(events.count_of(ListenerKind::PointerMove), 1);
        assert_eq!(events.count_of(ListenerKind::TouchEnd), 1);

        // re-capture does not stack listeners
        sel.pointer_down(Handle::Start, x_at(0.0), &mut events);
        assert_eq!(events.count_of(ListenerKind::PointerMove), 1);
        assert_eq!(sel.captured_handle(), Some(Handle::Start));

        sel.pointer_up(&mut events);
        assert!(!sel.is_dragging());
        assert_eq!(events.active_count(), 1);
        assert!(events.detach(resize));

        let before = sel.window();
        assert!(sel.pointer_move(x_at(70.0), BOUNDS).is_none());
        assert_eq!(sel.window(), before);
    }

    #[test]
    fn test_degenerate_bounds_ignored() {
        let mut events = EventRegistry::new();
        let mut sel = RangeSelector::default();
        sel.pointer_down(Handle::Start, 0.0, &mut events);
        let zero = SelectorBounds { left: 0.0, width: 0.0 };
        assert!(sel.pointer_move(10.0, zero).is_none());
        assert_eq!(sel.window(), RangeWindow::full());
    }

    #[test]
    fn test_logical_range_floors() {
        let w = RangeWindow::new(25.0, 75.0);
        assert_eq!(w.logical_range(10), LogicalRange { from: 2, to: 7 });
        assert_eq!(w.logical_range(0), LogicalRange { from: 0, to: 0 });
        assert_eq!(RangeWindow::full().logical_range(21), LogicalRange { from: 0, to: 21 });

        let w = RangeWindow::new(33.33, 66.67);
        assert_eq!(w.logical_range(3), LogicalRange { from: 0, to: 2 });
    }
}
