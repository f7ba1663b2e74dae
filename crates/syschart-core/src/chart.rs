// File: crates/syschart-core/src/chart.rs
// Summary: LineChart coordinator: metric lifecycle, sample ingestion, viewport and redraw.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geometry::{split_rows, Rect};
use crate::scrollbar::{Scrollbar, Viewport};
use crate::series::DataSeries;
use crate::subchart::{Polyline, SubChart};
use crate::timeaxis::{time_ticks, TimeTick};
use crate::types::{Insets, MetricId, Sample, HEIGHT, PANEL_GAP, WIDTH};

/// Handle of a panel within a [`LineChart`].
pub type SubChartId = usize;

/// Draw output for one panel: Y-axis labels and one polyline per series,
/// both panel-relative. The host issues the actual drawing commands.
#[derive(Clone, Debug)]
pub struct PanelFrame {
    pub title: String,
    pub area: Rect,
    pub labels: Vec<String>,
    pub polylines: Vec<Polyline>,
}

/// One redraw worth of output: every panel plus the shared time axis.
#[derive(Clone, Debug)]
pub struct Frame {
    pub panels: Vec<PanelFrame>,
    pub time_ticks: Vec<TimeTick>,
}

/// Coordinator owning the series store, the scrollbar, and the panels.
///
/// Single-threaded and frame-driven: ingestion, pan/zoom and layout mutate
/// state synchronously, and `render` is always the final step of a logical
/// update. Recomputation is idempotent, so redundant redraws are safe.
pub struct LineChart {
    series: HashMap<MetricId, DataSeries>,
    sub_charts: Vec<SubChart>,
    scrollbar: Scrollbar,
    width: f32,
    height: f32,
    insets: Insets,
}

impl LineChart {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            sub_charts: Vec::new(),
            scrollbar: Scrollbar::new(),
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
        }
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    // ---- series lifecycle ----------------------------------------------

    /// Create the bounded store for a metric. Capacity is fixed for the
    /// metric's lifetime; re-adding an existing metric keeps its history.
    pub fn add_metric(&mut self, metric: impl Into<MetricId>, capacity: usize) {
        let metric = metric.into();
        if self.series.contains_key(&metric) {
            warn!(%metric, "metric already registered; keeping existing history");
            return;
        }
        self.series.insert(metric, DataSeries::new(capacity));
    }

    /// Drop a metric's store and detach it from every panel.
    pub fn remove_metric(&mut self, metric: &str) {
        if self.series.remove(metric).is_none() {
            return;
        }
        for sub in &mut self.sub_charts {
            sub.remove_series(metric);
        }
        self.scrollbar.set_total_range(self.history_len());
        self.refresh_visible();
    }

    /// Add a panel sharing one Y axis across the series later attached to it.
    pub fn add_sub_chart(
        &mut self,
        title: impl Into<String>,
        units: &[&str],
        unit_base: f64,
    ) -> SubChartId {
        self.sub_charts.push(SubChart::new(title, units, unit_base));
        self.reflow();
        self.sub_charts.len() - 1
    }

    /// Attach a metric's series to a panel. Scale recomputation is deferred
    /// to the next layout or update, matching `SubChart::add_series`.
    pub fn attach_metric(&mut self, sub_chart: SubChartId, metric: &str) {
        if !self.series.contains_key(metric) {
            warn!(%metric, "attaching unknown metric; it will draw once registered");
        }
        if let Some(sub) = self.sub_charts.get_mut(sub_chart) {
            sub.add_series(metric);
        }
    }

    pub fn sub_chart(&self, id: SubChartId) -> Option<&SubChart> {
        self.sub_charts.get(id)
    }

    pub fn sub_chart_mut(&mut self, id: SubChartId) -> Option<&mut SubChart> {
        self.sub_charts.get_mut(id)
    }

    pub fn sub_chart_count(&self) -> usize {
        self.sub_charts.len()
    }

    // ---- ingestion ------------------------------------------------------

    /// Ingest a batch of samples for one metric. Stale timestamps are
    /// dropped inside the series; panels whose visible window or visible
    /// maximum changed are invalidated.
    pub fn add_samples(&mut self, metric: &str, samples: &[Sample]) {
        let Some(data) = self.series.get_mut(metric) else {
            warn!(%metric, "samples for unregistered metric discarded");
            return;
        };
        let mut stored = 0usize;
        for &sample in samples {
            if data.append(sample) {
                stored += 1;
            }
        }
        if stored == 0 {
            return;
        }
        let before = self.scrollbar.visible_range();
        self.scrollbar.set_total_range(self.history_len());
        let window_moved = self.scrollbar.visible_range() != before;
        // New samples land at the tail, so a tail-pinned window sees them
        // even when the visible maximum is unchanged.
        let tail_visible = self.scrollbar.is_at_tail();
        let view = self.viewport();
        for sub in &mut self.sub_charts {
            if sub.contains(metric) {
                sub.update(&self.series, view);
                if window_moved || tail_visible {
                    sub.mark_dirty();
                }
            } else if window_moved && !sub.series_ids().is_empty() {
                sub.update(&self.series, view);
                sub.mark_dirty();
            }
        }
    }

    // ---- layout & viewport ----------------------------------------------

    /// Adopt a new viewport size and re-layout every panel.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        debug!(width, height, "viewport resized");
        self.reflow();
    }

    /// Shift the visible window by `delta` indices (silent boundary clamp).
    pub fn pan(&mut self, delta: isize) {
        let before = self.scrollbar.visible_range();
        self.scrollbar.pan(delta);
        if self.scrollbar.visible_range() != before {
            self.refresh_visible();
        }
    }

    /// Set the visible window length, clamped to the recorded history.
    pub fn set_zoom(&mut self, window_len: usize) {
        let before = self.scrollbar.visible_range();
        self.scrollbar.set_zoom(window_len);
        if self.scrollbar.visible_range() != before {
            self.refresh_visible();
        }
    }

    pub fn begin_pan(&mut self) {
        self.scrollbar.begin_pan();
    }

    pub fn end_pan(&mut self) {
        self.scrollbar.end_pan();
    }

    pub fn begin_zoom(&mut self) {
        self.scrollbar.begin_zoom();
    }

    pub fn end_zoom(&mut self) {
        self.scrollbar.end_zoom();
    }

    pub fn scrollbar(&self) -> &Scrollbar {
        &self.scrollbar
    }

    pub fn visible_range(&self) -> (usize, usize) {
        self.scrollbar.visible_range()
    }

    // ---- redraw ---------------------------------------------------------

    /// True when at least one panel changed since the last `render`.
    pub fn needs_redraw(&self) -> bool {
        self.sub_charts.iter().any(|s| s.is_dirty())
    }

    /// Produce draw output for every panel and clear the dirty flags.
    /// Pure recomputation over current state: calling it twice in a row
    /// yields identical frames.
    pub fn render(&mut self) -> Frame {
        let view = self.viewport();
        let panels = self
            .sub_charts
            .iter_mut()
            .map(|sub| {
                sub.take_dirty();
                PanelFrame {
                    title: sub.title().to_string(),
                    area: sub.area(),
                    labels: sub.labels(),
                    polylines: sub.polylines(&self.series, view),
                }
            })
            .collect();
        Frame { panels, time_ticks: self.visible_time_ticks(view) }
    }

    // ---- internals ------------------------------------------------------

    fn viewport(&self) -> Viewport {
        Viewport::from_scrollbar(&self.scrollbar)
    }

    fn history_len(&self) -> usize {
        self.series.values().map(DataSeries::len).max().unwrap_or(0)
    }

    fn plot_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height).inset(&self.insets)
    }

    fn reflow(&mut self) {
        let view = self.viewport();
        let rows = split_rows(self.plot_area(), self.sub_charts.len(), PANEL_GAP);
        for (sub, area) in self.sub_charts.iter_mut().zip(rows) {
            sub.layout(area, &self.series, view);
        }
    }

    fn refresh_visible(&mut self) {
        let view = self.viewport();
        for sub in &mut self.sub_charts {
            sub.update(&self.series, view);
            sub.mark_dirty();
        }
    }

    /// Time ticks for the visible window, taken from the longest series
    /// (its samples span the whole global index space).
    fn visible_time_ticks(&self, view: Viewport) -> Vec<TimeTick> {
        if view.len() < 2 {
            return Vec::new();
        }
        let reference = self
            .series
            .values()
            .find(|s| s.len() == view.total)
            .or_else(|| self.series.values().max_by_key(|s| s.len()));
        let Some(reference) = reference else {
            return Vec::new();
        };
        let (lo, hi) = view.local_range(reference.len());
        if hi <= lo {
            return Vec::new();
        }
        let (Some(start_ts), Some(end_ts)) =
            (reference.timestamp_at(lo), reference.timestamp_at(hi - 1))
        else {
            return Vec::new();
        };
        time_ticks(start_ts, end_ts, self.plot_area().w)
    }
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new()
    }
}
