// File: crates/syschart-core/src/subchart.rs
// Summary: One chart panel: a series set sharing a Y axis, its unit labels and scale.

use std::collections::HashMap;

use tracing::debug;

use crate::downsample::peak_decimate;
use crate::geometry::Rect;
use crate::scale::Scale;
use crate::scrollbar::Viewport;
use crate::series::DataSeries;
use crate::types::{MetricId, LABEL_HEIGHT, LABEL_PADDING};
use crate::unit::UnitLabel;

/// Pixel polyline for one metric, panel-relative, top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub metric: MetricId,
    pub points: Vec<(f32, f32)>,
}

/// One panel of the chart: one or more data series sharing a Y axis,
/// combined with a [`UnitLabel`] and the derived value->pixel scale.
///
/// SubCharts only ever read series data; all mutation stays with the
/// coordinator that owns the series map.
#[derive(Clone, Debug)]
pub struct SubChart {
    title: String,
    series_ids: Vec<MetricId>,
    unit_label: UnitLabel,
    scale: Scale,
    area: Rect,
    visible_max: f64,
    dirty: bool,
}

impl SubChart {
    pub fn new(title: impl Into<String>, units: &[&str], unit_base: f64) -> Self {
        Self {
            title: title.into(),
            series_ids: Vec::new(),
            unit_label: UnitLabel::new(units, unit_base),
            scale: Scale::IDENTITY_EMPTY,
            area: Rect::ZERO,
            visible_max: 0.0,
            dirty: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn unit_label(&self) -> &UnitLabel {
        &self.unit_label
    }

    pub fn series_ids(&self) -> &[MetricId] {
        &self.series_ids
    }

    pub fn contains(&self, metric: &str) -> bool {
        self.series_ids.iter().any(|id| id == metric)
    }

    /// Add a series to this panel. Scale recomputation is deferred to the
    /// next `layout` or `update` call; there is no implicit redraw.
    pub fn add_series(&mut self, metric: impl Into<MetricId>) {
        let metric = metric.into();
        if !self.contains(&metric) {
            self.series_ids.push(metric);
            self.dirty = true;
        }
    }

    /// Remove a series from this panel; recomputation is deferred likewise.
    pub fn remove_series(&mut self, metric: &str) {
        let before = self.series_ids.len();
        self.series_ids.retain(|id| id != metric);
        if self.series_ids.len() != before {
            self.dirty = true;
        }
    }

    /// Assign the panel rect, forward the span to the unit label, and
    /// recompute the visible ceiling and scale.
    pub fn layout(&mut self, area: Rect, series: &HashMap<MetricId, DataSeries>, view: Viewport) {
        self.area = area;
        self.unit_label
            .set_layout(f64::from(area.h), LABEL_HEIGHT, LABEL_PADDING);
        self.visible_max = self.visible_max_of(series, view);
        self.unit_label.set_max_value(self.visible_max);
        self.rebuild_scale();
        self.dirty = true;
        debug!(panel = %self.title, w = area.w, h = area.h, "panel laid out");
    }

    /// Recompute the ceiling and scale when the visible maximum moved.
    /// A no-op (returns `false`) when it did not.
    pub fn update(&mut self, series: &HashMap<MetricId, DataSeries>, view: Viewport) -> bool {
        let max = self.visible_max_of(series, view);
        if max == self.visible_max {
            return false;
        }
        self.visible_max = max;
        self.unit_label.set_max_value(max);
        self.rebuild_scale();
        self.dirty = true;
        true
    }

    /// Pixel offset of `value` above the panel baseline.
    pub fn to_pixel(&self, value: f64) -> f64 {
        self.scale.to_px(value)
    }

    /// Pixels per base-unit value.
    pub fn scale(&self) -> f64 {
        self.scale.px_per_unit()
    }

    /// Ordered Y-axis label strings, top first.
    pub fn labels(&self) -> Vec<String> {
        self.unit_label.labels()
    }

    /// Panel-relative polylines for every owned series over the visible
    /// window, decimated to at most one point per pixel column.
    pub fn polylines(
        &self,
        series: &HashMap<MetricId, DataSeries>,
        view: Viewport,
    ) -> Vec<Polyline> {
        let mut out = Vec::with_capacity(self.series_ids.len());
        if view.is_empty() {
            return out;
        }
        let x_step = f64::from(self.area.w) / (view.len() - 1).max(1) as f64;
        for id in &self.series_ids {
            let Some(data) = series.get(id) else { continue };
            let (lo, hi) = view.local_range(data.len());
            if lo >= hi {
                continue;
            }
            let offset = view.total.saturating_sub(data.len());
            let values: Vec<f64> = data.range(lo, hi).map(|s| s.value).collect();
            let max_points = (self.area.w.max(1.0) as usize).max(2);
            let points = peak_decimate(&values, max_points)
                .into_iter()
                .map(|(i, v)| {
                    let global = lo + i + offset;
                    let x = ((global - view.start) as f64 * x_step) as f32;
                    (x, self.scale.to_screen_y(v))
                })
                .collect();
            out.push(Polyline { metric: id.clone(), points });
        }
        out
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Consume the dirty flag; used once per emitted frame.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn visible_max_of(&self, series: &HashMap<MetricId, DataSeries>, view: Viewport) -> f64 {
        self.series_ids
            .iter()
            .filter_map(|id| series.get(id))
            .map(|data| {
                let (lo, hi) = view.local_range(data.len());
                data.max_value_in_range(lo, hi)
            })
            .fold(0.0_f64, f64::max)
    }

    fn rebuild_scale(&mut self) {
        let top_real = self
            .unit_label
            .real_value_with_current_unit(self.unit_label.top_value());
        self.scale = Scale::new(f64::from(self.area.h), top_real);
    }
}
