// File: crates/syschart-core/tests/chart_flow.rs
// Purpose: End-to-end coordinator flow: ingestion, layout, viewport, redraw frames.

use syschart_core::types::Sample;
use syschart_core::unit::{BYTE_UNITS, PERCENT_UNITS};
use syschart_core::LineChart;

const MIB: f64 = 1024.0 * 1024.0;
const BASE_TS: i64 = 1_700_000_000_000;

/// Two stacked panels (cpu %, memory bytes) fed with 1 Hz samples.
fn monitoring_chart(samples: usize) -> LineChart {
    let mut chart = LineChart::new();
    let cpu_panel = chart.add_sub_chart("cpu", &PERCENT_UNITS, 1000.0);
    let mem_panel = chart.add_sub_chart("memory", &BYTE_UNITS, 1024.0);
    chart.add_metric("cpu", 128);
    chart.add_metric("mem-used", 128);
    chart.attach_metric(cpu_panel, "cpu");
    chart.attach_metric(mem_panel, "mem-used");
    chart.resize(800.0, 600.0);

    let cpu: Vec<Sample> = (0..samples)
        .map(|i| Sample::new(BASE_TS + i as i64 * 1_000, i as f64))
        .collect();
    let mem: Vec<Sample> = (0..samples)
        .map(|i| Sample::new(BASE_TS + i as i64 * 1_000, i as f64 * 10.0 * MIB))
        .collect();
    chart.add_samples("cpu", &cpu);
    chart.add_samples("mem-used", &mem);
    chart
}

#[test]
fn render_emits_one_frame_per_panel() {
    let mut chart = monitoring_chart(50);
    assert!(chart.needs_redraw());

    let frame = chart.render();
    assert_eq!(frame.panels.len(), 2);
    assert_eq!(frame.panels[0].title, "cpu");
    assert_eq!(frame.panels[1].title, "memory");

    // Whole history visible before any zoom: one point per sample.
    let cpu = &frame.panels[0].polylines;
    assert_eq!(cpu.len(), 1);
    assert_eq!(cpu[0].metric, "cpu");
    assert_eq!(cpu[0].points.len(), 50);

    // X grows monotonically across the panel width.
    let xs: Vec<f32> = cpu[0].points.iter().map(|p| p.0).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(xs[0], 0.0);
    let area = frame.panels[0].area;
    assert!((xs[xs.len() - 1] - area.w).abs() < 0.5);

    // Y stays inside the panel.
    assert!(cpu[0]
        .points
        .iter()
        .all(|p| p.1 >= 0.0 && p.1 <= area.h));
}

#[test]
fn memory_panel_picks_a_byte_unit() {
    let mut chart = monitoring_chart(50);
    let frame = chart.render();
    // Max 490 MiB: every label carries the MB unit, top label first.
    let labels = &frame.panels[1].labels;
    assert!(!labels.is_empty());
    assert!(labels.iter().all(|l| l.ends_with(" MB")));
    assert_eq!(labels.last().unwrap(), "0 MB");
}

#[test]
fn render_clears_dirty_until_new_data_arrives() {
    let mut chart = monitoring_chart(50);
    chart.render();
    assert!(!chart.needs_redraw());

    // Stale timestamps are dropped and leave the chart clean.
    chart.add_samples("cpu", &[Sample::new(BASE_TS - 5_000, 99.0)]);
    assert!(!chart.needs_redraw());

    // A genuinely new sample lands in the tail-pinned window.
    chart.add_samples("cpu", &[Sample::new(BASE_TS + 60_000, 12.0)]);
    assert!(chart.needs_redraw());
}

#[test]
fn relayout_with_identical_arguments_is_pure() {
    let mut chart = monitoring_chart(50);
    chart.resize(800.0, 600.0);
    let scale = chart.sub_chart(1).unwrap().scale();
    let labels = chart.sub_chart(1).unwrap().labels();

    chart.resize(800.0, 600.0);
    assert_eq!(chart.sub_chart(1).unwrap().scale(), scale);
    assert_eq!(chart.sub_chart(1).unwrap().labels(), labels);
}

#[test]
fn zoom_and_pan_drive_the_visible_window() {
    let mut chart = monitoring_chart(50);
    chart.set_zoom(10);
    assert_eq!(chart.visible_range(), (40, 50));

    chart.begin_pan();
    chart.pan(-35);
    chart.end_pan();
    assert_eq!(chart.visible_range(), (5, 15));

    let frame = chart.render();
    assert_eq!(frame.panels[0].polylines[0].points.len(), 10);

    // The detached window stays put while the feed keeps appending.
    chart.add_samples("cpu", &[Sample::new(BASE_TS + 60_000, 1.0)]);
    assert_eq!(chart.visible_range(), (5, 15));
}

#[test]
fn tail_pinned_window_follows_new_samples() {
    let mut chart = monitoring_chart(50);
    chart.set_zoom(10);
    assert_eq!(chart.visible_range(), (40, 50));

    chart.add_samples("cpu", &[Sample::new(BASE_TS + 60_000, 1.0)]);
    assert_eq!(chart.visible_range(), (41, 51));
}

#[test]
fn time_ticks_cover_the_visible_span() {
    let mut chart = monitoring_chart(50);
    let frame = chart.render();
    assert!(!frame.time_ticks.is_empty());
    for tick in &frame.time_ticks {
        assert_eq!(tick.label.len(), "00:00:00".len());
    }
    let xs: Vec<f32> = frame.time_ticks.iter().map(|t| t.x).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn removing_a_metric_detaches_it_from_its_panel() {
    let mut chart = monitoring_chart(50);
    chart.remove_metric("mem-used");
    let frame = chart.render();
    assert!(frame.panels[1].polylines.is_empty());
    // The cpu series still spans the full history.
    assert_eq!(chart.visible_range(), (0, 50));
}

#[test]
fn samples_for_unknown_metrics_are_discarded() {
    let mut chart = monitoring_chart(10);
    chart.render();
    chart.add_samples("nope", &[Sample::new(BASE_TS + 60_000, 1.0)]);
    assert!(!chart.needs_redraw());
    assert_eq!(chart.visible_range(), (0, 10));
}
