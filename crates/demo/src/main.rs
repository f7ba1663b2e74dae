// File: crates/demo/src/main.rs
// Summary: Demo feeds synthetic CPU/memory/zram/network samples through the engine
//          and prints the resulting axis labels and polylines.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use syschart_core::types::Sample;
use syschart_core::unit::{BYTE_UNITS, PERCENT_UNITS};
use syschart_core::LineChart;
use tracing::info;
use tracing_subscriber::EnvFilter;

const MIB: f64 = 1024.0 * 1024.0;
const TICKS: usize = 300;
const CAPACITY: usize = 600;

/// Random-walk generator for one metric, clamped to a plausible range.
struct Walker {
    value: f64,
    jitter: f64,
    min: f64,
    max: f64,
}

impl Walker {
    fn new(value: f64, jitter: f64, min: f64, max: f64) -> Self {
        Self { value, jitter, min, max }
    }

    fn next(&mut self, rng: &mut StdRng) -> f64 {
        self.value += rng.gen_range(-self.jitter..self.jitter);
        self.value = self.value.clamp(self.min, self.max);
        self.value
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut chart = LineChart::new();
    let cpu_panel = chart.add_sub_chart("cpu", &PERCENT_UNITS, 1000.0);
    let mem_panel = chart.add_sub_chart("memory", &BYTE_UNITS, 1024.0);
    let net_panel = chart.add_sub_chart("network", &BYTE_UNITS, 1024.0);

    chart.add_metric("cpu0", CAPACITY);
    chart.add_metric("cpu1", CAPACITY);
    chart.add_metric("mem-used", CAPACITY);
    chart.add_metric("zram", CAPACITY);
    chart.add_metric("net-rx", CAPACITY);

    chart.attach_metric(cpu_panel, "cpu0");
    chart.attach_metric(cpu_panel, "cpu1");
    chart.attach_metric(mem_panel, "mem-used");
    chart.attach_metric(mem_panel, "zram");
    chart.attach_metric(net_panel, "net-rx");

    chart.resize(1024.0, 640.0);

    let mut rng = StdRng::seed_from_u64(7);
    let mut cpu0 = Walker::new(25.0, 8.0, 0.0, 100.0);
    let mut cpu1 = Walker::new(60.0, 12.0, 0.0, 100.0);
    let mut mem = Walker::new(900.0 * MIB, 40.0 * MIB, 200.0 * MIB, 4096.0 * MIB);
    let mut zram = Walker::new(120.0 * MIB, 10.0 * MIB, 0.0, 512.0 * MIB);
    let mut net = Walker::new(3.0 * MIB, 2.0 * MIB, 0.0, 120.0 * MIB);

    let base_ts = 1_700_000_000_000_i64;
    for tick in 0..TICKS {
        let ts = base_ts + tick as i64 * 1_000;
        chart.add_samples("cpu0", &[Sample::new(ts, cpu0.next(&mut rng))]);
        chart.add_samples("cpu1", &[Sample::new(ts, cpu1.next(&mut rng))]);
        chart.add_samples("mem-used", &[Sample::new(ts, mem.next(&mut rng))]);
        chart.add_samples("zram", &[Sample::new(ts, zram.next(&mut rng))]);
        chart.add_samples("net-rx", &[Sample::new(ts, net.next(&mut rng))]);
    }

    // Inspect the last two minutes, then the full recording.
    chart.set_zoom(120);
    print_frame(&mut chart, "last 120 samples");

    chart.begin_pan();
    chart.pan(-100);
    chart.end_pan();
    print_frame(&mut chart, "panned back 100 samples");

    chart.set_zoom(TICKS);
    print_frame(&mut chart, "full history");

    Ok(())
}

fn print_frame(chart: &mut LineChart, caption: &str) {
    let (start, end) = chart.visible_range();
    info!(caption, start, end, "rendering");
    let frame = chart.render();
    for panel in &frame.panels {
        println!("== {} [{}x{}] ==", panel.title, panel.area.w, panel.area.h);
        println!("   y-axis: {}", panel.labels.join(" | "));
        for line in &panel.polylines {
            let (min_y, max_y) = line
                .points
                .iter()
                .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.1), hi.max(p.1)));
            println!(
                "   {:>9}: {} points, y in [{min_y:.1}, {max_y:.1}]",
                line.metric,
                line.points.len()
            );
        }
    }
    let ticks: Vec<&str> = frame.time_ticks.iter().map(|t| t.label.as_str()).collect();
    println!("   t-axis: {}", ticks.join(" | "));
    println!();
}
