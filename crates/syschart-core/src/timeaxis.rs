// File: crates/syschart-core/src/timeaxis.rs
// Summary: X-axis tick selection and formatting for Unix-millisecond timestamps.

use chrono::DateTime;

use crate::types::Timestamp;

/// Round tick intervals in milliseconds, ascending: seconds, minutes, hours.
const TICK_STEPS_MS: [i64; 17] = [
    1_000,
    2_000,
    5_000,
    10_000,
    15_000,
    30_000,
    60_000,
    120_000,
    300_000,
    600_000,
    900_000,
    1_800_000,
    3_600_000,
    7_200_000,
    10_800_000,
    21_600_000,
    86_400_000,
];

/// Minimum horizontal pixel pitch between adjacent time ticks.
const MIN_TICK_PITCH_PX: f32 = 80.0;

/// One tick on the time axis: horizontal pixel offset and formatted instant.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTick {
    pub x: f32,
    pub label: String,
}

/// Ticks for the visible `[start_ms, end_ms)` span across `width_px` pixels.
///
/// Chooses the smallest round interval whose ticks stay at least
/// [`MIN_TICK_PITCH_PX`] apart, then emits one tick per step-aligned instant
/// inside the span. Degenerate spans yield no ticks rather than failing.
pub fn time_ticks(start_ms: Timestamp, end_ms: Timestamp, width_px: f32) -> Vec<TimeTick> {
    if end_ms <= start_ms || width_px <= 0.0 {
        return Vec::new();
    }
    let span = (end_ms - start_ms) as f64;
    let step = TICK_STEPS_MS
        .iter()
        .copied()
        .find(|&s| width_px as f64 * s as f64 / span >= MIN_TICK_PITCH_PX as f64)
        .unwrap_or(TICK_STEPS_MS[TICK_STEPS_MS.len() - 1]);

    let mut t = start_ms.div_euclid(step) * step;
    if t < start_ms {
        t += step;
    }
    let mut ticks = Vec::new();
    while t < end_ms {
        let x = ((t - start_ms) as f64 / span * width_px as f64) as f32;
        ticks.push(TimeTick { x, label: format_instant(t) });
        t += step;
    }
    ticks
}

/// Wall-clock rendering of a Unix-millisecond instant.
pub fn format_instant(ms: Timestamp) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}
