// File: crates/syschart-core/src/unit.rs
// Summary: Y-axis unit selection and "nice" tick step/label computation.

use tracing::debug;

/// Byte-scale unit names, base 1024.
pub const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];
/// Single-unit set for ratio metrics.
pub const PERCENT_UNITS: [&str; 1] = ["%"];

/// Default mantissas of the nice-step family `{1, 2, 5} x 10^n`.
pub const NICE_STEP_MANTISSAS: [f64; 3] = [1.0, 2.0, 5.0];

// Minimum pixel pitch between adjacent labels is this multiple of
// (label_height + 2 * label_padding).
const LABEL_PITCH_FACTOR: f64 = 6.0;
// Decades scanned by the step search before giving up.
const STEP_SEARCH_DECADES: i32 = 12;
// Guards ceil() against float noise on exact multiples.
const STEP_EPS: f64 = 1e-9;

/// Result of [`suitable_unit`]: the value rescaled into the chosen unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuitableUnit {
    pub value: f64,
    pub unit_idx: usize,
}

/// A chosen tick step and the decimal digits needed to print it exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepSize {
    pub step: f64,
    pub precision: usize,
}

/// Pick the largest unit index `i` with `value / unit_base^i < unit_base`,
/// scanning upward from `i = 0`. Clamps to the last unit, leaving the value
/// unreduced past it (there is no unit beyond the last). Total for any
/// non-negative finite value.
pub fn suitable_unit(value: f64, unit_count: usize, unit_base: f64) -> SuitableUnit {
    let mut value = value;
    let mut unit_idx = 0;
    if unit_base > 1.0 {
        while value >= unit_base && unit_idx + 1 < unit_count.max(1) {
            value /= unit_base;
            unit_idx += 1;
        }
    }
    SuitableUnit { value, unit_idx }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Derived {
    step: f64,
    precision: usize,
    top_value: f64,
    label_count: usize,
}

/// One Y-axis worth of unit/label state.
///
/// `set_layout` and `set_max_value` are the only mutators; each recomputes
/// the derived step/top/label state eagerly, so every getter is O(1) and
/// side-effect-free afterwards. Repeating a setter with identical arguments
/// reproduces identical derived state.
#[derive(Clone, Debug)]
pub struct UnitLabel {
    units: Vec<String>,
    unit_base: f64,
    step_mantissas: Vec<f64>,
    pixel_span: f64,
    label_height: f64,
    label_padding: f64,
    max_value: f64,
    max_in_unit: f64,
    unit_idx: usize,
    derived: Derived,
}

impl UnitLabel {
    /// `units` is the ordered unit-name ladder, `unit_base` the multiplier
    /// between adjacent rungs (1024 for bytes).
    pub fn new(units: &[&str], unit_base: f64) -> Self {
        let mut label = Self {
            units: units.iter().map(|u| u.to_string()).collect(),
            unit_base,
            step_mantissas: NICE_STEP_MANTISSAS.to_vec(),
            pixel_span: 0.0,
            label_height: 0.0,
            label_padding: 0.0,
            max_value: 0.0,
            max_in_unit: 0.0,
            unit_idx: 0,
            derived: Derived { step: 1.0, precision: 0, top_value: 0.0, label_count: 1 },
        };
        label.recompute();
        label
    }

    /// Replace the nice-step mantissa family (must be ascending, in [1, 10)).
    pub fn with_step_mantissas(mut self, mantissas: &[f64]) -> Self {
        if !mantissas.is_empty() {
            self.step_mantissas = mantissas.to_vec();
            self.recompute();
        }
        self
    }

    /// Store layout parameters and recompute the step/label state.
    pub fn set_layout(&mut self, pixel_span: f64, label_height: f64, label_padding: f64) {
        self.pixel_span = pixel_span;
        self.label_height = label_height;
        self.label_padding = label_padding;
        self.recompute();
    }

    /// Store the axis ceiling (in base units) and recompute unit and steps.
    /// Non-finite or negative ceilings clamp to zero.
    pub fn set_max_value(&mut self, value: f64) {
        let value = if value.is_finite() && value > 0.0 { value } else { 0.0 };
        self.max_value = value;
        let chosen = suitable_unit(value, self.units.len(), self.unit_base);
        if chosen.unit_idx != self.unit_idx {
            debug!(unit = %self.units[chosen.unit_idx], "display unit changed");
        }
        self.unit_idx = chosen.unit_idx;
        self.max_in_unit = chosen.value;
        self.recompute();
    }

    /// Greatest number of labels that fit the pixel span with at least one
    /// minimum pitch between neighbors. Monotonic: grows with the span,
    /// shrinks as label height or padding grow. Never below 1.
    pub fn max_label_count(&self) -> usize {
        let pitch = (self.label_height + 2.0 * self.label_padding) * LABEL_PITCH_FACTOR;
        if self.pixel_span <= 0.0 || pitch <= 0.0 {
            return 1;
        }
        ((self.pixel_span / pitch).floor() as usize).max(1)
    }

    /// Ceiling currently in effect, in base units.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Name of the unit currently in effect.
    pub fn current_unit(&self) -> &str {
        &self.units[self.unit_idx]
    }

    /// Convert a value expressed in the current unit back to base units.
    pub fn real_value_with_current_unit(&self, scaled: f64) -> f64 {
        scaled * self.unit_base.powi(self.unit_idx as i32)
    }

    /// Smallest multiple of `step` not less than `value`.
    /// Holds for fractional steps; a non-positive step passes `value` through.
    pub fn top_label_value(value: f64, step: f64) -> f64 {
        if step <= 0.0 {
            return value;
        }
        ((value / step - STEP_EPS).ceil() * step).max(0.0)
    }

    /// Label count for a given step: every multiple from 0 to the top label
    /// inclusive, i.e. `ceil(max/step) + 1`.
    pub fn label_count_for_step(&self, step: f64) -> usize {
        if step <= 0.0 {
            return 1;
        }
        let intervals = (self.max_in_unit / step - STEP_EPS).ceil().max(0.0);
        intervals as usize + 1
    }

    /// The chosen nice step and its print precision.
    pub fn suitable_step(&self) -> StepSize {
        StepSize { step: self.derived.step, precision: self.derived.precision }
    }

    /// Top label value in the current unit.
    pub fn top_value(&self) -> f64 {
        self.derived.top_value
    }

    /// Ordered labels `[top, top - step, ..., 0]`, each suffixed with the
    /// current unit name.
    pub fn labels(&self) -> Vec<String> {
        let Derived { step, precision, top_value, label_count } = self.derived;
        (0..label_count)
            .map(|i| {
                let v = (top_value - step * i as f64).max(0.0);
                format!("{:.*} {}", precision, v, self.current_unit())
            })
            .collect()
    }

    /// Pixels per base-unit value: `pixel_span / real(top)`.
    /// Zero when there is no positive ceiling yet.
    pub fn scale(&self) -> f64 {
        let top_real = self.real_value_with_current_unit(self.derived.top_value);
        if top_real <= 0.0 || self.pixel_span <= 0.0 {
            return 0.0;
        }
        self.pixel_span / top_real
    }

    // Eagerly rebuild the derived step/top/label state. Searches the nice
    // family ascending from one decade below the coarsest step that could
    // fit, so the first fitting candidate is the global smallest. Bounded;
    // on exhaustion the largest searched candidate wins (the axis must
    // always render something).
    fn recompute(&mut self) {
        if self.max_in_unit <= 0.0 {
            self.derived = Derived { step: 1.0, precision: 0, top_value: 0.0, label_count: 1 };
            return;
        }
        let max_labels = self.max_label_count();
        let target = self.max_in_unit / (max_labels.saturating_sub(1).max(1)) as f64;
        let mut exp = target.log10().floor() as i32 - 1;
        let mut fallback = (1.0, 0usize);
        let mut chosen = None;
        'search: for _ in 0..STEP_SEARCH_DECADES {
            let magnitude = 10.0_f64.powi(exp);
            let precision = (-exp).max(0) as usize;
            for &m in &self.step_mantissas {
                let step = m * magnitude;
                fallback = (step, precision);
                if self.label_count_for_step(step) <= max_labels {
                    chosen = Some((step, precision));
                    break 'search;
                }
            }
            exp += 1;
        }
        let (step, precision) = chosen.unwrap_or(fallback);
        let top_value = Self::top_label_value(self.max_in_unit, step);
        let label_count = self.label_count_for_step(step);
        self.derived = Derived { step, precision, top_value, label_count };
    }
}
