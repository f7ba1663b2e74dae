// File: crates/syschart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for panel placement.

use crate::types::Insets;

/// Pixel-space rectangle, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub const ZERO: Rect = Rect::new(0.0, 0.0, 0.0, 0.0);

    pub fn right(&self) -> f32 { self.x + self.w }
    pub fn bottom(&self) -> f32 { self.y + self.h }

    /// Shrink by the given insets, never producing a negative extent.
    pub fn inset(&self, insets: &Insets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            w: (self.w - insets.hsum()).max(0.0),
            h: (self.h - insets.vsum()).max(0.0),
        }
    }
}

/// Split `area` into `rows` equal-height rects separated by `gap` pixels.
/// Degenerate inputs (zero rows, area too small) clamp to zero-height rows
/// rather than failing.
pub fn split_rows(area: Rect, rows: usize, gap: f32) -> Vec<Rect> {
    if rows == 0 {
        return Vec::new();
    }
    let gaps = gap * (rows as f32 - 1.0);
    let row_h = ((area.h - gaps) / rows as f32).max(0.0);
    (0..rows)
        .map(|i| Rect::new(area.x, area.y + i as f32 * (row_h + gap), area.w, row_h))
        .collect()
}
