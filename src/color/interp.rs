use crate::foundation::{core::Rgb8, math::clamp01};

/// Linear per-channel blend from `a` (at `t = 0`) to `b` (at `t = 1`).
///
/// `t` is clamped to `[0, 1]`; each channel is rounded to the nearest integer.
pub fn interpolate(a: Rgb8, b: Rgb8, t: f64) -> Rgb8 {
    let t = clamp01(t);
    let ch = |x: u8, y: u8| {
        let x = f64::from(x);
        let y = f64::from(y);
        (x + (y - x) * t).round().clamp(0.0, 255.0) as u8
    };
    Rgb8::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
}

/// A start/end colour pair sampled along a layer's normalized position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorPair {
    /// Colour at `t = 0` (outermost layer).
    pub start: Rgb8,
    /// Colour at `t = 1` (innermost layer).
    pub end: Rgb8,
}

impl ColorPair {
    /// Build a pair.
    pub fn new(start: Rgb8, end: Rgb8) -> Self {
        Self { start, end }
    }

    /// Colour at `t`.
    pub fn at(self, t: f64) -> Rgb8 {
        interpolate(self.start, self.end, t)
    }

    /// The same pair running the other way.
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/interp.rs"]
mod tests;
