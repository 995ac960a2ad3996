//! Sinusoidal "paper-cut" displacement applied to every boundary vertex.

use crate::{
    foundation::{
        core::{Canvas, Point},
        math::map_range,
    },
    geometry::polygon::Polygon,
    noise::rng::Rng64,
};

/// Inclusive lower bound of the sine wavelength radii.
pub const MIN_RADIUS: u32 = 24;
/// Exclusive upper bound of the sine wavelength radii.
pub const MAX_RADIUS: u32 = 64;
/// Distance from center at which the warp factors reach their endpoints.
pub const WARP_DOMAIN: f64 = 400.0;

/// One coherent displacement field shared by every layer of a generation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WarpField {
    /// Wavelength radius of the horizontal displacement (sampled along `y`).
    pub r1: u32,
    /// Wavelength radius of the vertical displacement (sampled along `x`).
    pub r2: u32,
    /// Horizontal intensity.
    pub chaos_x: f64,
    /// Vertical intensity.
    pub chaos_y: f64,
    /// Canvas whose center anchors the factor ramps.
    pub canvas: Canvas,
}

impl WarpField {
    /// Field with explicit radii.
    pub fn new(r1: u32, r2: u32, chaos_x: f64, chaos_y: f64, canvas: Canvas) -> Self {
        Self {
            r1: r1.max(1),
            r2: r2.max(1),
            chaos_x,
            chaos_y,
            canvas,
        }
    }

    /// Draw both radii from `rng`, uniformly in `[MIN_RADIUS, MAX_RADIUS)`.
    pub fn draw(rng: &mut Rng64, chaos_x: f64, chaos_y: f64, canvas: Canvas) -> Self {
        let r1 = rng.range_u32(MIN_RADIUS, MAX_RADIUS);
        let r2 = rng.range_u32(MIN_RADIUS, MAX_RADIUS);
        Self::new(r1, r2, chaos_x, chaos_y, canvas)
    }

    /// Both intensities zero: the field leaves geometry untouched.
    pub fn is_identity(&self) -> bool {
        self.chaos_x == 0.0 && self.chaos_y == 0.0
    }

    /// Displace a single point. Pure: no state is read besides the field itself.
    pub fn displace(&self, p: Point) -> Point {
        if self.is_identity() {
            return p;
        }
        let c = self.canvas.center();
        let factor_x = map_range(c.x - p.x, WARP_DOMAIN, -WARP_DOMAIN, 1.0, self.chaos_x);
        let factor_y = map_range(c.y - p.y, WARP_DOMAIN, -WARP_DOMAIN, 10.0, self.chaos_y);
        Point::new(
            p.x - factor_x * (p.y / f64::from(self.r1)).sin(),
            p.y - factor_y * (p.x / f64::from(self.r2)).sin(),
        )
    }

    /// Displace every vertex of `poly` in place.
    ///
    /// Must only run on undistorted geometry; running it twice compounds the distortion.
    pub fn apply(&self, poly: &mut Polygon) {
        if self.is_identity() {
            return;
        }
        for p in poly.points_mut() {
            *p = self.displace(*p);
        }
    }

    /// Warp every boundary and hand the finished set to the clip stage.
    pub fn apply_all(&self, mut boundaries: Vec<Polygon>) -> WarpedBoundaries {
        for poly in &mut boundaries {
            self.apply(poly);
        }
        tracing::debug!(
            layers = boundaries.len(),
            r1 = self.r1,
            r2 = self.r2,
            identity = self.is_identity(),
            "warp applied"
        );
        WarpedBoundaries(boundaries)
    }
}

/// Layer boundaries, outer to inner, after the warp has run on all of them.
///
/// Only [`WarpField::apply_all`] builds this, so holding one proves the warp is complete.
#[derive(Clone, Debug, PartialEq)]
pub struct WarpedBoundaries(Vec<Polygon>);

impl WarpedBoundaries {
    /// Boundaries in layer order.
    pub fn as_slice(&self) -> &[Polygon] {
        &self.0
    }

    /// Take ownership of the boundaries.
    pub fn into_inner(self) -> Vec<Polygon> {
        self.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/warp/field.rs"]
mod tests;
