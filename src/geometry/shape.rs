use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use crate::{foundation::core::Point, geometry::polygon::Polygon};

/// Shape family shared by every layer of a generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Circle of radius `size`.
    #[default]
    Circle,
    /// Axis-aligned square with half-side `size`.
    Square,
    /// Upward-pointing equilateral triangle with circumradius `size`.
    Triangle,
    /// Regular hexagon with circumradius `size`.
    Hexagon,
}

/// Point density used when approximating shapes as polygons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tessellation {
    /// Vertices used for a full circle.
    pub circle_segments: u32,
    /// Segments each straight edge is split into, so the warp bends edges and not only corners.
    pub edge_segments: u32,
}

impl Default for Tessellation {
    fn default() -> Self {
        Self {
            circle_segments: 48,
            edge_segments: 12,
        }
    }
}

impl Tessellation {
    /// Smallest accepted circle vertex count.
    pub const MIN_CIRCLE_SEGMENTS: u32 = 8;
    /// Largest accepted circle vertex count.
    pub const MAX_CIRCLE_SEGMENTS: u32 = 720;
    /// Largest accepted per-edge subdivision.
    pub const MAX_EDGE_SEGMENTS: u32 = 128;

    /// Copy with both counts forced into their supported ranges.
    pub fn clamped(self) -> Self {
        Self {
            circle_segments: self
                .circle_segments
                .clamp(Self::MIN_CIRCLE_SEGMENTS, Self::MAX_CIRCLE_SEGMENTS),
            edge_segments: self.edge_segments.clamp(1, Self::MAX_EDGE_SEGMENTS),
        }
    }
}

impl ShapeKind {
    /// Polygon approximation centered on the origin, unrotated.
    pub fn outline(self, size: f64, tess: Tessellation) -> Polygon {
        let tess = tess.clamped();
        match self {
            Self::Circle => {
                let n = tess.circle_segments;
                Polygon::new(
                    (0..n)
                        .map(|k| {
                            let a = TAU * f64::from(k) / f64::from(n);
                            Point::new(size * a.cos(), size * a.sin())
                        })
                        .collect(),
                )
            }
            Self::Square => {
                regular_polygon(4, size * std::f64::consts::SQRT_2, FRAC_PI_4, tess.edge_segments)
            }
            Self::Triangle => regular_polygon(3, size, -FRAC_PI_2, tess.edge_segments),
            Self::Hexagon => regular_polygon(6, size, 0.0, tess.edge_segments),
        }
    }
}

fn regular_polygon(sides: u32, radius: f64, start: f64, edge_segments: u32) -> Polygon {
    let corner = |k: u32| {
        let a = start + TAU * f64::from(k) / f64::from(sides);
        Point::new(radius * a.cos(), radius * a.sin())
    };

    let mut points = Vec::with_capacity((sides * edge_segments) as usize);
    for k in 0..sides {
        let a = corner(k);
        let b = corner((k + 1) % sides);
        for s in 0..edge_segments {
            points.push(a.lerp(b, f64::from(s) / f64::from(edge_segments)));
        }
    }
    Polygon::new(points)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/shape.rs"]
mod tests;
