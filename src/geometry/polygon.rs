use crate::foundation::core::{Affine, BezPath, Point, Rect};

const AREA_EPS: f64 = 1e-9;

/// Closed polygon boundary as an ordered point sequence (the closing edge is implicit).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Wrap an ordered point list.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Vertices in order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable vertices, for in-place deformation.
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Vertex count.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace signed area; positive for clockwise winding in y-down space.
    pub fn signed_area(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x * b.y - b.x * a.y)
            .sum::<f64>()
            / 2.0
    }

    /// Area centroid, falling back to the vertex mean for degenerate (near zero-area) outlines.
    ///
    /// Returns `None` for an empty polygon.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }

        let area = self.signed_area();
        if area.abs() > AREA_EPS {
            let (mut cx, mut cy) = (0.0, 0.0);
            for (a, b) in self.edges() {
                let cross = a.x * b.y - b.x * a.y;
                cx += (a.x + b.x) * cross;
                cy += (a.y + b.y) * cross;
            }
            let k = 1.0 / (6.0 * area);
            return Some(Point::new(cx * k, cy * k));
        }

        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / n, sy / n))
    }

    /// Copy of this polygon scaled by `factor` about `center`.
    pub fn scaled_about(&self, center: Point, factor: f64) -> Self {
        let xf = Affine::translate(center.to_vec2())
            * Affine::scale(factor)
            * Affine::translate(-center.to_vec2());
        self.transformed(xf)
    }

    /// Copy of this polygon with every vertex mapped through `xf`.
    pub fn transformed(&self, xf: Affine) -> Self {
        Self {
            points: self.points.iter().map(|&p| xf * p).collect(),
        }
    }

    /// Even-odd point-in-polygon test. Points exactly on an edge may land either way.
    pub fn contains(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Axis-aligned bounds, or `None` for an empty polygon.
    pub fn bounding_box(&self) -> Option<Rect> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p)),
        )
    }

    /// Closed straight-segment path through every vertex.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut pts = self.points.iter();
        if let Some(&first) = pts.next() {
            path.move_to(first);
            for &p in pts {
                path.line_to(p);
            }
            path.close_path();
        }
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/polygon.rs"]
mod tests;
