//! Delaunay triangulation of a level's points, backed by `delaunator`.

use super::cross;
use crate::graph::Point;

#[derive(Debug, Clone, Copy)]
pub(super) struct Triangle {
    pub(super) v: [usize; 3],
    r: f64,
}

impl Triangle {
    fn new(v: [usize; 3], pts: &[Point]) -> Self {
        let (a, b, c) = (pts[v[0]], pts[v[1]], pts[v[2]]);
        let ab = (b.x - a.x).hypot(b.y - a.y);
        let bc = (c.x - b.x).hypot(c.y - b.y);
        let ca = (a.x - c.x).hypot(a.y - c.y);
        let twice_area = cross(a, b, c).abs();
        let r = if twice_area == 0.0 {
            f64::INFINITY
        } else {
            ab * bc * ca / (2.0 * twice_area)
        };
        Self { v, r }
    }

    pub(super) fn circumradius(&self) -> f64 {
        self.r
    }

    /// Vertex indices in counter-clockwise order.
    pub(super) fn ccw(&self, pts: &[Point]) -> [usize; 3] {
        let [a, b, c] = self.v;
        if cross(pts[a], pts[b], pts[c]) < 0.0 {
            [a, c, b]
        } else {
            [a, b, c]
        }
    }
}

/// Triangles covering the convex hull of `points`. Empty for collinear input.
pub(super) fn triangulate(points: &[Point]) -> Vec<Triangle> {
    if points.len() < 3 {
        return Vec::new();
    }
    let coords: Vec<delaunator::Point> = points
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    delaunator::triangulate(&coords)
        .triangles
        .chunks_exact(3)
        .map(|t| Triangle::new([t[0], t[1], t[2]], points))
        .collect()
}
