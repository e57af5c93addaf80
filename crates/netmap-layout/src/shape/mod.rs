//! Boundary polygons around point sets.
//!
//! `alpha == 0` yields the convex hull. For `alpha > 0` the shape is the union of Delaunay
//! triangles whose circumradius is below `1 / alpha`; larger alphas hug the points tighter.

mod delaunay;
mod hull;

use crate::error::GeometryError;
use crate::graph::Point;
use rustc_hash::FxHashMap;

pub use hull::convex_hull;

/// A simple polygon stored as an open ring: the closing edge from the last vertex back to the
/// first is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point>,
}

impl Polygon {
    pub fn area(&self) -> f64 {
        signed_area(&self.exterior).abs()
    }

    /// Ring edges including the closing edge.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.exterior.len();
        (0..n).map(move |i| (self.exterior[i], self.exterior[(i + 1) % n]))
    }
}

pub fn alpha_shape(points: &[Point], alpha: f64) -> Result<Polygon, GeometryError> {
    check_points(points)?;
    if points.len() < 4 || !(alpha > 0.0) {
        return convex_hull(points);
    }

    let max_radius = 1.0 / alpha;
    let triangles: Vec<[usize; 3]> = delaunay::triangulate(points)
        .into_iter()
        .filter(|t| t.circumradius() < max_radius)
        .map(|t| t.ccw(points))
        .collect();
    if triangles.is_empty() {
        return Err(GeometryError::Degenerate {
            count: points.len(),
        });
    }

    outer_ring(points, &triangles).ok_or(GeometryError::Degenerate {
        count: points.len(),
    })
}

fn check_points(points: &[Point]) -> Result<(), GeometryError> {
    if points.len() < 3 {
        return Err(GeometryError::TooFewPoints {
            count: points.len(),
        });
    }
    if let Some(index) = points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(GeometryError::NonFinite { index });
    }
    Ok(())
}

/// Chains the boundary edges of a triangle set into rings and keeps the largest one.
fn outer_ring(points: &[Point], triangles: &[[usize; 3]]) -> Option<Polygon> {
    let mut edge_use: FxHashMap<(usize, usize), usize> = FxHashMap::default();
    for t in triangles {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            *edge_use.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }

    // Boundary edges keep the orientation of their (counter-clockwise) triangle.
    let mut next: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    let mut boundary = 0usize;
    for t in triangles {
        for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
            if edge_use[&(a.min(b), a.max(b))] == 1 {
                next.entry(a).or_default().push(b);
                boundary += 1;
            }
        }
    }

    let mut starts: Vec<usize> = next.keys().copied().collect();
    starts.sort_unstable();

    let mut best: Option<Polygon> = None;
    let mut consumed = 0usize;
    for start in starts {
        while next.get(&start).is_some_and(|v| !v.is_empty()) {
            let mut ring = vec![start];
            let mut cur = start;
            loop {
                let Some(succ) = next.get_mut(&cur).and_then(Vec::pop) else {
                    break;
                };
                consumed += 1;
                if succ == start {
                    break;
                }
                ring.push(succ);
                cur = succ;
                if consumed > boundary {
                    return best;
                }
            }
            if ring.len() < 3 {
                continue;
            }
            let polygon = Polygon {
                exterior: ring.into_iter().map(|ix| points[ix]).collect(),
            };
            if best.as_ref().is_none_or(|b| polygon.area() > b.area()) {
                best = Some(polygon);
            }
        }
    }
    best
}

pub(crate) fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    let mut acc = 0.0;
    for i in 0..n {
        let (a, b) = (ring[i], ring[(i + 1) % n]);
        acc += a.x * b.y - b.x * a.y;
    }
    acc / 2.0
}
