use super::{Polygon, check_points, cross};
use crate::error::GeometryError;
use crate::graph::Point;

/// Convex hull (Andrew's monotone chain), counter-clockwise, without collinear vertices.
pub fn convex_hull(points: &[Point]) -> Result<Polygon, GeometryError> {
    check_points(points)?;

    let mut sorted: Vec<Point> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }
    lower.pop();
    upper.pop();
    lower.extend(upper);

    if lower.len() < 3 {
        return Err(GeometryError::Degenerate {
            count: points.len(),
        });
    }
    Ok(Polygon { exterior: lower })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_drops_interior_and_duplicate_points() {
        let points: Vec<Point> = [
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (0.5, 0.2),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.5, 0.0),
        ]
        .into_iter()
        .map(|(x, y)| Point::new(x, y))
        .collect();
        let hull = convex_hull(&points).unwrap();
        assert_eq!(
            hull.exterior,
            vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn non_finite_points_are_rejected() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(f64::NAN, 1.0),
            Point::new(1.0, 1.0),
        ];
        assert_eq!(
            convex_hull(&points),
            Err(GeometryError::NonFinite { index: 1 })
        );
    }
}
