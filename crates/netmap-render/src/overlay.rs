//! Community rectangles shown by the "Estimate community ON" button.

use crate::figure::{Line, Shape};
use crate::palette::community_color;
use crate::{Error, Result};
use netmap_graph::Partition;
use netmap_layout::LayoutResult;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn expand(self, margin: f64) -> Self {
        Self {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Padding around each community: the largest marker size over 250.
pub fn margin(sizes: &[f64]) -> f64 {
    sizes.iter().copied().fold(0.0, f64::max) / 250.0
}

/// One translucent rectangle per community, labels ascending.
pub fn community_shapes(
    partition: &Partition,
    layout: &LayoutResult,
    margin: f64,
) -> Result<Vec<Shape>> {
    let mut shapes = Vec::with_capacity(partition.community_count());
    for (label, members) in partition.communities().into_iter().enumerate() {
        let points = members
            .iter()
            .map(|id| {
                layout
                    .position(id)
                    .map(|p| (p.x, p.y))
                    .ok_or_else(|| Error::MissingPosition { id: id.to_string() })
            })
            .collect::<Result<Vec<_>>>()?;
        let Some(bounds) = Bounds::from_points(points) else {
            continue;
        };
        let b = bounds.expand(margin);
        shapes.push(Shape {
            kind: "rect",
            x0: b.min_x,
            x1: b.max_x,
            y0: b.min_y,
            y1: b.max_y,
            fillcolor: community_color(label).to_string(),
            line: Line::new(0.0, "black"),
            opacity: 0.2,
        });
    }
    Ok(shapes)
}
