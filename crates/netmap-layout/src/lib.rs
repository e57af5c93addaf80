#![forbid(unsafe_code)]

//! Headless graph layout (force-directed and circular) plus the point-set boundary shapes
//! drawn around groups of laid-out nodes.

pub mod algo;
pub mod error;
pub mod graph;
pub mod shape;

pub use algo::{Algorithm, CircularOptions, SpringOptions};
pub use error::{Error, GeometryError, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};
pub use shape::{Polygon, alpha_shape, convex_hull};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: Algorithm) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::Spring(opts) => algo::spring::layout(graph, &opts),
        Algorithm::Circular(opts) => algo::circular::layout(graph, &opts),
    }
}
