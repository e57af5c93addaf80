use crate::algo::CircularOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point, rescale};

pub fn layout(graph: &Graph, opts: &CircularOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let n = graph.nodes.len();
    let mut out = LayoutResult::default();
    if n == 1 {
        out.positions
            .insert(graph.nodes[0].id.clone(), Point::default());
        return Ok(out);
    }

    let mut pos: Vec<Point> = (0..n)
        .map(|i| {
            let theta = std::f64::consts::TAU * (i as f64) / (n as f64);
            Point::new(theta.cos(), theta.sin())
        })
        .collect();
    rescale(&mut pos, opts.scale);

    for (node, p) in graph.nodes.iter().zip(pos) {
        out.positions.insert(node.id.clone(), p);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;

    #[test]
    fn circular_layout_places_nodes_on_a_circle() {
        let g = Graph {
            nodes: ["a", "b", "c", "d"].into_iter().map(Node::new).collect(),
            edges: Vec::new(),
        };
        let out = layout(&g, &CircularOptions { scale: 2.0 }).unwrap();
        for p in out.positions.values() {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 2.0).abs() < 1e-9, "r={r}");
        }
        let a = out.position("a").unwrap();
        assert!((a.x - 2.0).abs() < 1e-9 && a.y.abs() < 1e-9);
    }
}
