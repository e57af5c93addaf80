use netmap_layout::{
    Algorithm, CircularOptions, Edge, Graph, Node, Point, SpringOptions, alpha_shape, layout,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn star(center: &str, leaves: &[&str]) -> Graph {
    let mut nodes = vec![Node::new(center)];
    nodes.extend(leaves.iter().map(|l| Node::new(*l)));
    let edges = leaves
        .iter()
        .map(|l| Edge {
            id: format!("{center}->{l}"),
            source: center.to_string(),
            target: l.to_string(),
        })
        .collect();
    Graph { nodes, edges }
}

#[test]
fn every_node_gets_a_finite_position() {
    let g = star("hub", &["a", "b", "c", "d", "e"]);
    let out = layout(
        &g,
        Algorithm::Spring(SpringOptions {
            seed: Some(9),
            ..Default::default()
        }),
    )
    .expect("layout ok");

    assert_eq!(out.positions.len(), 6);
    for (id, p) in &out.positions {
        assert!(p.x.is_finite() && p.y.is_finite(), "{id}: {p:?}");
    }
}

#[test]
fn leaves_of_a_star_enclose_a_hull() {
    let g = star("hub", &["a", "b", "c", "d", "e"]);
    let out = layout(
        &g,
        Algorithm::Spring(SpringOptions {
            seed: Some(21),
            ..Default::default()
        }),
    )
    .expect("layout ok");

    let leaves: Vec<_> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|id| out.position(id).expect("position"))
        .collect();
    let hull = alpha_shape(&leaves, 0.0).expect("hull");
    assert!(hull.exterior.len() >= 3);
    assert!(hull.area() > 0.0);
}

#[test]
fn circular_algorithm_keeps_node_order() {
    let g = star("hub", &["a", "b", "c"]);
    let out = layout(&g, Algorithm::Circular(CircularOptions::default())).expect("layout ok");
    let hub = out.position("hub").expect("hub");
    assert!((hub.x - 1.0).abs() < 1e-9);
    assert!(hub.y.abs() < 1e-9);
}

#[test]
fn empty_graph_has_no_positions() {
    let out = layout(&Graph::default(), Algorithm::default()).expect("layout ok");
    assert!(out.positions.is_empty());
}

#[test]
fn tiny_alpha_keeps_every_triangle_of_the_hull() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let n = rng.gen_range(4..=24);
        let points: Vec<Point> = (0..n)
            .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
            .collect();

        let hull = alpha_shape(&points, 0.0).expect("hull");
        let shape = alpha_shape(&points, 1e-9).expect("alpha shape");
        assert!(
            (shape.area() - hull.area()).abs() < 1e-9,
            "hull {} vs alpha shape {} for {points:?}",
            hull.area(),
            shape.area()
        );
    }
}
