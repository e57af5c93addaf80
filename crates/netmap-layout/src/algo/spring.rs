use crate::algo::SpringOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult, Point, rescale};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Distances below this are clipped so coincident nodes still repel.
const MIN_DISTANCE: f64 = 0.01;

pub fn layout(graph: &Graph, opts: &SpringOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let n = graph.nodes.len();
    let mut out = LayoutResult::default();
    if n == 0 {
        return Ok(out);
    }
    if n == 1 {
        out.positions
            .insert(graph.nodes[0].id.clone(), Point::default());
        return Ok(out);
    }

    let seed = opts.seed.unwrap_or_else(|| {
        let seed = rand::random();
        tracing::info!(seed, "spring layout seeded from OS entropy");
        seed
    });
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<Point> = (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    let sim = SpringSim::new(n, &graph.edge_indices(), opts);
    let iterations = sim.run(&mut pos);
    tracing::debug!(nodes = n, edges = graph.edges.len(), iterations, "spring layout done");

    rescale(&mut pos, opts.scale);
    for (node, p) in graph.nodes.iter().zip(pos) {
        out.positions.insert(node.id.clone(), p);
    }
    Ok(out)
}

#[derive(Debug, Clone)]
struct SpringSim {
    n: usize,
    /// Dense symmetric adjacency, row-major.
    adjacency: Vec<f64>,
    k: f64,
    iterations: usize,
    threshold: f64,
}

impl SpringSim {
    fn new(n: usize, edges: &[(usize, usize)], opts: &SpringOptions) -> Self {
        let mut adjacency = vec![0.0; n * n];
        for &(a, b) in edges {
            adjacency[a * n + b] = 1.0;
            adjacency[b * n + a] = 1.0;
        }
        let k = opts
            .k
            .filter(|k| k.is_finite() && *k > 0.0)
            .unwrap_or_else(|| (1.0 / n as f64).sqrt());
        Self {
            n,
            adjacency,
            k,
            iterations: opts.iterations,
            threshold: opts.threshold,
        }
    }

    /// Runs the cooling schedule in place; returns the number of iterations performed.
    fn run(&self, pos: &mut [Point]) -> usize {
        let (min_x, max_x, min_y, max_y) = pos.iter().fold(
            (
                f64::INFINITY,
                f64::NEG_INFINITY,
                f64::INFINITY,
                f64::NEG_INFINITY,
            ),
            |(a, b, c, d), p| (a.min(p.x), b.max(p.x), c.min(p.y), d.max(p.y)),
        );
        // Temperature bounds the step length and cools linearly to zero.
        let mut t = (max_x - min_x).max(max_y - min_y) * 0.1;
        let dt = t / (self.iterations as f64 + 1.0);

        let mut disp: Vec<Point> = vec![Point::default(); self.n];
        for iteration in 0..self.iterations {
            self.displacements(pos, &mut disp);

            let mut moved_sq = 0.0;
            for (p, d) in pos.iter_mut().zip(&disp) {
                let mut len = (d.x * d.x + d.y * d.y).sqrt();
                if len < MIN_DISTANCE {
                    len = 0.1;
                }
                let step_x = d.x * t / len;
                let step_y = d.y * t / len;
                p.x += step_x;
                p.y += step_y;
                moved_sq += step_x * step_x + step_y * step_y;
            }
            t -= dt;

            if moved_sq.sqrt() / (self.n as f64) < self.threshold {
                return iteration + 1;
            }
        }
        self.iterations
    }

    fn displacements(&self, pos: &[Point], disp: &mut [Point]) {
        let k2 = self.k * self.k;
        for i in 0..self.n {
            let mut fx = 0.0;
            let mut fy = 0.0;
            let row = &self.adjacency[i * self.n..(i + 1) * self.n];
            for (j, &a) in row.iter().enumerate() {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                // Repulsion k²/d from every node, attraction d²/k along edges.
                let f = k2 / (dist * dist) - a * dist / self.k;
                fx += dx * f;
                fy += dy * f;
            }
            disp[i] = Point::new(fx, fy);
        }
    }
}
