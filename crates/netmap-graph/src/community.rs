//! Modularity-based community detection (Louvain).
//!
//! Blondel et al. (2008), "Fast unfolding of communities in large networks". Each pass moves
//! single nodes to the neighbouring community with the best modularity gain until no move
//! improves modularity by more than [`MIN_GAIN`], then collapses every community into one node
//! of a weighted graph and repeats. The partition of the last pass is returned, mapped back to
//! the original nodes.

use crate::graph::Graph;
use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashMap;

/// Stop a pass once modularity improves by less than this.
pub const MIN_GAIN: f64 = 1e-7;

/// Node id -> community label. Labels are dense (`0..k`) and numbered in node order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    labels: IndexMap<String, usize>,
}

impl Partition {
    pub fn label(&self, node: &str) -> Option<usize> {
        self.labels.get(node).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn community_count(&self) -> usize {
        self.labels.values().copied().max().map_or(0, |m| m + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Members of each community, indexed by label, in node order.
    pub fn communities(&self) -> Vec<Vec<&str>> {
        let mut out: Vec<Vec<&str>> = vec![Vec::new(); self.community_count()];
        for (node, label) in self.iter() {
            out[label].push(node);
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct Louvain {
    pub resolution: f64,
    /// Seed for the node visiting order. `None` draws one from the OS RNG.
    pub seed: Option<u64>,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: None,
        }
    }
}

impl Louvain {
    pub fn new(resolution: f64) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn partition(&self, graph: &Graph) -> Partition {
        let n = graph.node_count();
        let seed = self.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut membership: Vec<usize> = (0..n).collect();
        let mut current = WeightedGraph::from_graph(graph);

        if current.total_weight > 0.0 {
            let mut status = Status::new(&current);
            one_level(&current, &mut status, self.resolution, &mut rng);
            let mut modularity = status.modularity(self.resolution);
            let mut level = renumber(&status.node2com);
            compose(&mut membership, &level);

            loop {
                current = current.induced(&level);
                let mut status = Status::new(&current);
                one_level(&current, &mut status, self.resolution, &mut rng);
                let next = status.modularity(self.resolution);
                if next - modularity < MIN_GAIN {
                    break;
                }
                modularity = next;
                level = renumber(&status.node2com);
                compose(&mut membership, &level);
            }
            tracing::debug!(seed, modularity, "louvain converged");
        }

        let membership = renumber(&membership);
        let labels = graph
            .nodes()
            .zip(membership)
            .map(|(id, label)| (id.to_string(), label))
            .collect();
        Partition { labels }
    }
}

/// Modularity of `partition` over `graph` with unit edge weights.
///
/// Nodes missing from the partition are treated as singletons.
pub fn modularity(
    graph: &Graph,
    partition: &Partition,
    resolution: f64,
) -> f64 {
    let wg = WeightedGraph::from_graph(graph);
    if wg.total_weight <= 0.0 {
        return 0.0;
    }
    let mut next_singleton = partition.community_count();
    let node2com: Vec<usize> = graph
        .nodes()
        .map(|id| {
            partition.label(id).unwrap_or_else(|| {
                next_singleton += 1;
                next_singleton - 1
            })
        })
        .collect();

    let mut status = Status::new(&wg);
    for (node, &com) in node2com.iter().enumerate() {
        let own = status.node2com[node];
        let links = wg.links_to(node, &status.node2com, own);
        status.remove(node, own, links, &wg);
        let links = wg.links_to(node, &status.node2com, com);
        status.insert(node, com, links, &wg);
    }
    status.modularity(resolution)
}

#[derive(Debug, Clone)]
struct WeightedGraph {
    /// Neighbours without self-loops.
    adj: Vec<Vec<(usize, f64)>>,
    loops: Vec<f64>,
    /// Weighted degree; a self-loop counts twice.
    degree: Vec<f64>,
    /// Sum of edge weights, self-loops counted once.
    total_weight: f64,
}

impl WeightedGraph {
    fn from_graph(graph: &Graph) -> Self {
        let n = graph.node_count();
        let mut adj: Vec<FxHashMap<usize, f64>> = vec![FxHashMap::default(); n];
        let mut loops = vec![0.0; n];
        let mut total_weight = 0.0;
        for (a, b) in graph.edge_ixs() {
            total_weight += 1.0;
            if a == b {
                loops[a] += 1.0;
            } else {
                *adj[a].entry(b).or_default() += 1.0;
                *adj[b].entry(a).or_default() += 1.0;
            }
        }
        Self::from_parts(adj, loops, total_weight)
    }

    fn from_parts(adj: Vec<FxHashMap<usize, f64>>, loops: Vec<f64>, total_weight: f64) -> Self {
        let adj: Vec<Vec<(usize, f64)>> = adj
            .into_iter()
            .map(|m| {
                let mut v: Vec<(usize, f64)> = m.into_iter().collect();
                v.sort_by_key(|&(ix, _)| ix);
                v
            })
            .collect();
        let degree = adj
            .iter()
            .zip(&loops)
            .map(|(nbrs, l)| nbrs.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * l)
            .collect();
        Self {
            adj,
            loops,
            degree,
            total_weight,
        }
    }

    fn len(&self) -> usize {
        self.adj.len()
    }

    /// Collapses each community of `membership` into a single node.
    fn induced(&self, membership: &[usize]) -> Self {
        let k = membership.iter().copied().max().map_or(0, |m| m + 1);
        let mut adj: Vec<FxHashMap<usize, f64>> = vec![FxHashMap::default(); k];
        let mut loops = vec![0.0; k];
        for (a, nbrs) in self.adj.iter().enumerate() {
            let ca = membership[a];
            loops[ca] += self.loops[a];
            for &(b, w) in nbrs {
                // Each undirected edge appears twice in `adj`.
                if b < a {
                    continue;
                }
                let cb = membership[b];
                if ca == cb {
                    loops[ca] += w;
                } else {
                    *adj[ca].entry(cb).or_default() += w;
                    *adj[cb].entry(ca).or_default() += w;
                }
            }
        }
        Self::from_parts(adj, loops, self.total_weight)
    }

    /// Total edge weight from `node` into community `com`, self-loops excluded.
    fn links_to(&self, node: usize, node2com: &[usize], com: usize) -> f64 {
        self.adj[node]
            .iter()
            .filter(|&&(nbr, _)| node2com[nbr] == com)
            .map(|&(_, w)| w)
            .sum()
    }

    fn neighbour_communities(&self, node: usize, node2com: &[usize]) -> Vec<(usize, f64)> {
        let mut out: Vec<(usize, f64)> = Vec::new();
        for &(nbr, w) in &self.adj[node] {
            let com = node2com[nbr];
            match out.iter_mut().find(|(c, _)| *c == com) {
                Some(slot) => slot.1 += w,
                None => out.push((com, w)),
            }
        }
        out
    }
}

#[derive(Debug, Clone)]
struct Status {
    node2com: Vec<usize>,
    /// Sum of member degrees per community.
    degrees: Vec<f64>,
    /// Internal edge weight per community.
    internals: Vec<f64>,
    total_weight: f64,
}

impl Status {
    fn new(graph: &WeightedGraph) -> Self {
        Self {
            node2com: (0..graph.len()).collect(),
            degrees: graph.degree.clone(),
            internals: graph.loops.clone(),
            total_weight: graph.total_weight,
        }
    }

    fn remove(&mut self, node: usize, com: usize, links: f64, graph: &WeightedGraph) {
        self.degrees[com] -= graph.degree[node];
        self.internals[com] -= links + graph.loops[node];
        self.node2com[node] = usize::MAX;
    }

    fn insert(&mut self, node: usize, com: usize, links: f64, graph: &WeightedGraph) {
        if com >= self.degrees.len() {
            self.degrees.resize(com + 1, 0.0);
            self.internals.resize(com + 1, 0.0);
        }
        self.node2com[node] = com;
        self.degrees[com] += graph.degree[node];
        self.internals[com] += links + graph.loops[node];
    }

    fn modularity(&self, resolution: f64) -> f64 {
        let m = self.total_weight;
        if m <= 0.0 {
            return 0.0;
        }
        let mut used = vec![false; self.degrees.len()];
        for &com in &self.node2com {
            used[com] = true;
        }
        used.iter()
            .enumerate()
            .filter(|&(_, &u)| u)
            .map(|(com, _)| {
                let d = self.degrees[com] / (2.0 * m);
                self.internals[com] / m - resolution * d * d
            })
            .sum()
    }
}

/// Local moving phase: visit nodes in random order until no move improves modularity.
fn one_level(graph: &WeightedGraph, status: &mut Status, resolution: f64, rng: &mut StdRng) {
    let two_m = 2.0 * status.total_weight;
    let mut order: Vec<usize> = (0..graph.len()).collect();
    let mut current = status.modularity(resolution);

    loop {
        let mut modified = false;
        order.shuffle(rng);

        for &node in &order {
            let com_node = status.node2com[node];
            let degc_totw = graph.degree[node] / two_m;
            let mut neigh = graph.neighbour_communities(node, &status.node2com);
            let links_own = neigh
                .iter()
                .find(|(c, _)| *c == com_node)
                .map_or(0.0, |&(_, w)| w);
            let remove_cost = -links_own
                + resolution * (status.degrees[com_node] - graph.degree[node]) * degc_totw;
            status.remove(node, com_node, links_own, graph);

            neigh.shuffle(rng);
            let mut best_com = com_node;
            let mut best_increase = 0.0;
            for &(com, dnc) in &neigh {
                let incr = remove_cost + dnc - resolution * status.degrees[com] * degc_totw;
                if incr > best_increase {
                    best_increase = incr;
                    best_com = com;
                }
            }
            let links_best = neigh
                .iter()
                .find(|(c, _)| *c == best_com)
                .map_or(0.0, |&(_, w)| w);
            status.insert(node, best_com, links_best, graph);
            if best_com != com_node {
                modified = true;
            }
        }

        let next = status.modularity(resolution);
        if !modified || next - current < MIN_GAIN {
            break;
        }
        current = next;
    }
}

/// Relabels communities to `0..k` in order of first appearance.
fn renumber(node2com: &[usize]) -> Vec<usize> {
    let mut mapping: FxHashMap<usize, usize> = FxHashMap::default();
    node2com
        .iter()
        .map(|&c| {
            let next = mapping.len();
            *mapping.entry(c).or_insert(next)
        })
        .collect()
}

fn compose(membership: &mut [usize], level: &[usize]) {
    for m in membership.iter_mut() {
        *m = level[*m];
    }
}
