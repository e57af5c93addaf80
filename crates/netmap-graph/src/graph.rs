//! Undirected, simple graph container keyed by string node ids.
//!
//! Nodes and edges keep their insertion order, which is also the order every iterator yields.
//! An edge and its reverse are the same edge; inserting either twice is a no-op.

use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Edge endpoints in the orientation of the first insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

#[derive(Debug, Clone)]
struct EdgeEntry {
    key: EdgeKey,
    v_ix: usize,
    w_ix: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<String>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry>,
    // Endpoint indices in ascending order, so both orientations hit the same slot.
    edge_index: HashMap<(usize, usize), usize>,
}

fn canonical_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Adds `id` unless present; returns its dense index.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            return ix;
        }
        let ix = self.nodes.len();
        self.nodes.push(id.clone());
        self.node_index.insert(id, ix);
        ix
    }

    /// Dense index of `id` in insertion order.
    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.clone()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    /// Edges as dense `(v_ix, w_ix)` pairs, in insertion order.
    pub fn edge_ixs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().map(|e| (e.v_ix, e.w_ix))
    }

    /// Inserts the undirected edge `v`-`w`, creating missing endpoints.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        let (v, w) = (v.into(), w.into());
        let v_ix = self.ensure_node(v.clone());
        let w_ix = self.ensure_node(w.clone());

        let pair = canonical_pair(v_ix, w_ix);
        if self.edge_index.contains_key(&pair) {
            return self;
        }
        self.edge_index.insert(pair, self.edges.len());
        self.edges.push(EdgeEntry {
            key: EdgeKey { v, w },
            v_ix,
            w_ix,
        });
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        match (self.node_ix(v), self.node_ix(w)) {
            (Some(a), Some(b)) => self.edge_index.contains_key(&canonical_pair(a, b)),
            _ => false,
        }
    }
}
