use crate::error::GraphBuildError;
use crate::record::{Record, RecordIndex};
use netmap_graph::Graph;
use rustc_hash::FxHashMap;

/// The undirected parent/child graph plus per-node attributes.
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub graph: Graph,
    pub index: RecordIndex,
}

impl Network {
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.index.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Builds the network from table rows.
///
/// The first row is the root and never contributes an edge. Every later row links to its
/// parent; a later row with a blank parent becomes an additional root.
pub fn build_network(records: Vec<Record>) -> Result<Network, GraphBuildError> {
    if records.is_empty() {
        return Err(GraphBuildError::Empty);
    }

    let mut rows: FxHashMap<&str, usize> =
        FxHashMap::with_capacity_and_hasher(records.len(), Default::default());
    for (i, r) in records.iter().enumerate() {
        let row = i + 2;
        if let Some(&first_row) = rows.get(r.id.as_str()) {
            return Err(GraphBuildError::DuplicateId {
                id: r.id.clone(),
                first_row,
                row,
            });
        }
        rows.insert(r.id.as_str(), row);
    }

    let mut graph: Graph = Graph::new();
    for r in &records {
        graph.ensure_node(r.id.as_str());
    }
    for (i, r) in records.iter().enumerate().skip(1) {
        let row = i + 2;
        if r.is_root() {
            tracing::warn!(id = %r.id, row, "blank parent, treating row as an extra root");
            continue;
        }
        if r.parent == r.id {
            return Err(GraphBuildError::SelfParent {
                id: r.id.clone(),
                row,
            });
        }
        if !rows.contains_key(r.parent.as_str()) {
            return Err(GraphBuildError::UnknownParent {
                id: r.id.clone(),
                parent: r.parent.clone(),
                row,
            });
        }
        graph.set_edge(r.parent.as_str(), r.id.as_str());
    }

    let mut index = RecordIndex::default();
    for r in records {
        index.insert(r);
    }
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "network built"
    );
    Ok(Network { graph, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, parent: &str, level: i64) -> Record {
        Record::new(id, parent, id.to_lowercase(), 1.0, level)
    }

    #[test]
    fn edges_follow_parent_links() {
        let net = build_network(vec![
            rec("A", "", 0),
            rec("B", "A", 1),
            rec("C", "A", 1),
            rec("D", "B", 2),
        ])
        .unwrap();

        assert_eq!(net.graph.node_ids(), vec!["A", "B", "C", "D"]);
        assert_eq!(net.edge_count(), 3);
        assert!(net.graph.has_edge("A", "B"));
        assert!(net.graph.has_edge("C", "A"));
        assert!(net.graph.has_edge("B", "D"));
        assert_eq!(net.record("D").map(|r| r.level), Some(2));
    }

    #[test]
    fn same_rows_build_the_same_network() {
        let rows = vec![
            rec("A", "", 0),
            rec("B", "A", 1),
            rec("C", "A", 1),
            rec("D", "B", 2),
        ];
        let first = build_network(rows.clone()).unwrap();
        let second = build_network(rows).unwrap();

        assert_eq!(first.graph.node_ids(), second.graph.node_ids());
        let edges = |net: &Network| net.graph.edges().cloned().collect::<Vec<_>>();
        assert_eq!(edges(&first), edges(&second));
    }

    #[test]
    fn first_row_parent_is_ignored() {
        let net = build_network(vec![rec("A", "Z", 0), rec("B", "A", 1)]).unwrap();
        assert_eq!(net.edge_count(), 1);
        assert!(!net.graph.has_node("Z"));
    }

    #[test]
    fn later_blank_parent_is_an_extra_root() {
        let net = build_network(vec![rec("A", "", 0), rec("B", "", 0), rec("C", "B", 1)]).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 1);
        assert!(!net.graph.has_node(""));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = build_network(vec![rec("A", "", 0), rec("B", "A", 1), rec("B", "A", 1)])
            .unwrap_err();
        assert_eq!(
            err,
            GraphBuildError::DuplicateId {
                id: "B".to_string(),
                first_row: 3,
                row: 4,
            }
        );
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let err = build_network(vec![rec("A", "", 0), rec("B", "Q", 1)]).unwrap_err();
        assert!(matches!(err, GraphBuildError::UnknownParent { row: 3, .. }));
    }

    #[test]
    fn self_parent_is_rejected() {
        let err = build_network(vec![rec("A", "", 0), rec("B", "B", 1)]).unwrap_err();
        assert_eq!(
            err,
            GraphBuildError::SelfParent {
                id: "B".to_string(),
                row: 3,
            }
        );
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(build_network(Vec::new()).unwrap_err(), GraphBuildError::Empty);
    }
}
