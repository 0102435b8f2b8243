//! Weighted directed graph model
//!
//! The graph is built once from an external description and owned read-only
//! by both tracers. Self-loop edges are dropped at construction; parallel
//! edges between the same ordered pair are preserved and relaxed
//! independently; edges referencing a node id absent from the node list are
//! tolerated (the missing endpoint is simply never expanded).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};

/// A directed weighted edge as supplied by an external graph description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

/// External graph description, the shape accepted at the CLI boundary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub nodes: Vec<String>,
    pub edges: Vec<EdgeSpec>,
}

/// Immutable weighted directed graph with adjacency lookup
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<String>,
    adjacency: HashMap<String, Vec<(String, u64)>>,
}

impl Graph {
    /// Build a graph from an external description, preserving supplied node
    /// and edge order. Self-loops are dropped; zero weights are rejected.
    pub fn from_spec(spec: GraphSpec) -> Result<Self> {
        let mut adjacency: HashMap<String, Vec<(String, u64)>> = HashMap::new();
        for edge in &spec.edges {
            if edge.weight == 0 {
                return Err(TraceError::InvalidWeight {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    weight: edge.weight,
                });
            }
            if edge.from == edge.to {
                continue;
            }
            adjacency
                .entry(edge.from.clone())
                .or_default()
                .push((edge.to.clone(), edge.weight));
        }

        Ok(Self {
            nodes: spec.nodes,
            adjacency,
        })
    }

    /// Node ids in supplied order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node == id)
    }

    /// Outgoing `(target, weight)` pairs in the order supplied
    pub fn outgoing(&self, id: &str) -> &[(String, u64)] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(nodes: &[&str], edges: &[(&str, &str, u64)]) -> GraphSpec {
        GraphSpec {
            nodes: nodes.iter().map(ToString::to_string).collect(),
            edges: edges
                .iter()
                .map(|(from, to, weight)| EdgeSpec {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    #[test]
    fn test_adjacency_preserves_supplied_order() {
        let graph =
            Graph::from_spec(spec(&["a", "b", "c"], &[("a", "c", 4), ("a", "b", 1)])).unwrap();
        assert_eq!(
            graph.outgoing("a"),
            &[("c".to_string(), 4), ("b".to_string(), 1)]
        );
    }

    #[test]
    fn test_parallel_edges_preserved() {
        let graph = Graph::from_spec(spec(&["a", "b"], &[("a", "b", 5), ("a", "b", 2)])).unwrap();
        assert_eq!(graph.outgoing("a").len(), 2);
    }

    #[test]
    fn test_self_loop_dropped() {
        let graph = Graph::from_spec(spec(&["a", "b"], &[("a", "a", 1), ("a", "b", 1)])).unwrap();
        assert_eq!(graph.outgoing("a"), &[("b".to_string(), 1)]);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let err = Graph::from_spec(spec(&["a", "b"], &[("a", "b", 0)])).unwrap_err();
        assert!(matches!(err, TraceError::InvalidWeight { weight: 0, .. }));
    }

    #[test]
    fn test_unknown_edge_endpoint_tolerated() {
        let graph = Graph::from_spec(spec(&["a"], &[("a", "ghost", 1)])).unwrap();
        assert_eq!(graph.outgoing("a").len(), 1);
        assert!(graph.outgoing("ghost").is_empty());
        assert!(!graph.contains("ghost"));
    }

    #[test]
    fn test_node_without_edges_has_empty_adjacency() {
        let graph = Graph::from_spec(spec(&["a", "b"], &[])).unwrap();
        assert!(graph.outgoing("a").is_empty());
        assert!(graph.contains("b"));
        assert_eq!(graph.node_count(), 2);
    }
}
