//! Shortest-path reconstruction from predecessor maps
//!
//! Pure functions over a snapshot's predecessor map; no state survives a
//! call. Mid-run predecessor maps may be incomplete or, under pathological
//! relaxation orders, cyclic; the walk truncates instead of looping.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::trace::types::Snapshot;

/// The edge pairs and nodes on one reconstructed path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathView {
    /// Directed `(parent, child)` pairs on the path
    pub pairs: BTreeSet<(String, String)>,
    /// Nodes on the path
    pub nodes: BTreeSet<String>,
}

impl PathView {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Reconstruct the path to `target` implied by one snapshot.
///
/// Empty when the target's distance is infinite at that snapshot (no path
/// exists yet); otherwise walks the snapshot's predecessor map.
pub fn reconstruct_path(snapshot: &Snapshot, source: &str, target: &str) -> PathView {
    match snapshot.dist.get(target) {
        Some(dist) if dist.is_finite() => walk_predecessors(&snapshot.pred, source, target),
        _ => PathView::default(),
    }
}

/// Walk predecessor links backward from `target` until the source, a node
/// without a predecessor, or a repeated node (cycle guard: the partial walk
/// discovered so far is returned).
pub fn walk_predecessors(
    pred: &BTreeMap<String, String>,
    source: &str,
    target: &str,
) -> PathView {
    let mut view = PathView::default();
    let mut visited = BTreeSet::new();
    let mut current = target.to_string();
    view.nodes.insert(current.clone());

    while current != source {
        if !visited.insert(current.clone()) {
            break; // cycle
        }
        let Some(parent) = pred.get(&current) else {
            break;
        };
        view.pairs.insert((parent.clone(), current.clone()));
        view.nodes.insert(parent.clone());
        current = parent.clone();
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::dijkstra_trace;
    use crate::trace::shared::testutil::graph;

    fn pairs(raw: &[(&str, &str)]) -> BTreeSet<(String, String)> {
        raw.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn nodes(raw: &[&str]) -> BTreeSet<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_final_snapshot_path() {
        let graph = graph(&["0", "1", "2"], &[("0", "1", 1), ("0", "2", 4), ("1", "2", 1)]);
        let run = dijkstra_trace(&graph, "0");
        let view = reconstruct_path(run.snapshots.last().unwrap(), "0", "2");

        assert_eq!(view.pairs, pairs(&[("0", "1"), ("1", "2")]));
        assert_eq!(view.nodes, nodes(&["0", "1", "2"]));
    }

    #[test]
    fn test_mid_run_snapshot_reflects_stale_predecessor() {
        let graph = graph(&["0", "1", "2"], &[("0", "1", 1), ("0", "2", 4), ("1", "2", 1)]);
        let run = dijkstra_trace(&graph, "0");

        // at step 3 node 2 was reached directly from 0 with distance 4
        let view = reconstruct_path(&run.snapshots[3], "0", "2");
        assert_eq!(view.pairs, pairs(&[("0", "2")]));
        assert_eq!(view.nodes, nodes(&["0", "2"]));
    }

    #[test]
    fn test_unreachable_target_yields_empty_sets() {
        let graph = graph(&["0", "1", "3"], &[("0", "1", 1)]);
        let run = dijkstra_trace(&graph, "0");
        let view = reconstruct_path(run.snapshots.last().unwrap(), "0", "3");
        assert!(view.is_empty());
        assert!(view.pairs.is_empty());
    }

    #[test]
    fn test_target_equals_source() {
        let graph = graph(&["0", "1"], &[("0", "1", 1)]);
        let run = dijkstra_trace(&graph, "0");
        let view = reconstruct_path(run.snapshots.last().unwrap(), "0", "0");
        assert_eq!(view.nodes, nodes(&["0"]));
        assert!(view.pairs.is_empty());
    }

    #[test]
    fn test_cycle_guard_truncates() {
        let mut pred_map = BTreeMap::new();
        pred_map.insert("a".to_string(), "b".to_string());
        pred_map.insert("b".to_string(), "a".to_string());

        let view = walk_predecessors(&pred_map, "s", "a");
        assert_eq!(view.nodes, nodes(&["a", "b"]));
        assert_eq!(view.pairs, pairs(&[("a", "b"), ("b", "a")]));
    }

    #[test]
    fn test_reconstruction_is_idempotent() {
        let graph = graph(&["0", "1", "2"], &[("0", "1", 1), ("0", "2", 4), ("1", "2", 1)]);
        let run = dijkstra_trace(&graph, "0");
        let snapshot = run.snapshots.last().unwrap();
        assert_eq!(
            reconstruct_path(snapshot, "0", "2"),
            reconstruct_path(snapshot, "0", "2")
        );
    }
}
