//! Working state and relaxation helpers shared by both tracers
//!
//! Each run owns a fresh `TracerState`; snapshots are deep copies frozen at
//! emission time, never aliases of the live collections.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Graph;
use crate::trace::types::{Algorithm, Dist, RelaxationEvent, Snapshot, SnapshotDetail, TraceRun};

/// Min-heap entry for the extraction working set.
///
/// Ties between equal distances are broken by the insertion sequence number,
/// so extraction order is deterministic: first pushed, first extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeapEntry {
    pub node: String,
    pub dist: Dist,
    pub seq: u64,
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist.cmp(&other.dist).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Outcome of a single edge relaxation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelaxOutcome {
    /// Distance improved; the target belongs in the local working set
    Improved,
    /// Distance improved but the candidate is not below the current bound;
    /// the target stays in the frontier for a later round
    Deferred,
    /// No improvement
    Unimproved,
}

/// Mutable per-run state shared by both tracers
pub(crate) struct TracerState {
    pub dist: BTreeMap<String, Dist>,
    pub pred: BTreeMap<String, String>,
    pub settled: BTreeSet<String>,
    pub frontier: BTreeSet<String>,
    snapshots: Vec<Snapshot>,
}

impl TracerState {
    pub fn new(graph: &Graph, source: &str) -> Self {
        let mut dist: BTreeMap<String, Dist> = graph
            .nodes()
            .iter()
            .map(|node| (node.clone(), Dist::Infinite))
            .collect();
        dist.insert(source.to_string(), Dist::ZERO);

        let mut frontier = BTreeSet::new();
        frontier.insert(source.to_string());

        Self {
            dist,
            pred: BTreeMap::new(),
            settled: BTreeSet::new(),
            frontier,
            snapshots: Vec::new(),
        }
    }

    pub fn distance(&self, id: &str) -> Dist {
        self.dist.get(id).copied().unwrap_or(Dist::Infinite)
    }

    /// Mark a node's distance final and drop it from the frontier
    pub fn settle(&mut self, node: &str) {
        self.settled.insert(node.to_string());
        self.frontier.remove(node);
    }

    /// Freeze the current state into a new snapshot
    pub fn emit(
        &mut self,
        description: impl Into<String>,
        current: Option<&str>,
        relaxation: Option<RelaxationEvent>,
        detail: SnapshotDetail,
    ) {
        let step = self.snapshots.len();
        self.snapshots.push(Snapshot {
            step,
            description: description.into(),
            current: current.map(ToString::to_string),
            settled: self.settled.clone(),
            frontier: self.frontier.clone(),
            dist: self.dist.clone(),
            pred: self.pred.clone(),
            relaxation,
            detail,
        });
    }

    pub fn finish(self, algorithm: Algorithm, source: &str) -> TraceRun {
        TraceRun {
            algorithm,
            source: source.to_string(),
            snapshots: self.snapshots,
            dist: self.dist,
            pred: self.pred,
        }
    }
}

/// Examine one edge and apply its improvement, if any.
///
/// A candidate below the stored distance always updates the distance and
/// predecessor maps and keeps the target in the frontier; only candidates
/// also below `bound` report `Improved` and belong in the caller's working
/// set. Settled targets are never re-improved.
pub(crate) fn relax(
    state: &mut TracerState,
    from: &str,
    to: &str,
    weight: u64,
    bound: Dist,
) -> RelaxOutcome {
    let candidate = state.distance(from).saturating_add(weight);
    if state.settled.contains(to) || candidate >= state.distance(to) {
        return RelaxOutcome::Unimproved;
    }

    state.dist.insert(to.to_string(), candidate);
    state.pred.insert(to.to_string(), from.to_string());
    state.frontier.insert(to.to_string());

    if candidate < bound {
        RelaxOutcome::Improved
    } else {
        RelaxOutcome::Deferred
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::graph::{EdgeSpec, GraphSpec};

    pub fn graph(nodes: &[&str], edges: &[(&str, &str, u64)]) -> Graph {
        Graph::from_spec(GraphSpec {
            nodes: nodes.iter().map(ToString::to_string).collect(),
            edges: edges
                .iter()
                .map(|(from, to, weight)| EdgeSpec {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight: *weight,
                })
                .collect(),
        })
        .unwrap()
    }

    /// Assert the snapshot-sequence properties every run must satisfy:
    /// contiguous zero-based steps, monotone settled sets, per-node
    /// non-increasing distances, and acyclic final predecessor chains with
    /// strictly decreasing distances back to the source.
    pub fn assert_trace_invariants(run: &TraceRun) {
        for (index, snapshot) in run.snapshots.iter().enumerate() {
            assert_eq!(snapshot.step, index, "step indices must be contiguous");
        }

        for pair in run.snapshots.windows(2) {
            assert!(
                pair[0].settled.is_subset(&pair[1].settled),
                "settled set shrank between steps {} and {}",
                pair[0].step,
                pair[1].step
            );
            for (node, later) in &pair[1].dist {
                let earlier = pair[0].dist.get(node).copied().unwrap_or(Dist::Infinite);
                assert!(
                    *later <= earlier,
                    "distance of {} increased between steps {} and {}",
                    node,
                    pair[0].step,
                    pair[1].step
                );
            }
        }

        for (node, dist) in &run.dist {
            if !dist.is_finite() || node == &run.source {
                continue;
            }
            let mut current = node.clone();
            let mut hops = 0;
            while current != run.source {
                let parent = run
                    .pred
                    .get(&current)
                    .unwrap_or_else(|| panic!("missing predecessor for {}", current));
                assert!(
                    run.dist[parent] < run.dist[&current],
                    "predecessor chain of {} is not strictly decreasing",
                    node
                );
                current = parent.clone();
                hops += 1;
                assert!(
                    hops <= run.dist.len(),
                    "predecessor chain of {} does not terminate",
                    node
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testutil::graph;

    #[test]
    fn test_heap_entry_tie_break_by_insertion_order() {
        let first = HeapEntry {
            node: "a".to_string(),
            dist: Dist::Finite(1),
            seq: 1,
        };
        let second = HeapEntry {
            node: "b".to_string(),
            dist: Dist::Finite(1),
            seq: 2,
        };
        assert!(first < second);
        assert!(first < HeapEntry {
            node: "c".to_string(),
            dist: Dist::Finite(2),
            seq: 0,
        });
    }

    #[test]
    fn test_relax_improves_and_records_predecessor() {
        let graph = graph(&["a", "b"], &[("a", "b", 3)]);
        let mut state = TracerState::new(&graph, "a");
        let outcome = relax(&mut state, "a", "b", 3, Dist::Infinite);
        assert_eq!(outcome, RelaxOutcome::Improved);
        assert_eq!(state.distance("b"), Dist::Finite(3));
        assert_eq!(state.pred.get("b"), Some(&"a".to_string()));
        assert!(state.frontier.contains("b"));
    }

    #[test]
    fn test_relax_defers_beyond_bound_but_still_updates() {
        let graph = graph(&["a", "b"], &[("a", "b", 3)]);
        let mut state = TracerState::new(&graph, "a");
        let outcome = relax(&mut state, "a", "b", 3, Dist::Finite(2));
        assert_eq!(outcome, RelaxOutcome::Deferred);
        assert_eq!(state.distance("b"), Dist::Finite(3));
        assert!(state.frontier.contains("b"));
    }

    #[test]
    fn test_relax_never_improves_settled_target() {
        let graph = graph(&["a", "b"], &[("a", "b", 3)]);
        let mut state = TracerState::new(&graph, "a");
        state.dist.insert("b".to_string(), Dist::Finite(10));
        state.settle("b");
        let outcome = relax(&mut state, "a", "b", 3, Dist::Infinite);
        assert_eq!(outcome, RelaxOutcome::Unimproved);
        assert_eq!(state.distance("b"), Dist::Finite(10));
    }

    #[test]
    fn test_emitted_snapshots_are_independent_copies() {
        let graph = graph(&["a", "b"], &[("a", "b", 1)]);
        let mut state = TracerState::new(&graph, "a");
        state.emit("initial state", None, None, SnapshotDetail::Classical);
        relax(&mut state, "a", "b", 1, Dist::Infinite);
        state.settle("a");

        let run = state.finish(Algorithm::Dijkstra, "a");
        let snapshot = &run.snapshots[0];
        assert_eq!(snapshot.dist["b"], Dist::Infinite);
        assert!(snapshot.settled.is_empty());
        assert!(snapshot.pred.is_empty());
    }
}
