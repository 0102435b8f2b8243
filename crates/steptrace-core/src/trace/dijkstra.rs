//! Classical priority-based shortest-path tracer
//!
//! Runs the textbook extract-min/relax loop over a binary min-heap and
//! emits one snapshot per extraction and per relaxation attempt. Stale heap
//! entries for already-settled nodes are discarded without a snapshot.
//! Ties between equal distances are broken by insertion order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::Graph;
use crate::trace::shared::{relax, HeapEntry, RelaxOutcome, TracerState};
use crate::trace::types::{Algorithm, Dist, RelaxationEvent, SnapshotDetail, TraceRun};

/// Trace a full run of the classical tracer.
///
/// Total: unreachable nodes keep an infinite distance and no predecessor; a
/// source id absent from the node set yields a trivial two-step trace.
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn dijkstra_trace(graph: &Graph, source: &str) -> TraceRun {
    let mut state = TracerState::new(graph, source);
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    heap.push(Reverse(HeapEntry {
        node: source.to_string(),
        dist: Dist::ZERO,
        seq,
    }));

    state.emit("initial state", None, None, SnapshotDetail::Classical);

    while let Some(Reverse(entry)) = heap.pop() {
        if state.settled.contains(&entry.node) {
            continue; // stale entry
        }
        state.settle(&entry.node);
        state.emit(
            format!("extract {}", entry.node),
            Some(&entry.node),
            None,
            SnapshotDetail::Classical,
        );

        for (target, weight) in graph.outgoing(&entry.node) {
            let outcome = relax(&mut state, &entry.node, target, *weight, Dist::Infinite);
            let improved = outcome == RelaxOutcome::Improved;
            if improved {
                seq += 1;
                heap.push(Reverse(HeapEntry {
                    node: target.clone(),
                    dist: state.distance(target),
                    seq,
                }));
            }

            let description = if improved {
                format!("relax {} -> {}: improved", entry.node, target)
            } else {
                format!("relax {} -> {}: no improvement", entry.node, target)
            };
            state.emit(
                description,
                Some(&entry.node),
                Some(RelaxationEvent {
                    from: entry.node.clone(),
                    to: target.clone(),
                    weight: *weight,
                    improved,
                }),
                SnapshotDetail::Classical,
            );
        }
    }

    tracing::debug!(settled = state.settled.len(), "dijkstra_done");
    state.finish(Algorithm::Dijkstra, source)
}
