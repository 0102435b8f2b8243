//! Bounded multi-level frontier-expansion shortest-path tracer
//!
//! Works in rounds over the frontier instead of a single global queue. Each
//! round selects the smallest-distance frontier members as pivots, settles
//! at most `k` nodes from a local working set seeded with those pivots, and
//! then either tightens the distance bound `B` (more work remains at this
//! level) or resets it and descends a level. Improvements whose candidate
//! distance is not below `B` still update the distance and predecessor maps
//! but stay in the frontier for a later round; dropping them entirely would
//! let final distances diverge from the classical tracer.
//!
//! Settlement inside a round is gated twice: an extracted node whose current
//! distance is not below `B`, or above the cheapest frontier node with no
//! live working-set entry, is only locally final and must wait. The round
//! ends there and a later round re-pivots it. Either gate alone is too weak:
//! the working set is seeded with pivots only, so a shorter path can run
//! through a frontier node the heap never saw.
//!
//! Final distance and predecessor content is identical to `dijkstra_trace`
//! for every graph and source; only the snapshot shape differs.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::error::{Result, TraceError};
use crate::graph::Graph;
use crate::trace::shared::{relax, HeapEntry, RelaxOutcome, TracerState};
use crate::trace::types::{
    Algorithm, BoundedDetail, BoundedParams, Dist, RelaxationEvent, SnapshotDetail, TraceRun,
};

/// Trace a full run of the bounded tracer.
///
/// Fails only on an internal progress stall (an unbounded round that settles
/// nothing, tightens nothing, and has no level left to descend).
#[tracing::instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn bounded_trace(graph: &Graph, source: &str) -> Result<TraceRun> {
    let params = BoundedParams::for_node_count(graph.node_count());
    tracing::debug!(k = params.k, t = params.t, levels = params.levels, "bounded_params");

    let mut tracer = BoundedTracer {
        graph,
        state: TracerState::new(graph, source),
        params,
        bound: Dist::Infinite,
        level: params.levels,
        round: 0,
        seq: 0,
    };

    let detail = tracer.detail(
        &BTreeSet::new(),
        &BTreeSet::new(),
        &BTreeSet::new(),
        Dist::Infinite,
    );
    tracer.state.emit("initial state", None, None, detail);

    while !tracer.state.frontier.is_empty() {
        tracer.run_round()?;
    }

    Ok(tracer.state.finish(Algorithm::Bounded, source))
}

struct BoundedTracer<'a> {
    graph: &'a Graph,
    state: TracerState,
    params: BoundedParams,
    bound: Dist,
    level: u32,
    round: u32,
    seq: u64,
}

impl BoundedTracer<'_> {
    fn detail(
        &self,
        active: &BTreeSet<String>,
        pivots: &BTreeSet<String>,
        batch: &BTreeSet<String>,
        next_bound: Dist,
    ) -> SnapshotDetail {
        SnapshotDetail::Bounded(BoundedDetail {
            active: active.clone(),
            pivots: pivots.clone(),
            batch: batch.clone(),
            level: self.level,
            round: self.round,
            bound: self.bound,
            next_bound,
        })
    }

    /// The smallest `ceil(|S|/k)` frontier members by distance, ties by id
    fn select_pivots(&self, active: &BTreeSet<String>) -> BTreeSet<String> {
        let mut ordered: Vec<&String> = active.iter().collect();
        ordered.sort_by_key(|node| self.state.distance(node));
        let take = active.len().div_ceil(self.params.k).max(1);
        ordered.into_iter().take(take).cloned().collect()
    }

    fn run_round(&mut self) -> Result<()> {
        self.round += 1;
        let active = self.state.frontier.clone();
        let pivots = self.select_pivots(&active);

        let detail = self.detail(&active, &pivots, &BTreeSet::new(), self.bound);
        self.state.emit(
            format!("round {}: pivot selection", self.round),
            None,
            None,
            detail,
        );

        let mut heap = BinaryHeap::new();
        for pivot in &pivots {
            self.seq += 1;
            heap.push(Reverse(HeapEntry {
                node: pivot.clone(),
                dist: self.state.distance(pivot),
                seq: self.seq,
            }));
        }

        let settled_before = self.state.settled.len();
        let batch = self.extract_batch(&active, &pivots, &mut heap);
        let settled_this_round = self.state.settled.len() - settled_before;

        let next_bound = match heap.peek() {
            Some(Reverse(top)) if batch.len() >= self.params.k => top.dist,
            _ => self.bound,
        };
        let detail = self.detail(&active, &pivots, &batch, next_bound);
        self.state.emit(
            format!("round {}: end of round", self.round),
            None,
            None,
            detail,
        );
        tracing::debug!(
            round = self.round,
            level = self.level,
            bound = %self.bound,
            next_bound = %next_bound,
            settled = settled_this_round,
            "end_of_round"
        );

        if next_bound < self.bound {
            self.bound = next_bound;
        } else if self.level > 0 {
            self.bound = Dist::Infinite;
            self.level -= 1;
        } else if settled_this_round == 0 && !self.bound.is_finite() {
            return Err(TraceError::StalledRound {
                round: self.round,
                level: self.level,
                bound: self.bound.to_string(),
            });
        } else {
            self.bound = Dist::Infinite;
        }

        Ok(())
    }

    /// Settle up to `k` nodes from the local working set, relaxing each
    /// extracted node's outgoing edges under the current bound.
    ///
    /// A popped node is settled only while its distance is below the bound
    /// and no cheaper frontier node sits outside the working set; the first
    /// node failing either test ends the batch and stays in the frontier.
    fn extract_batch(
        &mut self,
        active: &BTreeSet<String>,
        pivots: &BTreeSet<String>,
        heap: &mut BinaryHeap<Reverse<HeapEntry>>,
    ) -> BTreeSet<String> {
        let mut queued = pivots.clone();
        let mut batch = BTreeSet::new();
        while batch.len() < self.params.k {
            let Some(Reverse(entry)) = heap.pop() else {
                break;
            };
            if self.state.settled.contains(&entry.node) {
                continue; // stale entry
            }
            queued.remove(&entry.node);
            let dist = self.state.distance(&entry.node);
            if dist >= self.bound || dist > self.frontier_floor(&queued) {
                break;
            }
            self.state.settle(&entry.node);
            batch.insert(entry.node.clone());
            let detail = self.detail(active, pivots, &batch, self.bound);
            self.state.emit(
                format!("extract {}", entry.node),
                Some(&entry.node),
                None,
                detail,
            );

            self.relax_edges(&entry.node, active, pivots, &batch, heap, &mut queued);
        }
        batch
    }

    /// Smallest distance among frontier nodes with no live working-set entry.
    /// Settling past this value could skip a shorter path through one of them.
    fn frontier_floor(&self, queued: &BTreeSet<String>) -> Dist {
        self.state
            .frontier
            .iter()
            .filter(|node| !queued.contains(*node))
            .map(|node| self.state.distance(node))
            .min()
            .unwrap_or(Dist::Infinite)
    }

    fn relax_edges(
        &mut self,
        from: &str,
        active: &BTreeSet<String>,
        pivots: &BTreeSet<String>,
        batch: &BTreeSet<String>,
        heap: &mut BinaryHeap<Reverse<HeapEntry>>,
        queued: &mut BTreeSet<String>,
    ) {
        let graph = self.graph;
        for (target, weight) in graph.outgoing(from) {
            let outcome = relax(&mut self.state, from, target, *weight, self.bound);
            let (improved, description) = match outcome {
                RelaxOutcome::Improved => {
                    self.seq += 1;
                    heap.push(Reverse(HeapEntry {
                        node: target.clone(),
                        dist: self.state.distance(target),
                        seq: self.seq,
                    }));
                    queued.insert(target.clone());
                    (true, format!("relax {} -> {}: improved", from, target))
                }
                RelaxOutcome::Deferred => (
                    true,
                    format!("relax {} -> {}: improved (deferred beyond bound)", from, target),
                ),
                RelaxOutcome::Unimproved => {
                    (false, format!("relax {} -> {}: no improvement", from, target))
                }
            };

            let detail = self.detail(active, pivots, batch, self.bound);
            self.state.emit(
                description,
                Some(from),
                Some(RelaxationEvent {
                    from: from.to_string(),
                    to: target.clone(),
                    weight: *weight,
                    improved,
                }),
                detail,
            );
        }
    }
}
