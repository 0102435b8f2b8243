//! Snapshot model and run output types
//!
//! Snapshots are immutable, fully self-contained copies of tracer state at
//! one discrete step. Later engine mutation never changes an emitted
//! snapshot, which is what makes a trace safe to scrub through after the
//! run completes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// A tentative shortest-path distance. `Infinite` means "not yet reached".
///
/// Ordering places every finite distance below `Infinite`, so the variant
/// works directly as a priority key and as a relaxation bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "Option<u64>", from = "Option<u64>")]
pub enum Dist {
    Finite(u64),
    Infinite,
}

impl Dist {
    pub const ZERO: Dist = Dist::Finite(0);

    pub fn is_finite(self) -> bool {
        matches!(self, Dist::Finite(_))
    }

    /// Distance after traversing one more edge of the given weight
    pub fn saturating_add(self, weight: u64) -> Dist {
        match self {
            Dist::Finite(value) => Dist::Finite(value.saturating_add(weight)),
            Dist::Infinite => Dist::Infinite,
        }
    }
}

impl From<Dist> for Option<u64> {
    fn from(dist: Dist) -> Self {
        match dist {
            Dist::Finite(value) => Some(value),
            Dist::Infinite => None,
        }
    }
}

impl From<Option<u64>> for Dist {
    fn from(value: Option<u64>) -> Self {
        match value {
            Some(value) => Dist::Finite(value),
            None => Dist::Infinite,
        }
    }
}

impl fmt::Display for Dist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dist::Finite(value) => write!(f, "{}", value),
            Dist::Infinite => write!(f, "inf"),
        }
    }
}

/// Which tracer produced a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dijkstra,
    Bounded,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => write!(f, "dijkstra"),
            Algorithm::Bounded => write!(f, "bounded"),
        }
    }
}

/// The most recent edge examination, recorded on relaxation snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaxationEvent {
    pub from: String,
    pub to: String,
    pub weight: u64,
    pub improved: bool,
}

/// Extra state carried only by bounded-tracer snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedDetail {
    /// Active subset `S`: the frontier being processed this round
    pub active: BTreeSet<String>,
    /// Pivot subset `P`: the smallest-distance members of `S` seeding the round
    pub pivots: BTreeSet<String>,
    /// Extraction batch `U`: nodes settled so far this round
    pub batch: BTreeSet<String>,
    /// Current recursion level
    pub level: u32,
    /// Round counter (1-based; 0 before the first round)
    pub round: u32,
    /// Current distance bound `B`
    pub bound: Dist,
    /// Tentative next bound `B'`
    pub next_bound: Dist,
}

/// Discriminated per-tracer snapshot payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "lowercase")]
pub enum SnapshotDetail {
    Classical,
    Bounded(BoundedDetail),
}

/// One immutable record of all tracer state at a discrete step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Zero-based, contiguous step index
    pub step: usize,
    /// Human-readable description of the transition that produced this step
    pub description: String,
    /// The vertex being processed, if any
    pub current: Option<String>,
    pub settled: BTreeSet<String>,
    pub frontier: BTreeSet<String>,
    pub dist: BTreeMap<String, Dist>,
    pub pred: BTreeMap<String, String>,
    pub relaxation: Option<RelaxationEvent>,
    pub detail: SnapshotDetail,
}

/// Complete output of one tracer run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRun {
    pub algorithm: Algorithm,
    pub source: String,
    pub snapshots: Vec<Snapshot>,
    /// Final distance map
    pub dist: BTreeMap<String, Dist>,
    /// Final predecessor map
    pub pred: BTreeMap<String, String>,
}

/// Bounded-tracer parameters, derived once per run from the node count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedParams {
    /// Branching factor: per-round settle cap and pivot divisor
    pub k: usize,
    /// Batch size factor feeding the level count
    pub t: usize,
    /// Initial recursion level
    pub levels: u32,
}

impl BoundedParams {
    /// `k = max(2, floor(log2(max(4,n))^(1/3)))`,
    /// `t = max(2, floor(log2(max(4,n))^(2/3)))`,
    /// `levels = max(1, ceil(log2(n) / t))`
    pub fn for_node_count(n: usize) -> Self {
        let lg = (n.max(4) as f64).log2();
        let k = (lg.cbrt().floor() as usize).max(2);
        let t = (lg.powf(2.0 / 3.0).floor() as usize).max(2);
        let levels_raw = if n > 1 {
            ((n as f64).log2() / t as f64).ceil()
        } else {
            0.0
        };
        let levels = if levels_raw >= 1.0 {
            levels_raw as u32
        } else {
            1
        };

        Self { k, t, levels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_ordering() {
        assert!(Dist::Finite(3) < Dist::Finite(4));
        assert!(Dist::Finite(u64::MAX) < Dist::Infinite);
        assert_eq!(Dist::ZERO, Dist::Finite(0));
    }

    #[test]
    fn test_dist_saturating_add() {
        assert_eq!(Dist::Finite(2).saturating_add(3), Dist::Finite(5));
        assert_eq!(Dist::Infinite.saturating_add(3), Dist::Infinite);
        assert_eq!(
            Dist::Finite(u64::MAX).saturating_add(1),
            Dist::Finite(u64::MAX)
        );
    }

    #[test]
    fn test_dist_serializes_infinity_as_null() {
        assert_eq!(serde_json::to_string(&Dist::Finite(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Dist::Infinite).unwrap(), "null");
        assert_eq!(
            serde_json::from_str::<Dist>("null").unwrap(),
            Dist::Infinite
        );
    }

    #[test]
    fn test_detail_serializes_with_discriminant() {
        let json = serde_json::to_value(&SnapshotDetail::Classical).unwrap();
        assert_eq!(json["variant"], "classical");
    }

    #[test]
    fn test_params_small_graph() {
        let params = BoundedParams::for_node_count(3);
        assert_eq!(params, BoundedParams { k: 2, t: 2, levels: 1 });
    }

    #[test]
    fn test_params_medium_graph() {
        let params = BoundedParams::for_node_count(10);
        assert_eq!(params, BoundedParams { k: 2, t: 2, levels: 2 });

        let params = BoundedParams::for_node_count(64);
        assert_eq!(params, BoundedParams { k: 2, t: 3, levels: 2 });
    }

    #[test]
    fn test_params_degenerate_node_counts() {
        for n in [0, 1, 2] {
            let params = BoundedParams::for_node_count(n);
            assert!(params.k >= 2);
            assert!(params.t >= 2);
            assert!(params.levels >= 1);
        }
    }
}
