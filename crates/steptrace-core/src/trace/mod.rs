//! Trace-generating shortest-path engines
//!
//! Contains the two tracer implementations and their shared machinery:
//! - `dijkstra`: classical extract-min/relax tracer
//! - `bounded`: bounded multi-level frontier-expansion tracer
//! - `shared`: working state and relaxation helpers used by both
//! - `types`: snapshot model and run output

pub mod bounded;
pub mod dijkstra;
pub(crate) mod shared;
pub mod types;

pub use bounded::bounded_trace;
pub use dijkstra::dijkstra_trace;
pub use types::{
    Algorithm, BoundedDetail, BoundedParams, Dist, RelaxationEvent, Snapshot, SnapshotDetail,
    TraceRun,
};
