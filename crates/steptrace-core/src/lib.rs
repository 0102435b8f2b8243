//! Steptrace Core Library
//!
//! Trace-generating shortest-path engine: two single-source-shortest-path
//! algorithms run over the same weighted directed graph and emit a
//! replayable sequence of immutable snapshots alongside their final
//! distance and predecessor maps.

pub mod error;
pub mod format;
pub mod graph;
pub mod logging;
pub mod path;
pub mod trace;
