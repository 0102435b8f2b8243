//! Shared helpers for steptrace commands

use std::fs;

use crate::cli::{AlgorithmChoice, GraphArgs};
use steptrace_core::error::{Result, TraceError};
use steptrace_core::graph::{Graph, GraphSpec};
use steptrace_core::trace::{bounded_trace, dijkstra_trace, TraceRun};

/// Load and validate the graph description named by the command line
pub fn load_graph(args: &GraphArgs) -> Result<Graph> {
    let raw = fs::read_to_string(&args.graph)?;
    let spec: GraphSpec = serde_json::from_str(&raw)?;
    let graph = Graph::from_spec(spec)?;
    require_node(&graph, "source", &args.source)?;
    Ok(graph)
}

pub fn require_node(graph: &Graph, context: &str, id: &str) -> Result<()> {
    if graph.contains(id) {
        Ok(())
    } else {
        Err(TraceError::UnknownNode {
            context: context.to_string(),
            id: id.to_string(),
        })
    }
}

/// Run the selected tracer(s), classical first when both are requested
pub fn run_algorithms(
    graph: &Graph,
    source: &str,
    choice: AlgorithmChoice,
) -> Result<Vec<TraceRun>> {
    match choice {
        AlgorithmChoice::Dijkstra => Ok(vec![dijkstra_trace(graph, source)]),
        AlgorithmChoice::Bounded => Ok(vec![bounded_trace(graph, source)?]),
        AlgorithmChoice::Both => Ok(vec![
            dijkstra_trace(graph, source),
            bounded_trace(graph, source)?,
        ]),
    }
}
