//! `steptrace path` - reconstruct the shortest path implied by one snapshot

use serde::Serialize;

use crate::cli::{AlgorithmChoice, Cli, GraphArgs, OutputFormat};
use crate::commands::helpers;
use steptrace_core::error::{Result, TraceError};
use steptrace_core::path::{reconstruct_path, PathView};
use steptrace_core::trace::{bounded_trace, dijkstra_trace, Algorithm};

#[derive(Debug, Serialize)]
struct PathReport {
    algorithm: Algorithm,
    step: usize,
    source: String,
    target: String,
    #[serde(flatten)]
    view: PathView,
}

pub fn execute(
    cli: &Cli,
    args: &GraphArgs,
    target: &str,
    algorithm: AlgorithmChoice,
    step: Option<usize>,
) -> Result<()> {
    let graph = helpers::load_graph(args)?;
    helpers::require_node(&graph, "target", target)?;

    let run = match algorithm {
        AlgorithmChoice::Both => {
            return Err(TraceError::UsageError(
                "--algorithm both is not valid for path; pick dijkstra or bounded".to_string(),
            ));
        }
        AlgorithmChoice::Dijkstra => dijkstra_trace(&graph, &args.source),
        AlgorithmChoice::Bounded => bounded_trace(&graph, &args.source)?,
    };

    // snapshot sequences always contain at least the initial state
    let step = step.unwrap_or(run.snapshots.len() - 1);
    let snapshot = run.snapshots.get(step).ok_or_else(|| {
        TraceError::UsageError(format!(
            "step {} out of range (run has {} snapshots)",
            step,
            run.snapshots.len()
        ))
    })?;

    let view = reconstruct_path(snapshot, &args.source, target);
    let report = PathReport {
        algorithm: run.algorithm,
        step,
        source: args.source.clone(),
        target: target.to_string(),
        view,
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => print_report(&report),
    }

    Ok(())
}

fn print_report(report: &PathReport) {
    if report.view.is_empty() {
        println!(
            "no path from {} to {} at step {}",
            report.source, report.target, report.step
        );
        return;
    }

    println!(
        "path {} -> {} ({}, step {})",
        report.source, report.target, report.algorithm, report.step
    );
    let nodes: Vec<_> = report.view.nodes.iter().map(String::as_str).collect();
    println!("nodes: {}", nodes.join(", "));
    let edges: Vec<_> = report
        .view
        .pairs
        .iter()
        .map(|(parent, child)| format!("{} -> {}", parent, child))
        .collect();
    println!("edges: {}", edges.join(", "));
}
