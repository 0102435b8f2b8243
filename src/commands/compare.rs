//! `steptrace compare` - cross-algorithm agreement report
//!
//! Both tracers must produce identical final distances for every node; a
//! disagreement is a failure (exit code 1), reported per node.

use serde::Serialize;

use crate::cli::{Cli, GraphArgs, OutputFormat};
use crate::commands::helpers;
use steptrace_core::error::{Result, TraceError};
use steptrace_core::trace::{bounded_trace, dijkstra_trace, Dist};

#[derive(Debug, Serialize)]
struct Mismatch {
    node: String,
    dijkstra: Dist,
    bounded: Dist,
}

#[derive(Debug, Serialize)]
struct CompareReport {
    source: String,
    agree: bool,
    dijkstra_steps: usize,
    bounded_steps: usize,
    mismatches: Vec<Mismatch>,
}

pub fn execute(cli: &Cli, args: &GraphArgs) -> Result<()> {
    let graph = helpers::load_graph(args)?;
    let classical = dijkstra_trace(&graph, &args.source);
    let bounded = bounded_trace(&graph, &args.source)?;

    let mut mismatches = Vec::new();
    let nodes: std::collections::BTreeSet<_> =
        classical.dist.keys().chain(bounded.dist.keys()).collect();
    for node in nodes {
        let left = classical.dist.get(node).copied().unwrap_or(Dist::Infinite);
        let right = bounded.dist.get(node).copied().unwrap_or(Dist::Infinite);
        if left != right {
            mismatches.push(Mismatch {
                node: node.clone(),
                dijkstra: left,
                bounded: right,
            });
        }
    }

    let report = CompareReport {
        source: args.source.clone(),
        agree: mismatches.is_empty(),
        dijkstra_steps: classical.snapshots.len(),
        bounded_steps: bounded.snapshots.len(),
        mismatches,
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => print_report(&report),
    }

    if report.agree {
        Ok(())
    } else {
        Err(TraceError::Other(format!(
            "final distances disagree on {} node(s)",
            report.mismatches.len()
        )))
    }
}

fn print_report(report: &CompareReport) {
    println!("dijkstra: {} steps", report.dijkstra_steps);
    println!("bounded: {} steps", report.bounded_steps);
    if report.agree {
        println!("final distances agree");
    } else {
        for mismatch in &report.mismatches {
            println!(
                "mismatch at {}: dijkstra {} vs bounded {}",
                mismatch.node, mismatch.dijkstra, mismatch.bounded
            );
        }
    }
}
