//! `steptrace run` - final-distance summaries for one or both tracers

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::{AlgorithmChoice, Cli, GraphArgs, OutputFormat};
use crate::commands::helpers;
use steptrace_core::error::Result;
use steptrace_core::trace::{Algorithm, Dist, TraceRun};

/// Post-run summary of one tracer, the shape emitted by `--format json`
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub algorithm: Algorithm,
    pub source: String,
    pub steps: usize,
    pub dist: BTreeMap<String, Dist>,
    pub pred: BTreeMap<String, String>,
}

impl From<TraceRun> for RunSummary {
    fn from(run: TraceRun) -> Self {
        Self {
            algorithm: run.algorithm,
            source: run.source,
            steps: run.snapshots.len(),
            dist: run.dist,
            pred: run.pred,
        }
    }
}

pub fn execute(cli: &Cli, args: &GraphArgs, algorithm: AlgorithmChoice) -> Result<()> {
    let graph = helpers::load_graph(args)?;
    let summaries: Vec<RunSummary> = helpers::run_algorithms(&graph, &args.source, algorithm)?
        .into_iter()
        .map(RunSummary::from)
        .collect();

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Human => {
            for summary in &summaries {
                print_summary(summary);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("== {} ({} steps)", summary.algorithm, summary.steps);
    for (node, dist) in &summary.dist {
        match summary.pred.get(node) {
            Some(parent) => println!("{} = {} (via {})", node, dist, parent),
            None => println!("{} = {}", node, dist),
        }
    }
}
