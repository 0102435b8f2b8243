//! `steptrace trace` - print the full snapshot sequence of a run

use crate::cli::{AlgorithmChoice, Cli, GraphArgs, OutputFormat};
use crate::commands::helpers;
use steptrace_core::error::Result;
use steptrace_core::trace::{Snapshot, SnapshotDetail, TraceRun};

pub fn execute(cli: &Cli, args: &GraphArgs, algorithm: AlgorithmChoice) -> Result<()> {
    let graph = helpers::load_graph(args)?;
    let runs = helpers::run_algorithms(&graph, &args.source, algorithm)?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&runs)?),
        OutputFormat::Human => {
            for run in &runs {
                print_run(run);
            }
        }
    }

    Ok(())
}

fn print_run(run: &TraceRun) {
    println!("== {} ({} steps)", run.algorithm, run.snapshots.len());
    for snapshot in &run.snapshots {
        print_snapshot(snapshot);
    }
}

fn print_snapshot(snapshot: &Snapshot) {
    match &snapshot.detail {
        SnapshotDetail::Classical => {
            println!("[{:>3}] {}", snapshot.step, snapshot.description);
        }
        SnapshotDetail::Bounded(detail) => {
            println!(
                "[{:>3}] {} [level {}, bound {}]",
                snapshot.step, snapshot.description, detail.level, detail.bound
            );
        }
    }
}
