//! Command dispatch logic for steptrace

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use steptrace_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::Run { graph, algorithm } => commands::run::execute(cli, graph, *algorithm),

        Commands::Trace { graph, algorithm } => commands::trace::execute(cli, graph, *algorithm),

        Commands::Path {
            graph,
            target,
            algorithm,
            step,
        } => commands::path::execute(cli, graph, target, *algorithm, *step),

        Commands::Compare { graph } => commands::compare::execute(cli, graph),
    };

    if cli.verbose {
        eprintln!("total: {:?}", start.elapsed());
    }

    result
}
