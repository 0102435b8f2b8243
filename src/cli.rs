//! CLI argument parsing for steptrace
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub use steptrace_core::format::OutputFormat;
use steptrace_core::error::TraceError;

/// Steptrace - side-by-side shortest-path algorithm tracing CLI
#[derive(Parser, Debug)]
#[command(name = "steptrace")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human", value_parser = parse_format)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing and progress detail
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Explicit log filter (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

fn parse_format(raw: &str) -> Result<OutputFormat, TraceError> {
    raw.parse()
}

/// Which tracer(s) a command should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmChoice {
    Dijkstra,
    Bounded,
    #[default]
    Both,
}

/// Arguments shared by every subcommand
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Graph description file (JSON: {"nodes": [...], "edges": [{"from", "to", "weight"}]})
    #[arg(long)]
    pub graph: PathBuf,

    /// Source node id
    #[arg(long)]
    pub source: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run tracer(s) and print a final-distance summary
    Run {
        #[command(flatten)]
        graph: GraphArgs,

        /// Which algorithm(s) to run
        #[arg(long, value_enum, default_value_t = AlgorithmChoice::Both)]
        algorithm: AlgorithmChoice,
    },

    /// Print the full snapshot sequence of a run
    Trace {
        #[command(flatten)]
        graph: GraphArgs,

        /// Which algorithm(s) to trace
        #[arg(long, value_enum, default_value_t = AlgorithmChoice::Both)]
        algorithm: AlgorithmChoice,
    },

    /// Reconstruct the shortest path implied by one snapshot
    Path {
        #[command(flatten)]
        graph: GraphArgs,

        /// Target node id
        #[arg(long)]
        target: String,

        /// Algorithm whose trace to use
        #[arg(long, value_enum, default_value_t = AlgorithmChoice::Dijkstra)]
        algorithm: AlgorithmChoice,

        /// Snapshot step to reconstruct at (default: last step)
        #[arg(long)]
        step: Option<usize>,
    },

    /// Run both tracers and report final-distance agreement
    Compare {
        #[command(flatten)]
        graph: GraphArgs,
    },
}
