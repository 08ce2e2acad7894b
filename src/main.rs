//! Callgraph Console CLI
//!
//! Aggregates call-graph profiling samples and lets an operator
//! drill into the callers and callees of any method.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::io;
use std::path::PathBuf;

use callgraph_console::commands::{
    display_version, execute_explore, execute_summary, ExploreArgs, InputArgs, SummaryArgs,
};

/// Callgraph Console - aggregate and explore call-graph samples
#[derive(Parser, Debug)]
#[command(name = "callgraph-console")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file with default input, limit, percentile, top and compressed
    #[arg(short, long, global = true, env = "CALLGRAPH_CONSOLE_CONFIG")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate samples and navigate the call graph interactively
    Explore {
        /// JSON-lines file or directory of JSON samples
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum number of samples to read
        #[arg(short, long)]
        limit: Option<usize>,

        /// Wall-time percentile to estimate, between 0 and 1
        #[arg(short, long)]
        percentile: Option<f64>,

        /// Samples are zlib-compressed JSON (one per file in a directory)
        #[arg(long)]
        compressed: bool,
    },

    /// Aggregate samples and print the most expensive methods
    Summary {
        /// JSON-lines file or directory of JSON samples
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Maximum number of samples to read
        #[arg(short, long)]
        limit: Option<usize>,

        /// Wall-time percentile to estimate, between 0 and 1
        #[arg(short, long)]
        percentile: Option<f64>,

        /// Samples are zlib-compressed JSON (one per file in a directory)
        #[arg(long)]
        compressed: bool,

        /// Number of methods to list
        #[arg(short, long)]
        top: Option<usize>,

        /// Print a JSON report instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Explore {
            input,
            limit,
            percentile,
            compressed,
        } => {
            let args = ExploreArgs {
                input: InputArgs {
                    input,
                    limit,
                    percentile,
                    compressed,
                    config: cli.config,
                },
            };

            let stdin = io::stdin();
            execute_explore(&args, &mut stdin.lock(), &mut io::stdout().lock())?;
        }

        Commands::Summary {
            input,
            limit,
            percentile,
            compressed,
            top,
            json,
        } => {
            let args = SummaryArgs {
                input: InputArgs {
                    input,
                    limit,
                    percentile,
                    compressed,
                    config: cli.config,
                },
                top,
                json,
            };

            execute_summary(&args, &mut io::stdout().lock())?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
