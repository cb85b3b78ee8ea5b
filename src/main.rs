//! Stacknav CLI
//!
//! Reads a goroutine stack dump, groups goroutines that share a call stack
//! and opens an interactive list of the groups.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use stacknav::commands::{execute_browse, validate_args, BrowseArgs};
use stacknav::utils::config::DEFAULT_DETAIL_HEIGHT;

/// Stacknav - browse goroutine dumps grouped by call stack
#[derive(Parser, Debug)]
#[command(name = "stacknav")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Goroutine stack dump to read
    file: PathBuf,

    /// Call-stack lines shown per entry in the viewer
    #[arg(long, env = "STACKNAV_DETAIL_HEIGHT", default_value_t = DEFAULT_DETAIL_HEIGHT)]
    detail_height: usize,

    /// Print the grouped dump to stdout instead of opening the viewer
    #[arg(long)]
    print: bool,

    /// Print state counts and the largest groups
    #[arg(long)]
    summary: bool,

    /// Write the grouped stacks as a JSON report
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = BrowseArgs {
        input: cli.file,
        detail_height: cli.detail_height,
        print: cli.print,
        summary: cli.summary,
        output_json: cli.json,
    };

    // Validate args first
    validate_args(&args)?;

    execute_browse(args)?;

    Ok(())
}
