//! Browse command implementation.
//!
//! The browse command:
//! 1. Decodes the dump file
//! 2. Groups goroutines by call stack
//! 3. Writes the requested batch outputs, or
//! 4. Hands the grouped entries to the interactive viewer

use super::models::BrowseArgs;
use crate::aggregator::calculate_group_stats;
use crate::output::{generate_text_summary, render_dump, to_report, validate_path, write_report};
use crate::parser::{decode_file, DecodeResult};
use crate::ui::{self, ViewModel};
use crate::utils::config::{MIN_DETAIL_HEIGHT, SUMMARY_TOP_GROUPS};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{self, Write};
use std::time::Instant;

/// Execute the browse command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Dump file cannot be opened or decoded
/// * Report cannot be written
/// * Terminal setup fails
pub fn execute_browse(args: BrowseArgs) -> Result<()> {
    let start_time = Instant::now();

    let result = load_dump(&args)?;

    let stats = calculate_group_stats(&result);
    info!("Decoded {}", stats.summary());
    debug!("Decode took {:.2}s", start_time.elapsed().as_secs_f64());

    if args.interactive() {
        let title = args.input.display().to_string();
        return ui::run(ViewModel::new(title, &result, args.detail_height));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.print {
        out.write_all(render_dump(&result).as_bytes())
            .context("Failed to write dump to stdout")?;
    }

    if args.summary {
        writeln!(out, "{}", "=".repeat(51))?;
        writeln!(out, "STACK SUMMARY: {}", args.input.display())?;
        writeln!(out, "{}", "=".repeat(51))?;
        write!(out, "{}", generate_text_summary(&result, &stats, SUMMARY_TOP_GROUPS))?;
    }

    if let Some(path) = &args.output_json {
        let report = to_report(&result, &args.input.display().to_string());
        write_report(&report, path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", path.display());
    }

    Ok(())
}

/// Decode the input file with a descriptive error
///
/// **Public** - shared by batch and interactive paths
pub fn load_dump(args: &BrowseArgs) -> Result<DecodeResult> {
    info!("Reading stack dump: {}", args.input.display());

    decode_file(&args.input)
        .with_context(|| format!("Failed to decode stack dump {}", args.input.display()))
}

/// Validate browse arguments
///
/// **Public** - can be called before execute_browse for early validation
pub fn validate_args(args: &BrowseArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if !args.input.is_file() {
        anyhow::bail!("Input is not a regular file: {}", args.input.display());
    }

    if args.detail_height < MIN_DETAIL_HEIGHT {
        anyhow::bail!("detail height must be at least {}", MIN_DETAIL_HEIGHT);
    }

    if let Some(path) = &args.output_json {
        validate_path(path).context("Invalid report path")?;
    }

    Ok(())
}
