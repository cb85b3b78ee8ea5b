//! Canonical text rendering of call stacks and grouped entries.
//!
//! The call-stack string is also the grouping key, so its layout is
//! load-bearing: each frame is `function\npath:line\n`, and the whole stack
//! ends with one blank line.

use crate::aggregator::grouper::GroupedEntry;
use crate::aggregator::metrics::{largest_groups, GroupStats};
use crate::parser::goroutine::{CallFrame, DecodeResult, ThreadRecord};
use crate::utils::config::HEADER_KEYWORD;
use std::fmt::{Display, Write};
use std::time::Duration;

/// Render frames as the canonical call-stack string
///
/// **Public** - used as the grouping key and as the viewer description
pub fn call_stack_string(frames: &[CallFrame]) -> String {
    let mut out = String::new();
    for frame in frames {
        // Writing to a String cannot fail
        let _ = write!(out, "{}", frame);
    }
    out.push('\n');
    out
}

/// Header line for a grouped entry, e.g. `goroutine [1 2] [running] [0s]`
///
/// **Public** - used as the viewer title
pub fn entry_header(entry: &GroupedEntry) -> String {
    let blocked: Vec<String> = entry.blocked.iter().map(|d| format_duration(*d)).collect();

    format!(
        "{} {} {} {}",
        HEADER_KEYWORD,
        format_set(&entry.ids),
        format_set(&entry.states),
        format_set(&blocked)
    )
}

/// Full rendering of a grouped entry: header line followed by the call stack
pub fn entry_string(entry: &GroupedEntry) -> String {
    format!("{}\n{}", entry_header(entry), call_stack_string(&entry.frames))
}

/// Render a single record in dump form, so it decodes back to itself
pub fn record_string(record: &ThreadRecord) -> String {
    format!(
        "{} {} [{}]:\n{}",
        HEADER_KEYWORD,
        record.id,
        record.state,
        call_stack_string(&record.frames)
    )
}

/// Every grouped entry, in creation order
///
/// **Public** - backs `--print`
pub fn render_dump(result: &DecodeResult) -> String {
    result.grouped.iter().map(entry_string).collect()
}

/// Render a list the way a bracketed set is shown: `[a b c]`
fn format_set<T: Display>(items: &[T]) -> String {
    let joined: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", joined.join(" "))
}

/// Render a duration in its natural unit
///
/// Sub-second values use a single unit (`250ms`, `1.5µs`, `7ns`); longer
/// values are split into hours, minutes and seconds (`1h2m3s`, `2m0s`, `1.5s`).
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();

    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", trim_fraction(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", trim_fraction(nanos, 1_000_000));
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = trim_fraction(nanos % 60_000_000_000, 1_000_000_000);

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{}m", minutes);
    }
    let _ = write!(out, "{}s", seconds);
    out
}

/// `value / unit` as a decimal without trailing zeros
fn trim_fraction(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }

    let width = unit.ilog10() as usize;
    let digits = format!("{:0width$}", fraction, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Create a text summary of a decoded dump
///
/// **Public** - backs `--summary`
///
/// # Arguments
/// * `result` - Decoded dump
/// * `stats` - Statistics calculated from `result`
/// * `max_groups` - How many of the largest groups to list
pub fn generate_text_summary(result: &DecodeResult, stats: &GroupStats, max_groups: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Goroutines:    {}", stats.total_goroutines);
    let _ = writeln!(out, "Unique Stacks: {}", stats.unique_stacks);
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<40} {:>10}", "STATE", "COUNT");
    let _ = writeln!(out, "{}", "-".repeat(51));
    for (state, count) in &stats.by_state {
        let _ = writeln!(out, "{:<40} {:>10}", state, count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:>5} {:>8}  {}", "GROUP", "COUNT", "TOP FRAME");
    let _ = writeln!(out, "{}", "-".repeat(51));
    for position in largest_groups(&result.grouped, max_groups) {
        let entry = &result.grouped[position];
        let top = entry
            .frames
            .first()
            .map(|frame| frame.function.as_str())
            .unwrap_or("(no frames)");
        let _ = writeln!(out, "{:>5} {:>8}  {}", position, entry.goroutine_count(), top);
    }

    out
}
