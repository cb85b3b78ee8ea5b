//! Calculate grouping statistics from decoded dumps.
//!
//! Large groups and dominant states are usually where a hang or leak shows
//! up, so these are the numbers the summary reports.

use super::grouper::GroupedEntry;
use crate::parser::goroutine::DecodeResult;
use log::debug;
use std::collections::HashMap;

/// Summary statistics for one decoded dump
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    /// Goroutines in the dump
    pub total_goroutines: usize,

    /// Distinct call stacks
    pub unique_stacks: usize,

    /// Goroutines in the biggest group
    pub largest_group: usize,

    /// Goroutines per state label, most common first
    pub by_state: Vec<(String, usize)>,
}

impl GroupStats {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} goroutines, {} unique stacks, largest group {}",
            self.total_goroutines, self.unique_stacks, self.largest_group
        )
    }
}

/// Calculate statistics for a decoded dump
///
/// **Public** - provides summary statistics
///
/// States are counted per goroutine (from `all`), not per group.
pub fn calculate_group_stats(result: &DecodeResult) -> GroupStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in &result.all {
        *counts.entry(record.state.as_str()).or_insert(0) += 1;
    }

    let mut by_state: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(state, count)| (state.to_string(), count))
        .collect();

    // Count descending, then label for a stable order
    by_state.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let largest_group = result
        .grouped
        .iter()
        .map(GroupedEntry::goroutine_count)
        .max()
        .unwrap_or(0);

    debug!(
        "Calculated stats: {} states across {} groups",
        by_state.len(),
        result.grouped.len()
    );

    GroupStats {
        total_goroutines: result.all.len(),
        unique_stacks: result.grouped.len(),
        largest_group,
        by_state,
    }
}

/// Positions of the `top_n` largest groups
///
/// **Public** - used by the text summary
///
/// Sorted by goroutine count descending; equal counts keep creation order.
pub fn largest_groups(grouped: &[GroupedEntry], top_n: usize) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..grouped.len()).collect();

    // sort_by is stable, so ties stay in creation order
    positions.sort_by(|&a, &b| grouped[b].goroutine_count().cmp(&grouped[a].goroutine_count()));
    positions.truncate(top_n);

    positions
}
