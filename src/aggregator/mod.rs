//! Aggregation of decoded goroutines into grouped entries and metrics.
//!
//! This module transforms the flat record list into:
//! - Grouped entries (one per distinct call stack)
//! - Grouping statistics (state counts, largest groups)

pub mod grouper;
pub mod metrics;

// Re-export main types and functions
pub use grouper::{group, GroupedEntry};
pub use metrics::{calculate_group_stats, largest_groups, GroupStats};
