//! Output JSON schema definitions for grouped stack reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version for compatibility checking
    pub version: String,

    /// Dump file the report was built from
    pub source: String,

    /// Number of goroutines in the dump
    pub total_goroutines: usize,

    /// Number of distinct call stacks
    pub unique_stacks: usize,

    /// One entry per distinct call stack, in first-seen order
    pub entries: Vec<ReportEntry>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// A group of goroutines sharing one call stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Goroutine ids, in input order
    pub ids: Vec<u64>,

    /// Distinct states, in first-seen order
    pub states: Vec<String>,

    /// Distinct blocked durations, rendered (e.g. "0s")
    pub blocked: Vec<String>,

    /// Indices into the dump's goroutine list
    pub members: Vec<usize>,

    /// Shared call stack, top frame first
    pub frames: Vec<ReportFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFrame {
    pub function: String,
    pub file: String,
    pub line: u32,
}
