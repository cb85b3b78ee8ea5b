//! Stack dump parsing and report schema definitions.
//!
//! This module handles:
//! - Decoding goroutine dumps into thread records
//! - Defining the JSON report schema

pub mod goroutine;
pub mod schema;

// Re-export main types
pub use goroutine::{decode, decode_file, decode_threads, CallFrame, DecodeResult, ThreadRecord};
pub use schema::{Report, ReportEntry, ReportFrame};
