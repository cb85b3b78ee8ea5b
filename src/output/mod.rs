//! Output rendering for decoded dumps.
//!
//! This module handles:
//! - Canonical text rendering (call stacks, entry headers, full dumps)
//! - Text summaries
//! - JSON reports

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{read_report, to_report, validate_path, write_report};
pub use text::{
    call_stack_string, entry_header, entry_string, format_duration, generate_text_summary,
    record_string, render_dump,
};
