//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while decoding a stack dump
///
/// Reaching the end of the input is not an error: the decoder simply stops
/// and returns what it collected.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A function line was not followed by a `path:line` location line.
    /// `line` is 1-based; 0 means the input ended instead.
    #[error("Malformed location at line {line}: {text:?}")]
    MalformedLocation { line: usize, text: String },

    #[error("Invalid {field} at line {line}: {source}")]
    NumericParse {
        line: usize,
        field: &'static str,
        #[source]
        source: ParseIntError,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during report output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
