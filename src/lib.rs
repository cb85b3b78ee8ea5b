//! Stacknav
//!
//! Groups the goroutines of a stack dump by identical call stack and
//! browses the result.
//!
//! This crate provides the core implementation for the `stacknav` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! stacknav goroutines.txt            # interactive viewer
//! stacknav goroutines.txt --print    # grouped dump on stdout
//! stacknav goroutines.txt --summary  # state counts and largest groups
//! ```
//!
//! As a library:
//!
//! ```
//! let dump = "goroutine 1 [running]:\nmain.main()\n\t/app/main.go:5 +0x1d\n\n";
//! let result = stacknav::parser::decode(dump.as_bytes()).unwrap();
//! assert_eq!(result.grouped.len(), 1);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod ui;
pub mod utils;
