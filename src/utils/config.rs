//! Configuration and constants for the CLI.

/// Keyword that opens every thread record in a dump
pub const HEADER_KEYWORD: &str = "goroutine";

// Line patterns for the dump format.
// Header: "goroutine 17 [chan receive]:" -> (id, state)
// Text between the id and the bracket is optional ("goroutine 1 gp=0x1 m=0 [running]:").
pub const HEADER_PATTERN: &str = r"goroutine (\d+) [^\[]*\[([^\[]+)\]:";
// Function: "main.(*Server).serve(0xc000010000, 0x1)" -> "main.(*Server).serve"
// Only a trailing argument list is stripped.
pub const FUNCTION_PATTERN: &str = r"(.+)\([^\)]*\)?$";
// Location: "\t/src/main.go:42 +0x1d" -> (path, line)
pub const LOCATION_PATTERN: &str = r"([^:]+):(\d+)";

/// Lines of call stack shown per entry in the viewer
pub const DEFAULT_DETAIL_HEIGHT: usize = 10;
pub const MIN_DETAIL_HEIGHT: usize = 2;

/// Entries listed by the text summary
pub const SUMMARY_TOP_GROUPS: usize = 10;

/// Current JSON report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";
