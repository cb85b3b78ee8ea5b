//! Goroutine stack dump decoder.
//!
//! A dump is a sequence of thread records:
//!
//! ```text
//! goroutine 1 [running]:
//! main.main()
//!         /src/main.go:10 +0x1d
//!
//! ```
//!
//! Each record is a header line, repeated function/location line pairs and a
//! terminating blank line. Lines before a header that do not match it are
//! skipped as noise.

use crate::aggregator::grouper::{group, GroupedEntry};
use crate::utils::config::{FUNCTION_PATTERN, HEADER_PATTERN, LOCATION_PATTERN};
use crate::utils::error::DecodeError;
use log::debug;
use regex::Regex;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

// Patterns are constants from utils::config and known to compile.
static HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("header pattern compiles"));
static FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(FUNCTION_PATTERN).expect("function pattern compiles"));
static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOCATION_PATTERN).expect("location pattern compiles"));

/// One stack frame: function signature plus source location
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallFrame {
    /// Function signature without its argument list
    pub function: String,

    /// Source file path
    pub file: String,

    /// Line number in `file`
    pub line: u32,
}

impl CallFrame {
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }
}

/// Two lines: the function, then `path:line`.
impl fmt::Display for CallFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}:{}\n", self.function, self.file, self.line)
    }
}

/// One parsed thread entry from the dump
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadRecord {
    /// Goroutine number from the header
    pub id: u64,

    /// Bracketed state text, e.g. "running" or "chan receive"
    pub state: String,

    /// Time blocked. Always zero: the header pattern carries no duration.
    pub blocked: Duration,

    /// Frames as printed, top frame first. May be empty.
    pub frames: Arc<[CallFrame]>,
}

/// Everything a single decode produces
///
/// `all` is the source of truth; `grouped` indexes into it through
/// [`GroupedEntry::members`].
#[derive(Debug, Clone, Default)]
pub struct DecodeResult {
    /// Every thread record, in input order
    pub all: Vec<ThreadRecord>,

    /// Records merged by identical call stack, in first-seen order
    pub grouped: Vec<GroupedEntry>,
}

impl DecodeResult {
    /// Build the grouped view over an already decoded record list
    pub fn from_records(all: Vec<ThreadRecord>) -> Self {
        let grouped = group(&all);
        Self { all, grouped }
    }

    /// Records that contributed to `entry`, in input order
    pub fn members<'a>(
        &'a self,
        entry: &'a GroupedEntry,
    ) -> impl Iterator<Item = &'a ThreadRecord> + 'a {
        entry.members.iter().filter_map(|&i| self.all.get(i))
    }
}

/// Decoder state, one record at a time
enum State {
    /// Looking for the next header line
    SeekHeader,
    /// Expecting a function line or the blank line closing the record
    ReadFunction(PendingRecord),
    /// Expecting the location line for the pending function
    ReadLocation(PendingRecord, String),
}

/// Record under construction
#[derive(Debug)]
struct PendingRecord {
    id: u64,
    state: String,
    frames: Vec<CallFrame>,
}

impl PendingRecord {
    fn finish(self) -> ThreadRecord {
        ThreadRecord {
            id: self.id,
            state: self.state,
            blocked: Duration::ZERO,
            frames: self.frames.into(),
        }
    }
}

/// Decode a dump and group its records
///
/// **Public** - main entry point for parsing
///
/// # Arguments
/// * `input` - Buffered reader over the dump text
///
/// # Returns
/// Both the flat record list and the grouped view
///
/// # Errors
/// * `DecodeError::MalformedLocation` - Function line without a valid location line
/// * `DecodeError::NumericParse` - Goroutine id or line number out of range
/// * `DecodeError::Io` - Reading the input failed
pub fn decode<R: BufRead>(input: R) -> Result<DecodeResult, DecodeError> {
    let all = decode_threads(input)?;
    let result = DecodeResult::from_records(all);

    debug!(
        "Grouped {} goroutines into {} unique stacks",
        result.all.len(),
        result.grouped.len()
    );

    Ok(result)
}

/// Open `path` and decode it
///
/// The file handle is dropped before returning on every path.
pub fn decode_file(path: impl AsRef<Path>) -> Result<DecodeResult, DecodeError> {
    let path = path.as_ref();
    debug!("Decoding stack dump: {}", path.display());

    let file = File::open(path)?;
    decode(BufReader::new(file))
}

/// Decode every thread record without grouping
///
/// **Public** - exposed for callers that only need the flat list
///
/// Runs until the input is exhausted or the first structural error. No partial
/// result is returned on error.
pub fn decode_threads<R: BufRead>(input: R) -> Result<Vec<ThreadRecord>, DecodeError> {
    let mut records = Vec::new();
    let mut state = State::SeekHeader;
    let mut skipped = 0usize;
    let mut lines = input.lines().enumerate();

    loop {
        let next = match lines.next() {
            Some((index, line)) => Some((index + 1, line?)),
            None => None,
        };

        state = match (state, next) {
            (State::SeekHeader, None) => break,
            (State::SeekHeader, Some((number, text))) => match parse_header(number, &text)? {
                Some(pending) => State::ReadFunction(pending),
                None => {
                    skipped += 1;
                    State::SeekHeader
                }
            },

            // Input may end without the closing blank line
            (State::ReadFunction(pending), None) => {
                records.push(pending.finish());
                break;
            }
            (State::ReadFunction(pending), Some((_, text))) if text.is_empty() => {
                records.push(pending.finish());
                State::SeekHeader
            }
            (State::ReadFunction(pending), Some((_, text))) => {
                State::ReadLocation(pending, parse_function(&text))
            }

            (State::ReadLocation(..), None) => {
                return Err(DecodeError::MalformedLocation {
                    line: 0,
                    text: String::new(),
                })
            }
            (State::ReadLocation(mut pending, function), Some((number, text))) => {
                let frame = parse_location(number, &text, function)?;
                pending.frames.push(frame);
                State::ReadFunction(pending)
            }
        };
    }

    debug!(
        "Decoded {} goroutines ({} non-header lines skipped)",
        records.len(),
        skipped
    );

    Ok(records)
}

/// Match a header line and start a record
///
/// **Private** - returns `None` for lines that are not headers
fn parse_header(number: usize, text: &str) -> Result<Option<PendingRecord>, DecodeError> {
    let Some(caps) = HEADER_RE.captures(text) else {
        return Ok(None);
    };

    let id = caps[1]
        .parse::<u64>()
        .map_err(|source| DecodeError::NumericParse {
            line: number,
            field: "goroutine id",
            source,
        })?;

    Ok(Some(PendingRecord {
        id,
        state: caps[2].to_string(),
        frames: Vec::new(),
    }))
}

/// Strip a trailing argument list from a function line
///
/// **Private** - lines without parentheses are kept whole
fn parse_function(text: &str) -> String {
    FUNCTION_RE
        .captures(text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_else(|| text.to_string())
}

/// Parse a `path:line` location line into a complete frame
///
/// **Private** - anything after the line number (e.g. ` +0x1d`) is ignored
fn parse_location(number: usize, text: &str, function: String) -> Result<CallFrame, DecodeError> {
    let caps = LOCATION_RE
        .captures(text)
        .ok_or_else(|| DecodeError::MalformedLocation {
            line: number,
            text: text.to_string(),
        })?;

    let line = caps[2]
        .parse::<u32>()
        .map_err(|source| DecodeError::NumericParse {
            line: number,
            field: "line number",
            source,
        })?;

    Ok(CallFrame {
        function,
        file: caps[1].trim().to_string(),
        line,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let pending = parse_header(1, "goroutine 42 [chan receive]:").unwrap().unwrap();
        assert_eq!(pending.id, 42);
        assert_eq!(pending.state, "chan receive");
    }

    #[test]
    fn test_parse_header_with_runtime_fields() {
        let pending = parse_header(1, "goroutine 1 gp=0xc000002380 m=0 mp=0x5c1f40 [running]:")
            .unwrap()
            .unwrap();
        assert_eq!(pending.id, 1);
        assert_eq!(pending.state, "running");
    }

    #[test]
    fn test_decode_standard_headers() {
        let input = "goroutine 1 [running]:\nmain.foo()\nmain.go:10\n\n\
                     goroutine 2 [running]:\nmain.foo()\nmain.go:10\n\n";

        let records = decode_threads(input.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn test_parse_header_with_duration_keeps_it_in_state() {
        let pending = parse_header(1, "goroutine 7 [select, 5 minutes]:").unwrap().unwrap();
        assert_eq!(pending.state, "select, 5 minutes");
    }

    #[test]
    fn test_parse_header_rejects_noise() {
        assert!(parse_header(1, "panic: boom").unwrap().is_none());
        assert!(parse_header(1, "").unwrap().is_none());
        assert!(parse_header(1, "goroutine 1 running:").unwrap().is_none());
    }

    #[test]
    fn test_parse_header_id_overflow() {
        let err = parse_header(3, "goroutine 99999999999999999999999 [running]:").unwrap_err();
        assert!(matches!(err, DecodeError::NumericParse { line: 3, .. }));
    }

    #[test]
    fn test_parse_function_strips_arguments() {
        assert_eq!(parse_function("main.foo()"), "main.foo");
        assert_eq!(parse_function("main.foo(0xc000012345, 0x1)"), "main.foo");
        assert_eq!(
            parse_function("net/http.(*conn).serve(0xc0001b2000, {0x7a1e28, 0xc0000a2000})"),
            "net/http.(*conn).serve"
        );
        assert_eq!(parse_function("main.main.func1(...)"), "main.main.func1");
    }

    #[test]
    fn test_parse_function_without_arguments() {
        assert_eq!(
            parse_function("created by main.main in goroutine 1"),
            "created by main.main in goroutine 1"
        );
        assert_eq!(
            parse_function("created by net/http.(*Server).Serve in goroutine 1"),
            "created by net/http.(*Server).Serve in goroutine 1"
        );
    }

    #[test]
    fn test_parse_location() {
        let frame = parse_location(2, "\t/usr/src/app/main.go:42 +0x1d", "main.run".into()).unwrap();
        assert_eq!(frame, CallFrame::new("main.run", "/usr/src/app/main.go", 42));
    }

    #[test]
    fn test_parse_location_rejects_missing_line_number() {
        let err = parse_location(5, "main.bar()", "main.foo".into()).unwrap_err();
        match err {
            DecodeError::MalformedLocation { line, text } => {
                assert_eq!(line, 5);
                assert_eq!(text, "main.bar()");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_call_frame_display() {
        let frame = CallFrame::new("main.foo", "main.go", 10);
        assert_eq!(frame.to_string(), "main.foo\nmain.go:10\n");
    }
}
