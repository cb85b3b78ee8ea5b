use stacknav::output::text::record_string;
use stacknav::parser::goroutine::{decode, decode_file, decode_threads, CallFrame};
use stacknav::utils::error::DecodeError;
use std::path::Path;

const SAME_STACK: &str = "goroutine 1 [running]:\nmain.foo()\nmain.go:10\n\n\
                          goroutine 2 [running]:\nmain.foo()\nmain.go:10\n\n";

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

#[test]
fn test_decode_identical_stacks() {
    let result = decode(SAME_STACK.as_bytes()).unwrap();

    assert_eq!(result.all.len(), 2);
    assert_eq!(result.grouped.len(), 1);
    assert_eq!(result.grouped[0].ids, vec![1, 2]);
    assert_eq!(result.grouped[0].states, vec!["running"]);
    assert_eq!(result.grouped[0].members, vec![0, 1]);
}

#[test]
fn test_decode_merges_differing_states() {
    let input = "goroutine 1 [running]:\nmain.foo()\nmain.go:10\n\n\
                 goroutine 2 [chan receive]:\nmain.foo()\nmain.go:10\n\n";

    let result = decode(input.as_bytes()).unwrap();

    assert_eq!(result.grouped.len(), 1);
    assert_eq!(result.grouped[0].states, vec!["running", "chan receive"]);
}

#[test]
fn test_decode_empty_stack_records() {
    let input = "goroutine 1 [IO wait]:\n\ngoroutine 2 [runnable]:\n\n";

    let result = decode(input.as_bytes()).unwrap();

    assert_eq!(result.all.len(), 2);
    assert!(result.all[0].frames.is_empty());
    assert_eq!(result.grouped.len(), 1);
    assert_eq!(result.grouped[0].states, vec!["IO wait", "runnable"]);
}

#[test]
fn test_decode_empty_input() {
    let result = decode("".as_bytes()).unwrap();

    assert!(result.all.is_empty());
    assert!(result.grouped.is_empty());
}

#[test]
fn test_decode_skips_noise_before_header() {
    let input = "panic: boom\n\n[signal SIGSEGV]\n\ngoroutine 5 [running]:\nmain.f()\nf.go:1\n\n";

    let records = decode_threads(input.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 5);
    assert_eq!(records[0].frames[0], CallFrame::new("main.f", "f.go", 1));
}

#[test]
fn test_decode_without_trailing_blank_line() {
    let input = "goroutine 1 [running]:\nmain.foo()\nmain.go:10";

    let records = decode_threads(input.as_bytes()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].frames.len(), 1);
}

#[test]
fn test_decode_crlf_line_endings() {
    let input = "goroutine 1 [running]:\r\nmain.foo()\r\nmain.go:10\r\n\r\n";

    let records = decode_threads(input.as_bytes()).unwrap();

    assert_eq!(records[0].frames[0], CallFrame::new("main.foo", "main.go", 10));
}

#[test]
fn test_decode_missing_location_line() {
    let input = "goroutine 1 [running]:\nmain.foo()\n\n";

    let err = decode(input.as_bytes()).unwrap_err();

    assert!(matches!(err, DecodeError::MalformedLocation { line: 3, .. }));
}

#[test]
fn test_decode_input_ends_after_function_line() {
    let input = "goroutine 1 [running]:\nmain.foo()\n";

    let err = decode(input.as_bytes()).unwrap_err();

    assert!(matches!(err, DecodeError::MalformedLocation { line: 0, .. }));
}

#[test]
fn test_decode_line_number_overflow() {
    let input = "goroutine 1 [running]:\nmain.foo()\nmain.go:99999999999\n\n";

    let err = decode(input.as_bytes()).unwrap_err();

    assert!(matches!(
        err,
        DecodeError::NumericParse {
            line: 3,
            field: "line number",
            ..
        }
    ));
}

#[test]
fn test_decode_file_fixture() {
    let result = decode_file(fixture("server.txt")).unwrap();

    assert_eq!(result.all.len(), 7);
    assert_eq!(result.grouped.len(), 4);

    let workers = &result.grouped[1];
    assert_eq!(workers.ids, vec![17, 18, 20]);
    assert_eq!(workers.states, vec!["chan receive", "chan receive, 5 minutes"]);
    assert_eq!(workers.members, vec![1, 2, 4]);
    assert_eq!(
        workers.frames.as_ref(),
        &[
            CallFrame::new("main.worker", "/app/cmd/server/worker.go", 88),
            CallFrame::new("created by main.main in goroutine 1", "/app/cmd/server/main.go", 30),
        ]
    );

    let idle = &result.grouped[3];
    assert_eq!(idle.ids, vec![21, 22]);
    assert!(idle.frames.is_empty());
}

#[test]
fn test_decode_file_malformed_fixture() {
    let err = decode_file(fixture("malformed.txt")).unwrap_err();

    match err {
        DecodeError::MalformedLocation { line, text } => {
            assert_eq!(line, 7);
            assert_eq!(text, "main.main()");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_decode_file_missing() {
    let err = decode_file(fixture("does-not-exist.txt")).unwrap_err();

    assert!(matches!(err, DecodeError::Io(_)));
}

#[test]
fn test_record_string_round_trip() {
    let original = decode_file(fixture("server.txt")).unwrap();

    for record in &original.all {
        let rendered = record_string(record);
        let decoded = decode_threads(rendered.as_bytes()).unwrap();

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].id, record.id);
        assert_eq!(decoded[0].frames, record.frames);
    }
}
