// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

const UNIX: Platform = Platform { windows: false };
const WINDOWS: Platform = Platform { windows: true };
const TIMEOUT: Duration = Duration::from_millis(12_000);

fn exited(code: i32, stderr: &str) -> TerminalState<'_> {
    TerminalState {
        exit_code: Some(code),
        signal: None,
        spawn_failure: None,
        stderr,
        duration: Some(Duration::from_millis(40)),
        timeout: TIMEOUT,
    }
}

fn tag(state: &TerminalState<'_>) -> Option<String> {
    classify(state, &UNIX).failure.map(|f| f.to_string())
}

#[test]
fn clean_exit_is_ok() {
    let result = classify(&exited(0, ""), &UNIX);
    assert_eq!(result, Classification::success());
}

#[test]
fn clean_exit_ignores_stderr_content() {
    let state = exited(0, "thread 1 panic: boom\n\x1b[31m 3 fail");
    assert!(classify(&state, &UNIX).ok);
}

#[test]
fn exit_zero_with_signal_is_not_ok() {
    let mut state = exited(0, "");
    state.signal = Some("SIGKILL");
    let result = classify(&state, &UNIX);
    assert!(!result.ok);
    assert_eq!(result.failure, Some(Failure::Signal("SIGKILL".into())));
}

#[yare::parameterized(
    space   = { "connect timed out" },
    hyphen  = { "operation Timed-Out after 5s" },
    upper   = { "TIMED OUT" },
)]
fn spawn_timeout_message(message: &str) {
    let failure = SpawnFailure::new("ETIMEDOUT", message);
    let mut state = exited(0, "");
    state.exit_code = None;
    state.spawn_failure = Some(&failure);
    let result = classify(&state, &UNIX);
    assert_eq!(result.failure, Some(Failure::Timeout));
    assert_eq!(result.stderr_override, None);
}

#[test]
fn spawn_error_replaces_stderr_with_diagnostic() {
    let failure = SpawnFailure::new("ENOENT", "No such file or directory (os error 2)");
    let state = TerminalState {
        exit_code: None,
        signal: None,
        spawn_failure: Some(&failure),
        stderr: "partial output",
        duration: None,
        timeout: TIMEOUT,
    };
    let result = classify(&state, &UNIX);
    assert!(!result.ok);
    assert_eq!(result.failure, Some(Failure::Spawn));
    assert_eq!(
        result.stderr_override.as_deref(),
        Some("No such file or directory (os error 2)")
    );
}

#[test]
fn spawn_error_uses_stack_when_present() {
    let failure = SpawnFailure::new("EACCES", "Permission denied").with_stack("frame 0\nframe 1");
    let mut state = exited(0, "");
    state.spawn_failure = Some(&failure);
    let result = classify(&state, &UNIX);
    assert_eq!(result.stderr_override.as_deref(), Some("frame 0\nframe 1"));
}

#[yare::parameterized(
    thread_panic      = { "thread 1 panic: boom\n",                           "boom" },
    thread_panic_crlf = { "thread 42 panic: Out Of Memory\r\nmore",           "out of memory" },
    thread_panic_esc  = { "thread 7 panic: first\\nsecond\n",                 "first" },
    generic_panic     = { "panic(main thread): Integer Overflow\n",           "integer overflow" },
    segfault          = { "oh no\nSegmentation fault at address 0x0\n",       "segmentation fault at address" },
    assertion         = { "Internal assertion failure in gc\n",               "internal assertion failure" },
    illegal           = { "Illegal instruction at address 0x1234\n",          "illegal instruction at address" },
    bare_panic        = { "panic: reached unreachable code at address 0x10",  "reached unreachable code" },
)]
fn crash_signatures(stderr: &str, expected: &str) {
    assert_eq!(tag(&exited(3, stderr)).as_deref(), Some(expected));
}

#[test]
fn thread_panic_wins_over_later_signatures() {
    let stderr = "Segmentation fault at address 0x0\nthread 1 panic: boom\n";
    assert_eq!(tag(&exited(139, stderr)).as_deref(), Some("boom"));
}

#[test]
fn crash_signature_wins_over_signal_and_code() {
    let mut state = exited(1, "thread 1 panic: boom\n\x1b[31m 3 fail");
    assert_eq!(tag(&state).as_deref(), Some("boom"));

    state.exit_code = None;
    state.signal = Some("SIGABRT");
    assert_eq!(tag(&state).as_deref(), Some("boom"));
}

#[test]
fn thread_panic_requires_line_ending() {
    assert_eq!(crash_signature("thread 1 panic: boom"), None);
}

#[test]
fn sigterm_before_deadline_is_reported_verbatim() {
    let mut state = exited(0, "");
    state.exit_code = None;
    state.signal = Some("SIGTERM");
    state.duration = Some(Duration::from_millis(500));
    assert_eq!(tag(&state).as_deref(), Some("SIGTERM"));
}

#[test]
fn sigterm_at_deadline_is_timeout() {
    let mut state = exited(0, "");
    state.exit_code = None;
    state.signal = Some("SIGTERM");
    state.duration = Some(TIMEOUT);
    assert_eq!(tag(&state).as_deref(), Some("timeout"));
}

#[test]
fn sigkill_past_deadline_is_still_the_signal() {
    let mut state = exited(0, "");
    state.exit_code = None;
    state.signal = Some("SIGKILL");
    state.duration = Some(TIMEOUT * 2);
    assert_eq!(tag(&state).as_deref(), Some("SIGKILL"));
}

#[yare::parameterized(
    red_count     = { "\x1b[31m 3 fail",                 "3 failing" },
    no_space      = { "summary \x1b[31m12 fail\x1b[0m",  "12 failing" },
    uncolored     = { " 3 fail",                         "code 1" },
    empty         = { "",                                "code 1" },
)]
fn exit_code_one(stderr: &str, expected: &str) {
    assert_eq!(tag(&exited(1, stderr)).as_deref(), Some(expected));
}

#[test]
fn missing_exit_code_is_timeout() {
    let mut state = exited(0, "");
    state.exit_code = None;
    state.duration = None;
    assert_eq!(tag(&state).as_deref(), Some("timeout"));
}

#[test]
fn other_codes_are_reported_raw() {
    assert_eq!(tag(&exited(2, "")).as_deref(), Some("code 2"));
    assert_eq!(tag(&exited(-1, "")).as_deref(), Some("code -1"));
}

#[test]
fn windows_codes_are_translated() {
    let state = exited(0xC000_0005_u32 as i32, "");
    let result = classify(&state, &WINDOWS);
    assert_eq!(
        result.failure,
        Some(Failure::Code("STATUS_ACCESS_VIOLATION".into()))
    );

    let result = classify(&exited(2, ""), &WINDOWS);
    assert_eq!(result.failure, Some(Failure::Code("2".into())));
}

proptest! {
    #[test]
    fn exit_zero_is_always_ok(stderr in ".*", ms in 0u64..100_000) {
        let state = TerminalState {
            exit_code: Some(0),
            signal: None,
            spawn_failure: None,
            stderr: &stderr,
            duration: Some(Duration::from_millis(ms)),
            timeout: TIMEOUT,
        };
        let result = classify(&state, &UNIX);
        prop_assert!(result.ok);
        prop_assert!(result.failure.is_none());
    }

    #[test]
    fn nonzero_exit_is_never_ok(code in any::<i32>().prop_filter("non-zero", |c| *c != 0), stderr in ".*") {
        let state = exited(code, &stderr);
        let result = classify(&state, &UNIX);
        prop_assert!(!result.ok);
        prop_assert!(result.failure.is_some());
    }
}
