// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for abnormal exits and launch failures.

use super::*;
use yare::parameterized;

#[parameterized(
    plain_code = { "exit 2", "code 2" },
    red_fail_count = { "printf '\\033[31m 3 fail\\n' >&2; exit 1", "3 failing" },
    thread_panic = { "printf 'thread 1 panic: Boom\\n' >&2; exit 3", "boom" },
    segfault = { "echo 'Segmentation fault at address 0x0' >&2; exit 139", "segmentation fault at address" },
    exit_one_without_count = { "echo 'request timed out' >&2; exit 1", "code 1" },
)]
#[test_macro(tokio::test)]
async fn abnormal_exit_is_classified(script: &str, tag: &str) {
    let result = runner().run(&sh(script)).await;

    assert!(!result.ok);
    assert_eq!(result.error_tag().as_deref(), Some(tag), "stderr: {}", result.stderr);
    assert_eq!(result.signal_code, None);
    assert!(result.exit_code.is_some_and(|code| code != 0));
}

#[parameterized(
    term = { "TERM", "SIGTERM" },
    kill = { "KILL", "SIGKILL" },
)]
#[test_macro(tokio::test)]
async fn signal_exit_is_classified(signal: &str, name: &str) {
    let result = runner().run(&sh(&format!("echo before; kill -{} $$", signal))).await;

    assert!(!result.ok);
    assert_eq!(result.exit_code, None);
    assert_eq!(result.signal_code.as_deref(), Some(name));
    assert_eq!(result.error_tag().as_deref(), Some(name));
    assert_eq!(result.stdout, "before\n");
}

#[tokio::test]
async fn abnormal_exit_keeps_trailing_output() {
    let result = runner()
        .run(&sh("i=0; while [ $i -lt 200 ]; do echo row-$i; i=$((i+1)); done; exit 4"))
        .await;

    assert_eq!(result.error_tag().as_deref(), Some("code 4"));
    assert_eq!(result.stdout.lines().count(), 200);
}

#[tokio::test]
async fn abnormal_exit_with_held_stdout_settles_at_deadline() {
    // the grandchild ignores SIGTERM and keeps stdout open past the exit
    let options = sh("trap '' TERM; sleep 5 & exit 3").timeout(Duration::from_millis(300));
    let started = std::time::Instant::now();

    let result = runner().run(&options).await;

    assert_eq!(result.exit_code, Some(3));
    assert_eq!(result.error_tag().as_deref(), Some("code 3"));
    assert!(result.duration_ms() < 300, "duration {}", result.duration);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn missing_command_is_a_spawn_error() {
    let options = SpawnOptions::new("spawnkit-definitely-missing-binary").discard_output();

    let result = runner().run(&options).await;

    assert!(!result.ok);
    assert_eq!(result.error_tag().as_deref(), Some("spawn error"));
    let failure = result.spawn_error.as_ref().unwrap();
    assert_eq!(failure.code, "ENOENT");
    assert_eq!(result.stderr, failure.diagnostic());
    assert_eq!(result.exit_code, None);
    assert_eq!(result.signal_code, None);
    assert_eq!(result.stdout, "");
    assert_eq!(result.duration, "0");
    assert!(result.timestamp > 0);
}

#[tokio::test]
async fn missing_cwd_is_a_spawn_error() {
    let options = sh("true").cwd("/spawnkit/no/such/dir");

    let result = runner().run(&options).await;

    assert_eq!(result.error_tag().as_deref(), Some("spawn error"));
    assert_eq!(
        result.spawn_error.as_ref().map(|f| f.code.as_str()),
        Some("ENOENT")
    );
}
