// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the run deadline.

use super::*;

#[tokio::test]
async fn deadline_kills_and_reports_timeout() {
    let options = sh("echo started; sleep 5").timeout(Duration::from_millis(200));
    let started = std::time::Instant::now();

    let result = runner().run(&options).await;

    assert!(!result.ok);
    assert_eq!(result.error_tag().as_deref(), Some("timeout"));
    assert_eq!(result.exit_code, None);
    assert_eq!(result.signal_code, None);
    assert!(result.duration_ms() >= 200, "duration {}", result.duration);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn output_before_deadline_is_kept() {
    let out = Recorder::default();
    let options = sh("echo early; sleep 5")
        .timeout(Duration::from_millis(300))
        .on_stdout(out.sink());

    let result = runner().run(&options).await;

    assert_eq!(result.error_tag().as_deref(), Some("timeout"));
    assert_eq!(result.stdout, "early\n");
    assert_eq!(out.joined(), "early\n");
}

#[tokio::test]
async fn deadline_kills_process_ignoring_sigterm() {
    let options = sh("trap '' TERM; sleep 5; echo late").timeout(Duration::from_millis(200));
    let started = std::time::Instant::now();

    let result = runner().run(&options).await;

    assert_eq!(result.error_tag().as_deref(), Some("timeout"));
    assert!(!result.stdout.contains("late"));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn fast_exit_is_not_a_timeout() {
    let result = runner()
        .run(&sh("exit 0").timeout(Duration::from_secs(5)))
        .await;

    assert!(result.ok);
    assert!(result.duration_ms() < 5_000);
}
