// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for transient launch failure retries.

use super::*;
use spawnkit_core::SpawnFailure;

fn busy() -> SpawnFailure {
    SpawnFailure::new("EBUSY", "Resource busy")
}

#[tokio::test]
async fn transient_failure_is_retried_then_succeeds() {
    let runner = fake_runner();
    runner.launcher().fail_next(busy());

    let result = runner.run(&sh("echo recovered").max_retries(1)).await;

    assert!(result.ok, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "recovered\n");
    assert_eq!(result.spawn_error, None);
    assert_eq!(runner.launcher().calls().len(), 2);
}

#[tokio::test]
async fn unknown_code_is_transient() {
    let runner = fake_runner();
    runner
        .launcher()
        .fail_next(SpawnFailure::new("UNKNOWN", "unknown error"));

    let result = runner.run(&sh("true")).await;

    assert!(result.ok);
    assert_eq!(runner.launcher().calls().len(), 2);
}

#[tokio::test]
async fn retries_stop_when_budget_is_spent() {
    let runner = fake_runner();
    runner.launcher().fail_next(busy()).fail_next(busy());

    let result = runner.run(&sh("echo never").max_retries(1)).await;

    assert!(!result.ok);
    assert_eq!(result.error_tag().as_deref(), Some("spawn error"));
    assert_eq!(result.stderr, "Resource busy");
    assert_eq!(result.stdout, "");
    assert_eq!(runner.launcher().calls().len(), 2);
}

#[tokio::test]
async fn permanent_failure_is_not_retried() {
    let runner = fake_runner();
    let options = SpawnOptions::new("spawnkit-definitely-missing-binary")
        .discard_output()
        .max_retries(3);

    let result = runner.run(&options).await;

    assert_eq!(
        result.spawn_error.as_ref().map(|f| f.code.as_str()),
        Some("ENOENT")
    );
    assert_eq!(runner.launcher().calls().len(), 1);
}

#[tokio::test]
async fn zero_retries_disables_retry() {
    let runner = fake_runner();
    runner.launcher().fail_next(busy());

    let result = runner.run(&sh("true").max_retries(0)).await;

    assert_eq!(result.error_tag().as_deref(), Some("spawn error"));
    assert_eq!(runner.launcher().calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn backoff_grows_linearly() {
    let runner = ProcessRunner::with_launcher(FakeLauncher::new());
    runner
        .launcher()
        .fail_next(busy())
        .fail_next(busy())
        .fail_next(busy());
    let started = tokio::time::Instant::now();

    let result = runner.run(&sh("true").max_retries(2)).await;

    let elapsed = started.elapsed();
    assert_eq!(result.error_tag().as_deref(), Some("spawn error"));
    assert_eq!(runner.launcher().calls().len(), 3);
    // 1000ms after the first failure, 2000ms after the second
    assert!(elapsed >= Duration::from_millis(3_000), "elapsed {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(3_100), "elapsed {:?}", elapsed);
}

#[tokio::test]
async fn launches_carry_command_and_args() {
    let runner = fake_runner();

    runner.run(&sh("true")).await;

    let calls = runner.launcher().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].command, "sh");
    assert_eq!(calls[0].args, vec!["-c", "true"]);
}
