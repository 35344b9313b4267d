// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for launch, capture and clean exits.

use super::*;

#[tokio::test]
async fn clean_exit_is_ok() {
    let result = runner().run(&sh("echo hello")).await;

    assert!(result.ok);
    assert_eq!(result.error, None);
    assert_eq!(result.exit_code, Some(0));
    assert_eq!(result.signal_code, None);
    assert_eq!(result.spawn_error, None);
    assert_eq!(result.stdout, "hello\n");
}

#[tokio::test]
async fn clean_exit_ignores_stderr() {
    let result = runner()
        .run(&sh("echo 'thread 1 panic: boom' >&2; echo warn >&2"))
        .await;

    assert!(result.ok);
    assert_eq!(result.error, None);
    assert_eq!(result.stderr, "thread 1 panic: boom\nwarn\n");
}

#[tokio::test]
async fn timestamp_and_duration_are_recorded() {
    let before = spawnkit_core::epoch_ms();
    let result = runner().run(&sh("sleep 0.2")).await;
    let after = spawnkit_core::epoch_ms();

    assert!(result.ok);
    assert!(result.timestamp >= before && result.timestamp <= after);
    assert!(result.duration_ms() >= 150, "duration {}", result.duration);
    assert!(result.duration_ms() <= after - before + 1);
}

#[tokio::test]
async fn sinks_receive_every_chunk() {
    let out = Recorder::default();
    let err = Recorder::default();
    let options = sh("for i in 1 2 3; do echo out$i; echo err$i >&2; done")
        .on_stdout(out.sink())
        .on_stderr(err.sink());

    let result = runner().run(&options).await;

    assert!(result.ok);
    assert_eq!(out.joined(), "out1\nout2\nout3\n");
    assert_eq!(err.joined(), "err1\nerr2\nerr3\n");
    assert_eq!(result.stdout, out.joined());
    assert_eq!(result.stderr, err.joined());
}

#[tokio::test]
async fn large_output_is_fully_captured() {
    let result = runner()
        .run(&sh("i=0; while [ $i -lt 5000 ]; do echo line-$i; i=$((i+1)); done"))
        .await;

    assert!(result.ok);
    assert_eq!(result.stdout.lines().count(), 5000);
    assert_eq!(result.stdout.lines().last(), Some("line-4999"));
}

#[tokio::test]
async fn default_sinks_append_to_log_files() {
    let dir = tempfile::tempdir().unwrap();
    let logs = spawnkit_adapters::LogFiles::in_dir(dir.path());
    let options = SpawnOptions::new("sh")
        .args(["-c", "echo logged; echo noisy >&2"])
        .log_files(&logs);

    let result = runner().run(&options).await;

    assert!(result.ok);
    assert_eq!(std::fs::read_to_string(&logs.stdout).unwrap(), "logged\n");
    assert_eq!(std::fs::read_to_string(&logs.stderr).unwrap(), "noisy\n");
    logs.clean().unwrap();
}

#[tokio::test]
async fn cwd_and_env_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("marker.txt"), "here").unwrap();
    let options = sh("cat marker.txt; echo \" $SK_VALUE\"")
        .cwd(dir.path())
        .env("SK_VALUE", "from-env");

    let result = runner().run(&options).await;

    assert!(result.ok, "stderr: {}", result.stderr);
    assert_eq!(result.stdout, "here from-env\n");
}

#[tokio::test]
async fn clean_exit_does_not_wait_for_inherited_stdout() {
    // the backgrounded child ignores SIGTERM and keeps stdout open
    let options = sh("trap '' TERM; sleep 5 & echo done").timeout(Duration::from_secs(10));
    let started = std::time::Instant::now();

    let result = runner().run(&options).await;

    assert!(result.ok);
    assert!(result.stdout.starts_with("done"));
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn concurrent_runs_are_independent() {
    let runner = runner();
    let a = sh("echo a; exit 0");
    let b = sh("echo b >&2; exit 2");

    let (ra, rb) = tokio::join!(runner.run(&a), runner.run(&b));

    assert!(ra.ok);
    assert_eq!(ra.stdout, "a\n");
    assert!(!rb.ok);
    assert_eq!(rb.error_tag().as_deref(), Some("code 2"));
    assert_eq!(rb.stderr, "b\n");
}

#[tokio::test]
async fn repeated_runs_classify_identically() {
    let runner = runner();
    let options = sh("echo x >&2; exit 2");

    let first = runner.run(&options).await;
    let second = runner.run(&options).await;

    assert_eq!(first.ok, second.ok);
    assert_eq!(first.error, second.error);
    assert_eq!(first.exit_code, second.exit_code);
}
