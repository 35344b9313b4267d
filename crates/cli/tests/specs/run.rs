// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spawnkit run` specs

use crate::prelude::*;

#[test]
fn success_prints_ok_summary() {
    cli()
        .args(&["run", "--", "sh", "-c", "echo hello"])
        .passes()
        .stdout_has("ok (exit 0, ");
}

#[test]
fn output_goes_to_log_files_by_default() {
    let run = cli()
        .args(&["run", "--", "sh", "-c", "echo logged; echo noisy >&2"])
        .passes();
    assert_eq!(run.log("spawnkit-stdout.log"), "logged\n");
    assert_eq!(run.log("spawnkit-stderr.log"), "noisy\n");
    assert!(!run.stdout().contains("logged"));
}

#[test]
fn stream_echoes_output_live() {
    let run = cli()
        .args(&["run", "--stream", "--", "sh", "-c", "echo live; echo warn >&2"])
        .passes()
        .stdout_has("live\n")
        .stderr_has("warn\n");
    assert_eq!(run.log("spawnkit-stdout.log"), "");
}

#[test]
fn nonzero_exit_fails_with_code_tag() {
    let run = cli()
        .args(&["run", "--", "sh", "-c", "exit 2"])
        .fails()
        .stdout_has("failed: code 2 (exit 2, ");
    assert_eq!(run.code(), Some(1));
}

#[test]
fn timeout_is_reported() {
    cli()
        .args(&["run", "--timeout-ms", "200", "--", "sleep", "5"])
        .fails()
        .stdout_has("failed: timeout (no exit status, ");
}

#[test]
fn timeout_from_environment() {
    cli()
        .env("SPAWNKIT_TIMEOUT_MS", "200")
        .args(&["run", "--", "sleep", "5"])
        .fails()
        .stdout_has("failed: timeout");
}

#[test]
fn missing_binary_is_a_spawn_error() {
    cli()
        .args(&["run", "--", "spawnkit-definitely-missing-binary"])
        .fails()
        .stdout_has("failed: spawn error (ENOENT: ");
}

#[test]
fn json_output_is_the_serialized_result() {
    let run = cli()
        .args(&["-o", "json", "run", "--", "sh", "-c", "echo out; exit 3"])
        .fails();
    let json = run.json();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "code 3");
    assert_eq!(json["exitCode"], 3);
    assert_eq!(json["signalCode"], serde_json::Value::Null);
    assert_eq!(json["stdout"], "out\n");
    assert!(json["timestamp"].as_u64().unwrap() > 0);
    assert!(json["duration"].is_string());
}

#[test]
fn json_success_omits_error() {
    let run = cli()
        .args(&["run", "-o", "json", "--", "true"])
        .passes();
    let json = run.json();
    assert_eq!(json["ok"], true);
    assert!(json.get("error").is_none());
}

#[test]
fn env_cwd_and_unset_reach_the_command() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("here.txt"), "").unwrap();
    let cwd = dir.path().to_string_lossy().to_string();
    cli()
        .env("SPAWNKIT_SPEC_DROP", "present")
        .args(&[
            "run",
            "--stream",
            "--cwd",
            &cwd,
            "--env",
            "SPAWNKIT_SPEC_SET=value",
            "--unset",
            "SPAWNKIT_SPEC_DROP",
            "--",
            "sh",
            "-c",
            "ls; echo set=$SPAWNKIT_SPEC_SET drop=${SPAWNKIT_SPEC_DROP:-none}",
        ])
        .passes()
        .stdout_has("here.txt")
        .stdout_has("set=value drop=none");
}
