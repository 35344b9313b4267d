// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage specs

use crate::prelude::*;

#[test]
fn no_subcommand_prints_help() {
    cli()
        .passes()
        .stdout_has("Usage: spawnkit")
        .stdout_has("clean-logs");
}

#[test]
fn run_help_lists_flags() {
    cli()
        .args(&["run", "--help"])
        .passes()
        .stdout_has("--timeout-ms")
        .stdout_has("--max-retries")
        .stdout_has("--stream");
}

#[test]
fn run_without_command_is_a_usage_error() {
    let run = cli().args(&["run"]).fails();
    assert_eq!(run.code(), Some(2));
}

#[test]
fn bad_env_pair_is_rejected() {
    cli()
        .args(&["run", "--env", "NOEQUALS", "--", "true"])
        .fails()
        .stderr_has("no `=` found");
}
