// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spawnkit clean-logs` specs

use crate::prelude::*;

#[test]
fn removes_default_log_files() {
    let builder = cli().args(&["clean-logs"]);
    let dir = builder.log_dir();
    std::fs::write(dir.join("spawnkit-stdout.log"), "old").unwrap();
    std::fs::write(dir.join("spawnkit-stderr.log"), "old").unwrap();

    let run = builder.passes().stdout_has("Removed ");
    assert!(dir.is_dir());

    assert!(!dir.join("spawnkit-stdout.log").exists());
    assert!(!dir.join("spawnkit-stderr.log").exists());
    drop(run);
}

#[test]
fn succeeds_when_nothing_to_remove() {
    cli().args(&["clean-logs"]).passes();
}
