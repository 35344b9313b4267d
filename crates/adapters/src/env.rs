// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::path::PathBuf;

/// Directory holding the default stdout/stderr log files.
///
/// `SPAWNKIT_LOG_DIR` > system temp dir.
pub fn log_dir() -> PathBuf {
    std::env::var("SPAWNKIT_LOG_DIR")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
