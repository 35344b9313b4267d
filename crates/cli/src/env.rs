// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Default run timeout when `--timeout-ms` is not given.
pub fn timeout_ms() -> Option<Duration> {
    parse_duration_ms("SPAWNKIT_TIMEOUT_MS")
}

/// `tracing` filter directives.
pub fn log_filter() -> Option<String> {
    std::env::var("SPAWNKIT_LOG").ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
