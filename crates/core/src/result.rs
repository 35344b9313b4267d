// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The immutable outcome of a run.

use crate::classify::{classify, TerminalState};
use crate::failure::{Failure, SpawnFailure};
use crate::platform::Platform;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in epoch milliseconds.
pub fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnResult {
    /// Exit code 0, no signal, no launch error.
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Failure>,
    pub exit_code: Option<i32>,
    pub signal_code: Option<String>,
    pub spawn_error: Option<SpawnFailure>,
    pub stdout: String,
    pub stderr: String,
    /// Epoch ms the process was confirmed started, or when the launch failed.
    pub timestamp: u64,
    /// Elapsed milliseconds from start to termination, `"0"` if never measured.
    pub duration: String,
}

impl SpawnResult {
    /// Classify `state` and assemble the final result.
    pub fn from_state(
        state: &TerminalState<'_>,
        stdout: String,
        timestamp: u64,
        platform: &Platform,
    ) -> Self {
        let verdict = classify(state, platform);
        let stderr = verdict
            .stderr_override
            .unwrap_or_else(|| state.stderr.to_string());
        let duration = state
            .duration
            .map(|d| d.as_millis().to_string())
            .unwrap_or_else(|| "0".to_string());

        Self {
            ok: verdict.ok,
            error: verdict.failure,
            exit_code: state.exit_code,
            signal_code: state.signal.map(str::to_string),
            spawn_error: state.spawn_failure.cloned(),
            stdout,
            stderr,
            timestamp,
            duration,
        }
    }

    /// The categorical error tag, e.g. `"timeout"` or `"code 2"`.
    pub fn error_tag(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Duration in milliseconds, `0` when it was never measured.
    pub fn duration_ms(&self) -> u64 {
        self.duration.parse().unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
