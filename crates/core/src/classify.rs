// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification of a finished process into success or a failure category.
//!
//! Rules are evaluated in a fixed priority order and the first match wins:
//!
//! 1. clean exit (code 0, no signal, no launch error) is success
//! 2. launch errors: `timeout` when the message says so, else `spawn error`
//! 3. crash signatures found in stderr
//! 4. signals (`SIGTERM` at or past the deadline counts as `timeout`)
//! 5. exit code 1, refined by a red `N fail` summary
//! 6. no exit code at all is `timeout`
//! 7. any other code, translated on Windows when a reason is known

use crate::failure::{Failure, SpawnFailure};
use crate::platform::Platform;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Signal delivered by the timeout path and by polite shutdowns.
const TERMINATE_SIGNAL: &str = "SIGTERM";

// Allow expect here as the regexes are compile-time verified to be valid
#[allow(clippy::expect_used)]
static TIMED_OUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)timed[ -]out").expect("constant regex pattern is valid"));

/// Crash signatures in priority order.
#[allow(clippy::expect_used)]
static CRASH_SIGNATURES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"thread \d+ panic: ([^\r\n]*)(?:\r\n|\r|\n)",
        r"panic\(.*\): ([^\r\n]*)(?:\r\n|\r|\n)",
        r"Segmentation fault at address",
        r"Internal assertion failure",
        r"Illegal instruction at address",
        r"panic: (.*) at address",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("constant regex pattern is valid"))
    .collect()
});

#[allow(clippy::expect_used)]
static RED_FAIL_COUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[31m\s*(\d+) fail").expect("constant regex pattern is valid")
});

/// Everything known about a process once it has stopped (or never started).
#[derive(Debug, Clone, Copy)]
pub struct TerminalState<'a> {
    pub exit_code: Option<i32>,
    pub signal: Option<&'a str>,
    pub spawn_failure: Option<&'a SpawnFailure>,
    pub stderr: &'a str,
    /// Time from confirmed start to termination, if it was measured.
    pub duration: Option<Duration>,
    pub timeout: Duration,
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub ok: bool,
    pub failure: Option<Failure>,
    /// Replacement for the captured stderr (launch failures only).
    pub stderr_override: Option<String>,
}

impl Classification {
    fn success() -> Self {
        Self {
            ok: true,
            failure: None,
            stderr_override: None,
        }
    }

    fn failed(failure: Failure) -> Self {
        Self {
            ok: false,
            failure: Some(failure),
            stderr_override: None,
        }
    }
}

/// Map a terminal process state to success or a failure category.
pub fn classify(state: &TerminalState<'_>, platform: &Platform) -> Classification {
    if state.exit_code == Some(0) && state.signal.is_none() && state.spawn_failure.is_none() {
        return Classification::success();
    }

    if let Some(spawn) = state.spawn_failure {
        if TIMED_OUT.is_match(&spawn.message) {
            return Classification::failed(Failure::Timeout);
        }
        return Classification {
            ok: false,
            failure: Some(Failure::Spawn),
            stderr_override: Some(spawn.diagnostic().to_string()),
        };
    }

    if let Some(message) = crash_signature(state.stderr) {
        return Classification::failed(Failure::Crash(message));
    }

    if let Some(signal) = state.signal {
        let elapsed = state.duration.unwrap_or_default();
        if signal == TERMINATE_SIGNAL && elapsed >= state.timeout {
            return Classification::failed(Failure::Timeout);
        }
        return Classification::failed(Failure::Signal(signal.to_string()));
    }

    match state.exit_code {
        Some(1) => match failing_count(state.stderr) {
            Some(n) => Classification::failed(Failure::Failing(n)),
            None => Classification::failed(Failure::Code("1".to_string())),
        },
        None => Classification::failed(Failure::Timeout),
        Some(code) => {
            let reported = platform
                .exit_reason(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string());
            Classification::failed(Failure::Code(reported))
        }
    }
}

/// First matching crash signature, reduced to one lowercased line.
pub fn crash_signature(stderr: &str) -> Option<String> {
    CRASH_SIGNATURES.iter().find_map(|pattern| {
        let caps = pattern.captures(stderr)?;
        let text = caps.get(1).or_else(|| caps.get(0))?.as_str();
        Some(first_line(text).to_lowercase())
    })
}

/// Cut at the first real newline or literal `\n` escape.
fn first_line(text: &str) -> &str {
    let cut = [text.find('\n'), text.find("\\n")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len());
    &text[..cut]
}

fn failing_count(stderr: &str) -> Option<u64> {
    RED_FAIL_COUNT
        .captures(stderr)
        .and_then(|caps| caps.get(1))
        .and_then(|n| n.as_str().parse().ok())
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
