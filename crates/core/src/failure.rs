// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure categories reported for a finished run.

use serde::{Serialize, Serializer};
use std::fmt;

/// Launch error codes worth retrying.
pub const TRANSIENT_SPAWN_CODES: &[&str] = &["EBUSY", "UNKNOWN"];

/// Categorical reason a run did not succeed.
///
/// The `Display` form is the short tag consumers match on (`"timeout"`,
/// `"spawn error"`, `"3 failing"`, `"code 2"`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// Deadline elapsed before the process finished.
    Timeout,
    /// The OS refused to start the process.
    Spawn,
    /// A crash signature was found in stderr; holds the extracted message.
    Crash(String),
    /// Terminated by a signal other than the timeout kill.
    Signal(String),
    /// Exit code 1 with a red `N fail` summary in stderr.
    Failing(u64),
    /// Any other non-zero exit, possibly translated to a platform reason.
    Code(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Timeout => f.write_str("timeout"),
            Failure::Spawn => f.write_str("spawn error"),
            Failure::Crash(msg) => f.write_str(msg),
            Failure::Signal(name) => f.write_str(name),
            Failure::Failing(n) => write!(f, "{} failing", n),
            Failure::Code(code) => write!(f, "code {}", code),
        }
    }
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A launch-level failure: the process never started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnFailure {
    /// Errno-style name such as `ENOENT` or `EBUSY`, `UNKNOWN` when unmapped.
    pub code: String,
    pub message: String,
    /// Captured backtrace, when capture is enabled.
    #[serde(skip)]
    pub stack: Option<String>,
}

impl SpawnFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Text reported in place of stderr: the stack if any, else the message.
    pub fn diagnostic(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }

    /// Whether this launch failure is likely to succeed on retry.
    pub fn is_transient(&self) -> bool {
        TRANSIENT_SPAWN_CODES.contains(&self.code.as_str())
    }
}

impl fmt::Display for SpawnFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
