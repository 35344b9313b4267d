// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry for transient launch failures.

use spawnkit_core::SpawnFailure;
use std::time::Duration;

/// Delay unit for the linear backoff.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before retrying after `failure` on zero-based `attempt`.
    ///
    /// `None` means give up: the failure is not transient or the budget is spent.
    pub fn backoff(&self, failure: &SpawnFailure, attempt: u32) -> Option<Duration> {
        if !failure.is_transient() || attempt >= self.max_retries {
            return None;
        }
        Some(self.base_delay * (attempt + 1))
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
