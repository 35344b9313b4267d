// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion barrier between process exit and stdout end-of-stream.
//!
//! A clean exit (code 0, no signal) settles as soon as it is observed. Any
//! other exit waits until stdout has also closed, in either order, so that
//! output written right before dying is in the buffer before classification.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionBarrier {
    exit_seen: bool,
    stdout_end_seen: bool,
}

impl CompletionBarrier {
    /// Record the exit notification. Returns true when the run should settle now.
    pub fn on_exit(&mut self, clean: bool) -> bool {
        self.exit_seen = true;
        clean || self.stdout_end_seen
    }

    /// Record stdout end-of-stream. Returns true when the run should settle now.
    pub fn on_stdout_end(&mut self) -> bool {
        self.stdout_end_seen = true;
        self.exit_seen
    }

    pub fn exit_seen(&self) -> bool {
        self.exit_seen
    }

    pub fn stdout_end_seen(&self) -> bool {
        self.stdout_end_seen
    }
}

#[cfg(test)]
#[path = "barrier_tests.rs"]
mod tests;
