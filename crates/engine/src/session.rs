// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State owned by a single launch attempt.
//!
//! A retry never reuses a session; each attempt starts from
//! [`Session::new`].

use crate::barrier::CompletionBarrier;
use spawnkit_adapters::signal::exit_parts;
use spawnkit_adapters::OutputSink;
use spawnkit_core::{epoch_ms, Platform, SpawnFailure, SpawnResult, TerminalState};
use std::process::ExitStatus;
use std::time::{Duration, Instant};

/// Accumulates one output stream, carrying split UTF-8 sequences across chunks.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    text: String,
    pending: Vec<u8>,
}

impl StreamBuffer {
    /// Append raw bytes and return the newly decoded text.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut decoded = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    decoded.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    let prefix = std::str::from_utf8(&self.pending[..valid]).unwrap_or_default();
                    decoded.push_str(prefix);
                    match e.error_len() {
                        Some(invalid) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + invalid);
                        }
                        // incomplete sequence at the end: wait for more bytes
                        None => {
                            self.pending.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }
        self.text.push_str(&decoded);
        decoded
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Flush any trailing partial sequence and return the full text.
    pub fn finish(&mut self) -> String {
        if !self.pending.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending).into_owned();
            self.text.push_str(&tail);
            self.pending.clear();
        }
        std::mem::take(&mut self.text)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    exit_code: Option<i32>,
    signal: Option<String>,
    spawn_failure: Option<SpawnFailure>,
    started_at_ms: Option<u64>,
    started: Option<Instant>,
    duration: Option<Duration>,
    stdout: StreamBuffer,
    stderr: StreamBuffer,
    barrier: CompletionBarrier,
    settled: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The OS confirmed the process exists.
    pub fn mark_started(&mut self) {
        self.started_at_ms = Some(epoch_ms());
        self.started = Some(Instant::now());
    }

    pub fn launch_failed(&mut self, failure: SpawnFailure) {
        self.spawn_failure = Some(failure);
    }

    pub fn spawn_failure(&self) -> Option<&SpawnFailure> {
        self.spawn_failure.as_ref()
    }

    pub fn stdout_chunk(&mut self, bytes: &[u8], sink: &OutputSink) {
        let text = self.stdout.push(bytes);
        if !text.is_empty() {
            sink(&text);
        }
    }

    pub fn stderr_chunk(&mut self, bytes: &[u8], sink: &OutputSink) {
        let text = self.stderr.push(bytes);
        if !text.is_empty() {
            sink(&text);
        }
    }

    /// Record the exit notification. Returns true when the run should settle.
    pub fn exited(&mut self, status: ExitStatus) -> bool {
        let (code, signal) = exit_parts(status);
        self.record_exit(code, signal)
    }

    /// Record an exit code and/or signal. Returns true when the run should settle.
    pub fn record_exit(&mut self, code: Option<i32>, signal: Option<String>) -> bool {
        let clean = code == Some(0) && signal.is_none();
        self.exit_code = code;
        self.signal = signal;
        self.measure();
        self.barrier.on_exit(clean)
    }

    /// The exit notification arrived but carried no status (wait failed).
    pub fn exit_unknown(&mut self) -> bool {
        self.measure();
        self.barrier.on_exit(false)
    }

    /// Record stdout end-of-stream. Returns true when the run should settle.
    pub fn stdout_ended(&mut self) -> bool {
        self.barrier.on_stdout_end()
    }

    /// Finalize. Returns false if the session was already settled.
    pub fn settle(&mut self) -> bool {
        if self.settled {
            return false;
        }
        self.settled = true;
        self.measure();
        true
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Settled through the deadline without ever seeing the process end.
    pub fn needs_force_kill(&self) -> bool {
        self.started.is_some() && self.exit_code.is_none() && self.signal.is_none()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    pub fn signal(&self) -> Option<&str> {
        self.signal.as_deref()
    }

    pub fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    pub fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    fn measure(&mut self) {
        if self.duration.is_none() {
            self.duration = self.started.map(|t| t.elapsed());
        }
    }

    /// Classify and build the final result.
    pub fn into_result(mut self, timeout: Duration, platform: &Platform) -> SpawnResult {
        let stdout = self.stdout.finish();
        let stderr = self.stderr.finish();
        let state = TerminalState {
            exit_code: self.exit_code,
            signal: self.signal.as_deref(),
            spawn_failure: self.spawn_failure.as_ref(),
            stderr: &stderr,
            duration: self.duration,
            timeout,
        };
        let timestamp = self.started_at_ms.unwrap_or_else(epoch_ms);
        SpawnResult::from_state(&state, stdout, timestamp, platform)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
