// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run configuration.

use spawnkit_adapters::{LaunchSpec, LogFiles, OutputSink};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Wall-clock budget measured from confirmed process start.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(12_000);

/// Transient launch failures are retried this many times.
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Everything needed for one `run`. Read-only for the duration of the run.
#[derive(Clone)]
pub struct SpawnOptions {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub timeout: Duration,
    /// `None` removes the variable from the inherited environment.
    pub env: Vec<(String, Option<String>)>,
    pub on_stdout: OutputSink,
    pub on_stderr: OutputSink,
    pub max_retries: u32,
}

impl SpawnOptions {
    /// Options for `command` with defaults: 12s timeout, one retry, and
    /// output appended to the default log files.
    pub fn new(command: impl Into<String>) -> Self {
        let logs = LogFiles::default_paths();
        Self {
            command: command.into(),
            args: Vec::new(),
            cwd: None,
            timeout: DEFAULT_TIMEOUT,
            env: Vec::new(),
            on_stdout: logs.stdout_sink(),
            on_stderr: logs.stderr_sink(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), Some(value.into())));
        self
    }

    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env.push((key.into(), None));
        self
    }

    pub fn on_stdout(mut self, sink: OutputSink) -> Self {
        self.on_stdout = sink;
        self
    }

    pub fn on_stderr(mut self, sink: OutputSink) -> Self {
        self.on_stderr = sink;
        self
    }

    /// Send both streams to `logs` instead of the default files.
    pub fn log_files(self, logs: &LogFiles) -> Self {
        self.on_stdout(logs.stdout_sink())
            .on_stderr(logs.stderr_sink())
    }

    /// Drop chunks instead of logging them; the result still has full output.
    pub fn discard_output(self) -> Self {
        self.on_stdout(spawnkit_adapters::sink::discard())
            .on_stderr(spawnkit_adapters::sink::discard())
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn launch_spec(&self) -> LaunchSpec {
        LaunchSpec {
            command: self.command.clone(),
            args: self.args.clone(),
            cwd: self.cwd.clone(),
            env: self.env.clone(),
        }
    }
}

impl fmt::Debug for SpawnOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnOptions")
            .field("command", &self.command)
            .field("args", &self.args)
            .field("cwd", &self.cwd)
            .field("timeout", &self.timeout)
            .field("env", &self.env)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
