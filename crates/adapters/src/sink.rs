// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-chunk output sinks and the default log files behind them.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Receives each chunk of decoded output as it arrives. Fire-and-forget.
pub type OutputSink = Arc<dyn Fn(&str) + Send + Sync>;

const STDOUT_LOG: &str = "spawnkit-stdout.log";
const STDERR_LOG: &str = "spawnkit-stderr.log";

/// Wrap a closure as an [`OutputSink`].
pub fn sink_fn(f: impl Fn(&str) + Send + Sync + 'static) -> OutputSink {
    Arc::new(f)
}

/// A sink that drops everything.
pub fn discard() -> OutputSink {
    Arc::new(|_: &str| {})
}

/// The pair of append-only files the default sinks write to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFiles {
    pub stdout: PathBuf,
    pub stderr: PathBuf,
}

impl LogFiles {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            stdout: dir.join(STDOUT_LOG),
            stderr: dir.join(STDERR_LOG),
        }
    }

    /// Files under `SPAWNKIT_LOG_DIR`, or the system temp dir.
    pub fn default_paths() -> Self {
        Self::in_dir(&crate::env::log_dir())
    }

    pub fn stdout_sink(&self) -> OutputSink {
        append_sink(self.stdout.clone())
    }

    pub fn stderr_sink(&self) -> OutputSink {
        append_sink(self.stderr.clone())
    }

    /// Remove both files. Missing files are not an error.
    pub fn clean(&self) -> io::Result<()> {
        for path in [&self.stdout, &self.stderr] {
            match std::fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn append_sink(path: PathBuf) -> OutputSink {
    Arc::new(move |text: &str| {
        if let Err(e) = append(&path, text) {
            tracing::debug!(path = %path.display(), error = %e, "failed to append output chunk");
        }
    })
}

fn append(path: &Path, text: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
