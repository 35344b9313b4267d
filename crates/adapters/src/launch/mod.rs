// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process launching

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLauncher, LaunchCall};

use crate::handle::ProcessHandle;
use async_trait::async_trait;
use spawnkit_core::SpawnFailure;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::{ChildStderr, ChildStdout, Command};

/// What to start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchSpec {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    /// `None` removes the variable from the inherited environment.
    pub env: Vec<(String, Option<String>)>,
}

/// A started process with its output pipes detached from the handle.
pub struct Launched {
    pub handle: ProcessHandle,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// Adapter for starting OS processes
#[async_trait]
pub trait Launcher: Send + Sync + 'static {
    /// Start the process; `Err` means the OS never confirmed it exists.
    async fn launch(&self, spec: &LaunchSpec) -> Result<Launched, SpawnFailure>;
}

/// Launches real processes via `tokio::process`.
///
/// Stdin is null and both output streams are piped. On unix the child
/// leads a new process group so the whole tree can be signalled.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLauncher;

impl OsLauncher {
    fn command(spec: &LaunchSpec) -> Command {
        let mut cmd = Command::new(&spec.command);
        cmd.args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &spec.env {
            match value {
                Some(value) => cmd.env(key, value),
                None => cmd.env_remove(key),
            };
        }
        #[cfg(unix)]
        cmd.process_group(0);
        cmd
    }
}

#[async_trait]
impl Launcher for OsLauncher {
    async fn launch(&self, spec: &LaunchSpec) -> Result<Launched, SpawnFailure> {
        let mut child = Self::command(spec)
            .spawn()
            .map_err(|e| crate::errno::spawn_failure(&e))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(SpawnFailure::new("UNKNOWN", "child output pipes unavailable"));
        };

        Ok(Launched {
            handle: ProcessHandle::new(child),
            stdout,
            stderr,
        })
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
