// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ownership of a launched child process.
//!
//! All pid and process-group math lives here; callers only see
//! [`ProcessHandle::terminate`], [`ProcessHandle::force_kill`] and
//! [`ProcessHandle::terminate_group`].

use std::io;
use std::process::ExitStatus;
use thiserror::Error;
use tokio::process::Child;

/// Errors from signalling a process.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error("failed to signal process {pid}: {source}")]
    Signal { pid: u32, source: io::Error },
    #[error("failed to signal process group {pgid}: {source}")]
    GroupSignal { pgid: u32, source: io::Error },
    #[error("failed to kill process: {0}")]
    Kill(#[source] io::Error),
}

/// Outcome of signalling the process group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSignal {
    Sent,
    /// The group no longer exists.
    Gone,
    /// Already signalled once, nothing sent.
    Skipped,
    /// No process groups on this platform.
    Unsupported,
}

pub struct ProcessHandle {
    child: Child,
    pid: Option<u32>,
    killed: bool,
    group_signalled: bool,
}

impl ProcessHandle {
    pub fn new(child: Child) -> Self {
        let pid = child.id();
        Self {
            child,
            pid,
            killed: false,
            group_signalled: false,
        }
    }

    /// Pid captured at launch; stays available after the child is reaped.
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Wait for the process to exit. Cancel safe.
    pub async fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Whether the process has already exited.
    pub fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    /// Ask the process to stop (`SIGTERM`).
    pub fn terminate(&mut self) -> Result<(), HandleError> {
        if self.has_exited() {
            return Ok(());
        }
        self.send_terminate()
    }

    #[cfg(unix)]
    fn send_terminate(&mut self) -> Result<(), HandleError> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        let Some(pid) = self.pid else {
            return Ok(());
        };
        match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            Ok(()) | Err(nix::errno::Errno::ESRCH) => Ok(()),
            Err(errno) => Err(HandleError::Signal {
                pid,
                source: io::Error::from(errno),
            }),
        }
    }

    #[cfg(not(unix))]
    fn send_terminate(&mut self) -> Result<(), HandleError> {
        self.child.start_kill().map_err(HandleError::Kill)
    }

    /// Kill the process and reap it. Only the first call does anything.
    pub async fn force_kill(&mut self) -> Result<(), HandleError> {
        if self.killed {
            return Ok(());
        }
        self.killed = true;
        if self.has_exited() {
            return Ok(());
        }
        self.child.kill().await.map_err(HandleError::Kill)
    }

    /// Send `SIGTERM` to the whole process group led by this child.
    ///
    /// Reaps grandchildren left behind once the child itself has exited.
    /// Only the first call signals.
    pub fn terminate_group(&mut self) -> Result<GroupSignal, HandleError> {
        if self.group_signalled {
            return Ok(GroupSignal::Skipped);
        }
        self.group_signalled = true;
        self.send_group_terminate()
    }

    #[cfg(unix)]
    fn send_group_terminate(&self) -> Result<GroupSignal, HandleError> {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let Some(pgid) = self.pid else {
            return Ok(GroupSignal::Gone);
        };
        match killpg(Pid::from_raw(pgid as i32), Signal::SIGTERM) {
            Ok(()) => Ok(GroupSignal::Sent),
            Err(nix::errno::Errno::ESRCH) => Ok(GroupSignal::Gone),
            Err(errno) => Err(HandleError::GroupSignal {
                pgid,
                source: io::Error::from(errno),
            }),
        }
    }

    #[cfg(not(unix))]
    fn send_group_terminate(&self) -> Result<GroupSignal, HandleError> {
        Ok(GroupSignal::Unsupported)
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
