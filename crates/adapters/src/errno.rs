// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conversion of OS launch errors into [`SpawnFailure`] codes.

use spawnkit_core::SpawnFailure;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::io;

/// Build a [`SpawnFailure`] from a failed `spawn()`.
///
/// The code is the errno name when the OS reported one, otherwise a best
/// guess from the error kind. A backtrace is attached when capture is
/// enabled (`RUST_BACKTRACE`).
pub fn spawn_failure(err: &io::Error) -> SpawnFailure {
    let failure = SpawnFailure::new(error_code(err), err.to_string());
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        failure.with_stack(format!("{}\n{}", err, backtrace))
    } else {
        failure
    }
}

/// Errno-style name for an I/O error, `UNKNOWN` when nothing fits.
pub fn error_code(err: &io::Error) -> String {
    err.raw_os_error()
        .and_then(errno_name)
        .unwrap_or_else(|| kind_code(err.kind()).to_string())
}

#[cfg(unix)]
fn errno_name(raw: i32) -> Option<String> {
    use nix::errno::Errno;

    match Errno::from_raw(raw) {
        Errno::UnknownErrno => None,
        errno => Some(format!("{:?}", errno)),
    }
}

#[cfg(not(unix))]
fn errno_name(_raw: i32) -> Option<String> {
    None
}

fn kind_code(kind: io::ErrorKind) -> &'static str {
    match kind {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::AlreadyExists => "EEXIST",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::TimedOut => "ETIMEDOUT",
        io::ErrorKind::Interrupted => "EINTR",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
#[path = "errno_tests.rs"]
mod tests;
