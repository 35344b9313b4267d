// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit status decoding.

use std::process::ExitStatus;

/// Split an exit status into its code and terminating signal name.
///
/// A process killed by a signal has no exit code.
pub fn exit_parts(status: ExitStatus) -> (Option<i32>, Option<String>) {
    (status.code(), terminating_signal(status))
}

#[cfg(unix)]
fn terminating_signal(status: ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(signal_name)
}

#[cfg(not(unix))]
fn terminating_signal(_status: ExitStatus) -> Option<String> {
    None
}

/// `SIGTERM`-style name for a signal number.
#[cfg(unix)]
pub fn signal_name(signo: i32) -> String {
    use nix::sys::signal::Signal;

    Signal::try_from(signo)
        .map(|sig| sig.as_str().to_string())
        .unwrap_or_else(|_| format!("SIG{}", signo))
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
