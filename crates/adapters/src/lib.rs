// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for OS process I/O

pub mod env;
pub mod errno;
pub mod handle;
pub mod launch;
pub mod signal;
pub mod sink;
pub mod traced;

pub use handle::{GroupSignal, HandleError, ProcessHandle};
pub use launch::{Launched, LaunchSpec, Launcher, OsLauncher};
pub use sink::{LogFiles, OutputSink};
pub use traced::TracedLauncher;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use launch::{FakeLauncher, LaunchCall};
