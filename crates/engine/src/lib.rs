// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! spawnkit-engine: runs one external command to a classified result

pub mod barrier;
pub mod options;
pub mod retry;
pub mod runner;
pub mod session;

pub use barrier::CompletionBarrier;
pub use options::{SpawnOptions, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
pub use retry::RetryPolicy;
pub use runner::{ProcessRunner, DEFAULT_DRAIN_GRACE};
pub use session::Session;
pub use spawnkit_core::{Failure, SpawnFailure, SpawnResult};
